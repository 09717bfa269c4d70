use crate::frame::uniforms::UniformSink;
use nalgebra::Vector3;

/// One of the three Phong contributions of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Ambient,
    Diffuse,
    Specular,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Ambient, Channel::Diffuse, Channel::Specular];

    pub fn uniform_name(self) -> &'static str {
        match self {
            Channel::Ambient => "ambient",
            Channel::Diffuse => "diffuse",
            Channel::Specular => "specular",
        }
    }
}

/// Per-channel output multipliers. Each one is either `1.0` or `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channels {
    ambient: f32,
    diffuse: f32,
    specular: f32,
}

impl Default for Channels {
    fn default() -> Self {
        Channels {
            ambient: 1.0,
            diffuse: 1.0,
            specular: 1.0,
        }
    }
}

impl Channels {
    pub fn set(&mut self, channel: Channel, on: bool) {
        *self.multiplier_mut(channel) = if on { 1.0 } else { 0.0 };
    }

    pub fn set_all(&mut self, on: bool) {
        for channel in Channel::ALL.iter() {
            self.set(*channel, on);
        }
    }

    pub fn multiplier(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Ambient => self.ambient,
            Channel::Diffuse => self.diffuse,
            Channel::Specular => self.specular,
        }
    }

    pub fn is_on(&self, channel: Channel) -> bool {
        self.multiplier(channel) != 0.0
    }

    fn multiplier_mut(&mut self, channel: Channel) -> &mut f32 {
        match channel {
            Channel::Ambient => &mut self.ambient,
            Channel::Diffuse => &mut self.diffuse,
            Channel::Specular => &mut self.specular,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photometry {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl Photometry {
    pub fn new(ambient: Vector3<f32>, diffuse: Vector3<f32>, specular: Vector3<f32>) -> Self {
        Photometry {
            ambient,
            diffuse,
            specular,
        }
    }

    /// White light with the given intensity per channel.
    pub fn grey(ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self::new(
            Vector3::repeat(ambient),
            Vector3::repeat(diffuse),
            Vector3::repeat(specular),
        )
    }

    pub fn channel(&self, channel: Channel) -> Vector3<f32> {
        match channel {
            Channel::Ambient => self.ambient,
            Channel::Diffuse => self.diffuse,
            Channel::Specular => self.specular,
        }
    }
}

/// `1 / (constant + linear * d + quadratic * d^2)` falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Attenuation {
            constant,
            linear,
            quadratic,
        }
    }

    fn upload_to<S: UniformSink + ?Sized>(&self, sink: &mut S, prefix: &str) {
        sink.set_float(&format!("{}.k_c", prefix), self.constant);
        sink.set_float(&format!("{}.k_l", prefix), self.linear);
        sink.set_float(&format!("{}.k_q", prefix), self.quadratic);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    Directional {
        direction: Vector3<f32>,
    },
    Point {
        position: Vector3<f32>,
        attenuation: Attenuation,
        /// Index into the shader's `pointLight` array.
        slot: usize,
    },
    Spot {
        position: Vector3<f32>,
        direction: Vector3<f32>,
        attenuation: Attenuation,
        /// Degrees.
        inner_cutoff: f32,
        /// Degrees.
        outer_cutoff: f32,
    },
}

/// A light source with per-channel switches.
///
/// Switching a channel off only zeroes what gets uploaded for it. The light keeps all of its
/// uniforms, so the shader evaluates it every frame with a zero weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub source: Source,
    pub color: Photometry,
    channels: Channels,
}

impl Light {
    pub fn new(source: Source, color: Photometry) -> Self {
        log::trace!("instance of {}", std::any::type_name::<Self>());
        Light {
            source,
            color,
            channels: Channels::default(),
        }
    }

    pub fn directional(direction: Vector3<f32>, color: Photometry) -> Self {
        Self::new(Source::Directional { direction }, color)
    }

    pub fn point(
        position: Vector3<f32>,
        color: Photometry,
        attenuation: Attenuation,
        slot: usize,
    ) -> Self {
        Self::new(
            Source::Point {
                position,
                attenuation,
                slot,
            },
            color,
        )
    }

    pub fn spot(
        position: Vector3<f32>,
        direction: Vector3<f32>,
        color: Photometry,
        attenuation: Attenuation,
        inner_cutoff: f32,
        outer_cutoff: f32,
    ) -> Self {
        Self::new(
            Source::Spot {
                position,
                direction,
                attenuation,
                inner_cutoff,
                outer_cutoff,
            },
            color,
        )
    }

    pub fn turn_on(&mut self) {
        self.channels.set_all(true);
    }

    pub fn turn_off(&mut self) {
        self.channels.set_all(false);
    }

    pub fn turn_channel_on(&mut self, channel: Channel) {
        self.channels.set(channel, true);
    }

    pub fn turn_channel_off(&mut self, channel: Channel) {
        self.channels.set(channel, false);
    }

    pub fn set_channel(&mut self, channel: Channel, on: bool) {
        self.channels.set(channel, on);
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    /// Colour actually sent to the shader for `channel`.
    pub fn emitted(&self, channel: Channel) -> Vector3<f32> {
        self.color.channel(channel) * self.channels.multiplier(channel)
    }

    /// Moves a point or spot light. Spot lights are also re-aimed; directional lights only
    /// take the new direction.
    pub fn place(&mut self, new_position: Vector3<f32>, new_direction: Vector3<f32>) {
        match &mut self.source {
            Source::Directional { direction } => *direction = new_direction,
            Source::Point { position, .. } => *position = new_position,
            Source::Spot {
                position,
                direction,
                ..
            } => {
                *position = new_position;
                *direction = new_direction;
            }
        }
    }

    pub fn uniform_prefix(&self) -> String {
        match self.source {
            Source::Directional { .. } => "dirLight".to_owned(),
            Source::Point { slot, .. } => format!("pointLight[{}]", slot),
            Source::Spot { .. } => "spotLight".to_owned(),
        }
    }

    pub fn upload_to<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        let prefix = self.uniform_prefix();
        match &self.source {
            Source::Directional { direction } => {
                sink.set_vec3(&format!("{}.direction", prefix), direction);
            }
            Source::Point {
                position,
                attenuation,
                ..
            } => {
                sink.set_vec3(&format!("{}.position", prefix), position);
                attenuation.upload_to(sink, &prefix);
            }
            Source::Spot {
                position,
                direction,
                attenuation,
                inner_cutoff,
                outer_cutoff,
            } => {
                sink.set_vec3(&format!("{}.position", prefix), position);
                sink.set_vec3(&format!("{}.direction", prefix), direction);
                attenuation.upload_to(sink, &prefix);
                sink.set_float(
                    &format!("{}.inner_circle", prefix),
                    inner_cutoff.to_radians().cos(),
                );
                sink.set_float(
                    &format!("{}.outer_circle", prefix),
                    outer_cutoff.to_radians().cos(),
                );
            }
        }

        for channel in Channel::ALL.iter() {
            sink.set_vec3(
                &format!("{}.{}", prefix, channel.uniform_name()),
                &self.emitted(*channel),
            );
        }
    }
}
