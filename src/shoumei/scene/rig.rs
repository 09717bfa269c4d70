use crate::frame::uniforms::UniformSink;
use crate::scene::lights::{Attenuation, Channel, Light, Photometry};
use nalgebra::Vector3;

pub const POINT_LIGHT_POSITIONS: [[f32; 3]; 4] = [
    [1.5, 1.5, 0.0],
    [1.5, -1.5, 0.0],
    [-1.5, 1.5, 0.0],
    [-1.5, -1.5, 0.0],
];

const SPOT_INNER_CUTOFF: f32 = 12.5;
const SPOT_OUTER_CUTOFF: f32 = 15.0;

/// Lights toggled together by one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightGroup {
    Directional,
    Point,
    Spot,
}

impl LightGroup {
    pub const ALL: [LightGroup; 3] = [LightGroup::Directional, LightGroup::Point, LightGroup::Spot];

    fn index(self) -> usize {
        match self {
            LightGroup::Directional => 0,
            LightGroup::Point => 1,
            LightGroup::Spot => 2,
        }
    }
}

fn channel_index(channel: Channel) -> usize {
    match channel {
        Channel::Ambient => 0,
        Channel::Diffuse => 1,
        Channel::Specular => 2,
    }
}

/// Every light in the scene plus the group and channel switches driving them.
///
/// A group switch turns all of its lights fully on or off. A channel switch is global and
/// only reaches the groups that are currently on.
#[derive(Debug, Clone)]
pub struct LightRig {
    pub directional: Light,
    pub points: Vec<Light>,
    pub spot: Light,
    groups: [bool; 3],
    channels: [bool; 3],
}

impl LightRig {
    pub fn new(directional: Light, points: Vec<Light>, spot: Light) -> Self {
        LightRig {
            directional,
            points,
            spot,
            groups: [true; 3],
            channels: [true; 3],
        }
    }

    /// The lab scene: a dim sun, four lamps around the cubes and a flashlight at the
    /// camera's start.
    pub fn lab() -> Self {
        let directional = Light::directional(
            Vector3::new(-0.2, -1.0, -0.3),
            Photometry::grey(0.05, 0.4, 0.5),
        );

        let attenuation = Attenuation::new(1.0, 0.09, 0.032);
        let points = POINT_LIGHT_POSITIONS
            .iter()
            .enumerate()
            .map(|(slot, p)| {
                Light::point(
                    Vector3::from(*p),
                    Photometry::grey(0.05, 0.8, 1.0),
                    attenuation,
                    slot,
                )
            })
            .collect();

        let spot = Light::spot(
            Vector3::new(0.0, 1.1, 5.2),
            Vector3::new(0.0, 0.0, -1.0),
            Photometry::grey(0.0, 1.0, 1.0),
            attenuation,
            SPOT_INNER_CUTOFF,
            SPOT_OUTER_CUTOFF,
        );

        Self::new(directional, points, spot)
    }

    pub fn is_group_on(&self, group: LightGroup) -> bool {
        self.groups[group.index()]
    }

    pub fn is_channel_on(&self, channel: Channel) -> bool {
        self.channels[channel_index(channel)]
    }

    /// Flips a whole group. Turning it back on restores every channel of its lights.
    pub fn toggle_group(&mut self, group: LightGroup) {
        let on = !self.groups[group.index()];
        self.groups[group.index()] = on;
        for light in self.group_mut(group) {
            if on {
                light.turn_on();
            } else {
                light.turn_off();
            }
        }
        log::debug!("{:?} lights {}", group, if on { "on" } else { "off" });
    }

    /// Flips a channel switch once and applies the new state to every group that is on.
    pub fn toggle_channel(&mut self, channel: Channel) {
        let on = !self.channels[channel_index(channel)];
        self.channels[channel_index(channel)] = on;
        for group in LightGroup::ALL.iter() {
            if !self.is_group_on(*group) {
                continue;
            }
            for light in self.group_mut(*group) {
                light.set_channel(channel, on);
            }
        }
        log::debug!("{:?} channel {}", channel, if on { "on" } else { "off" });
    }

    /// Keeps the spot light on the viewer.
    pub fn follow(&mut self, position: Vector3<f32>, direction: Vector3<f32>) {
        self.spot.place(position, direction);
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        std::iter::once(&self.directional)
            .chain(self.points.iter())
            .chain(std::iter::once(&self.spot))
    }

    pub fn upload_to<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        for light in self.lights() {
            light.upload_to(sink);
        }
    }

    fn group_mut(&mut self, group: LightGroup) -> &mut [Light] {
        match group {
            LightGroup::Directional => std::slice::from_mut(&mut self.directional),
            LightGroup::Point => &mut self.points,
            LightGroup::Spot => std::slice::from_mut(&mut self.spot),
        }
    }
}
