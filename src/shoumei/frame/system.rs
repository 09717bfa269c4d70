use crate::debug::tracing::timed;
use crate::engine::StartupError;
use crate::figure::{Figure, TexRect};
use crate::frame::shader::Shader;
use crate::frame::shape::{DrawPass, Mesh, Shape};
use crate::frame::texture::{Sampling, TextureStore};
use crate::frame::uniforms::{UniformSet, UniformSink};
use crate::frame::FrameError;
use crate::scene::material::MaterialMaps;
use crate::scene::rig::POINT_LIGHT_POSITIONS;
use crate::scene::{Scene, CONTAINER_OFFSETS, MARKER_SCALE, SPHERE_OFFSET};
use glium::backend::Facade;
use glium::{Depth, DepthTest, DrawParameters, Surface};
use nalgebra::{Matrix4, Vector3};
use std::path::Path;

const CLEAR_COLOR: (f32, f32, f32, f32) = (0.1, 0.1, 0.1, 1.0);
const MARKER_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
const SHININESS: f32 = 32.0;

/// Image pair and sampling used by one container cube.
struct ContainerLook {
    diffuse: &'static str,
    specular: &'static str,
    sampling: Sampling,
    tex: TexRect,
}

fn container_looks() -> [ContainerLook; 6] {
    use glium::uniforms::MagnifySamplerFilter as Mag;
    use glium::uniforms::MinifySamplerFilter as Min;
    use glium::uniforms::SamplerWrapFunction as Wrap;

    let container = |sampling, tex| ContainerLook {
        diffuse: "container2.png",
        specular: "container2_specular.png",
        sampling,
        tex,
    };
    let emoji = |sampling| ContainerLook {
        diffuse: "emoji.png",
        specular: "white_background.png",
        sampling,
        tex: TexRect::unit(),
    };
    let doubled = TexRect::new(0.0, 0.0, 2.0, 2.0);

    [
        container(Sampling::smooth(Wrap::Repeat), TexRect::unit()),
        container(Sampling::smooth(Wrap::Repeat), doubled),
        container(Sampling::smooth(Wrap::Mirror), doubled),
        container(Sampling::smooth(Wrap::Clamp), doubled),
        emoji(Sampling::new(Wrap::Repeat, Min::Nearest, Mag::Nearest)),
        emoji(Sampling::new(Wrap::Repeat, Min::Linear, Mag::Linear)),
    ]
}

/// GPU resources of the scene and the per-frame draw sequence.
pub struct FrameSystem {
    lit: Shader,
    lit_textured: Shader,
    flat: Shader,
    textures: TextureStore,
    sphere: Shape,
    containers: Vec<Shape>,
    marker: Shape,
}

impl FrameSystem {
    pub fn new<F: Facade + ?Sized>(facade: &F, assets: &Path) -> Result<Self, StartupError> {
        log::trace!("instance of {}", std::any::type_name::<Self>());
        let lit = Shader::load(facade, assets, "lighting")?;
        let lit_textured = Shader::load(facade, assets, "lighting_textured")?;
        let flat = Shader::load(facade, assets, "flat")?;

        let mut textures = TextureStore::new();
        let texture_dir = assets.join("textures");
        let containers = timed("container upload", || {
            container_looks()
                .iter()
                .map(|look| -> Result<Shape, StartupError> {
                    let diffuse = textures.load(facade, &texture_dir.join(look.diffuse), look.sampling);
                    let specular = textures.load(facade, &texture_dir.join(look.specular), look.sampling);
                    let mesh = Mesh::upload(facade, &Figure::unit_cube(look.tex))?;
                    Ok(Shape::new(mesh).with_maps(MaterialMaps::new(diffuse, specular, SHININESS)))
                })
                .collect::<Result<Vec<_>, StartupError>>()
        })?;

        let mut sphere = Shape::new(Mesh::upload(facade, &Figure::uv_sphere(0.5, 36, 18))?);
        sphere.set_material(Vector3::new(1.0, 0.647, 0.0), Vector3::repeat(0.5), SHININESS);

        let marker = Shape::new(Mesh::upload(facade, &Figure::unit_cube(TexRect::unit()))?);

        log::info!(
            "Scene ready: {} textures, {} containers",
            textures.len(),
            containers.len()
        );
        Ok(FrameSystem {
            lit,
            lit_textured,
            flat,
            textures,
            sphere,
            containers,
            marker,
        })
    }

    /// Draws one frame into `target`. The caller finishes the frame.
    pub fn render<S: Surface>(&self, target: &mut S, scene: &Scene) -> Result<(), FrameError> {
        let params = DrawParameters {
            depth: Depth {
                test: DepthTest::IfLess,
                write: true,
                ..Default::default()
            },
            ..Default::default()
        };

        target.clear_color_and_depth(CLEAR_COLOR, 1.0);

        let lit_uniforms = lit_uniforms(scene);
        let flat_uniforms = camera_uniforms(scene);
        let model = scene.transform.model_matrix();

        let mut pass = DrawPass {
            target: &mut *target,
            shader: &self.lit,
            uniforms: &lit_uniforms,
            textures: &self.textures,
            params: &params,
        };
        let sphere_model = model * Matrix4::new_translation(&Vector3::from(SPHERE_OFFSET));
        self.sphere.draw(&mut pass, &sphere_model)?;

        pass.shader = &self.lit_textured;
        for (shape, offset) in self.containers.iter().zip(CONTAINER_OFFSETS.iter()) {
            let container_model = model * Matrix4::new_translation(&Vector3::from(*offset));
            shape.draw_with_texture(&mut pass, &container_model)?;
        }

        pass.shader = &self.flat;
        pass.uniforms = &flat_uniforms;
        let color = Vector3::from(MARKER_COLOR);
        for position in POINT_LIGHT_POSITIONS.iter() {
            let marker_model = marker_model(&Vector3::from(*position));
            self.marker.draw_flat(&mut pass, &marker_model, &color)?;
        }

        Ok(())
    }
}

/// `projection` and `view` of the active camera.
pub fn camera_uniforms(scene: &Scene) -> UniformSet {
    let mut set = UniformSet::new();
    scene.active_camera().upload_to(&mut set);
    set
}

/// Camera uniforms plus the viewer position and every light.
pub fn lit_uniforms(scene: &Scene) -> UniformSet {
    let mut set = camera_uniforms(scene);
    set.set_vec3("viewPos", &scene.view_position().coords);
    scene.lights.upload_to(&mut set);
    set
}

/// Small cube at a point light. The scene transform does not move the markers.
pub fn marker_model(position: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_translation(position) * Matrix4::new_scaling(MARKER_SCALE)
}
