use crate::figure::{Figure, PerVertexParams};
use crate::frame::shader::Shader;
use crate::frame::texture::TextureStore;
use crate::frame::uniforms::{UniformSet, UniformSink};
use crate::scene::material::{Material, MaterialMaps};
use glium::backend::Facade;
use glium::index::{IndexBuffer, PrimitiveType};
use glium::vertex::VertexBuffer;
use glium::{DrawError, DrawParameters, Surface};
use nalgebra::{Matrix4, Vector3};
use std::fmt;

#[derive(Debug)]
pub enum MeshError {
    Vertices(glium::vertex::BufferCreationError),
    Indices(glium::index::BufferCreationError),
}

impl From<glium::vertex::BufferCreationError> for MeshError {
    fn from(err: glium::vertex::BufferCreationError) -> Self {
        MeshError::Vertices(err)
    }
}

impl From<glium::index::BufferCreationError> for MeshError {
    fn from(err: glium::index::BufferCreationError) -> Self {
        MeshError::Indices(err)
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Vertices(err) => write!(f, "vertex buffer: {:?}", err),
            MeshError::Indices(err) => write!(f, "index buffer: {:?}", err),
        }
    }
}

impl std::error::Error for MeshError {}

/// A `Figure` living in GPU buffers.
pub struct Mesh {
    vertices: VertexBuffer<PerVertexParams>,
    indices: IndexBuffer<u32>,
}

impl Mesh {
    pub fn upload<F: Facade + ?Sized>(facade: &F, figure: &Figure) -> Result<Self, MeshError> {
        let vertices = VertexBuffer::new(facade, &figure.vertices)?;
        let indices = IndexBuffer::new(facade, PrimitiveType::TrianglesList, &figure.indices)?;
        Ok(Mesh { vertices, indices })
    }
}

/// Everything a shape needs to issue one draw call into a frame.
pub struct DrawPass<'f, S: Surface> {
    pub target: &'f mut S,
    pub shader: &'f Shader,
    /// Per-program uniforms shared by every object: lights, camera, view position.
    pub uniforms: &'f UniformSet,
    pub textures: &'f TextureStore,
    pub params: &'f DrawParameters<'f>,
}

impl<S: Surface> DrawPass<'_, S> {
    fn submit(&mut self, mesh: &Mesh, uniforms: &UniformSet) -> Result<(), DrawError> {
        self.target.draw(
            &mesh.vertices,
            &mesh.indices,
            &self.shader.program,
            &uniforms.bind(self.textures),
            self.params,
        )
    }
}

/// A drawable object: geometry plus the material it is shaded with.
pub struct Shape {
    mesh: Mesh,
    pub material: Material,
    pub maps: Option<MaterialMaps>,
}

impl Shape {
    pub fn new(mesh: Mesh) -> Self {
        log::trace!("instance of {}", std::any::type_name::<Self>());
        Shape {
            mesh,
            material: Material::default(),
            maps: None,
        }
    }

    pub fn with_maps(mut self, maps: MaterialMaps) -> Self {
        self.maps = Some(maps);
        self
    }

    pub fn set_material(&mut self, diffuse: Vector3<f32>, specular: Vector3<f32>, shininess: f32) {
        self.material = Material::new(diffuse, specular, shininess);
    }

    /// Lit draw with the flat material.
    pub fn draw<S: Surface>(&self, pass: &mut DrawPass<'_, S>, model: &Matrix4<f32>) -> Result<(), DrawError> {
        let uniforms = object_uniforms(pass.uniforms, model, |set| self.material.upload_to(set));
        pass.submit(&self.mesh, &uniforms)
    }

    /// Lit draw sampling diffuse and specular from the material maps. Falls back to the flat
    /// material when the shape has none.
    pub fn draw_with_texture<S: Surface>(
        &self,
        pass: &mut DrawPass<'_, S>,
        model: &Matrix4<f32>,
    ) -> Result<(), DrawError> {
        let uniforms = object_uniforms(pass.uniforms, model, |set| match &self.maps {
            Some(maps) => maps.upload_to(set),
            None => self.material.upload_to(set),
        });
        pass.submit(&self.mesh, &uniforms)
    }

    /// Unlit draw in a single colour.
    pub fn draw_flat<S: Surface>(
        &self,
        pass: &mut DrawPass<'_, S>,
        model: &Matrix4<f32>,
        color: &Vector3<f32>,
    ) -> Result<(), DrawError> {
        let uniforms = object_uniforms(pass.uniforms, model, |set| set.set_vec3("color", color));
        pass.submit(&self.mesh, &uniforms)
    }
}

/// Per-object copy of the shared uniforms with the model matrix and material added.
fn object_uniforms(
    shared: &UniformSet,
    model: &Matrix4<f32>,
    material: impl FnOnce(&mut UniformSet),
) -> UniformSet {
    let mut set = shared.clone();
    set.set_mat4("model", model);
    material(&mut set);
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::texture::Sampling;

    fn shared() -> UniformSet {
        let mut set = UniformSet::new();
        set.set_vec3("viewPos", &Vector3::new(0.0, 1.1, 5.2));
        set
    }

    #[test]
    fn object_uniforms_keep_shared_values() {
        let model = Matrix4::new_translation(&Vector3::new(1.7, 1.2, 0.5));
        let material = Material::new(Vector3::new(1.0, 0.647, 0.0), Vector3::repeat(0.5), 32.0);
        let set = object_uniforms(&shared(), &model, |set| material.upload_to(set));

        assert_eq!(set.vec3("viewPos"), Some(Vector3::new(0.0, 1.1, 5.2)));
        assert_eq!(set.mat4("model"), Some(model));
        assert_eq!(set.vec3("material.diffuse"), Some(Vector3::new(1.0, 0.647, 0.0)));
    }

    #[test]
    fn material_of_one_object_does_not_leak_into_shared_set() {
        let base = shared();
        let mut store = TextureStore::new();
        let maps = MaterialMaps::new(
            store.push_unbound("container2.png", Sampling::default()),
            store.push_unbound("container2_specular.png", Sampling::default()),
            32.0,
        );
        let set = object_uniforms(&base, &Matrix4::identity(), |set| maps.upload_to(set));

        assert_eq!(set.texture("material.diffuse"), Some(maps.diffuse));
        assert!(!base.contains("material.diffuse"));
        assert!(!base.contains("model"));
    }
}
