use crate::frame::texture::TextureHandle;
use crate::frame::uniforms::UniformSink;
use nalgebra::Vector3;

/// Flat Phong material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    /// Ambient reflectance follows the diffuse colour.
    pub fn new(diffuse: Vector3<f32>, specular: Vector3<f32>, shininess: f32) -> Self {
        Material {
            ambient: diffuse,
            diffuse,
            specular,
            shininess,
        }
    }

    pub fn upload_to<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        sink.set_vec3("material.ambient", &self.ambient);
        sink.set_vec3("material.diffuse", &self.diffuse);
        sink.set_vec3("material.specular", &self.specular);
        sink.set_float("material.shininess", self.shininess);
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vector3::repeat(1.0), Vector3::repeat(0.5), 32.0)
    }
}

/// Material whose diffuse and specular reflectance come from textures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialMaps {
    pub diffuse: TextureHandle,
    pub specular: TextureHandle,
    pub shininess: f32,
}

impl MaterialMaps {
    pub fn new(diffuse: TextureHandle, specular: TextureHandle, shininess: f32) -> Self {
        MaterialMaps {
            diffuse,
            specular,
            shininess,
        }
    }

    pub fn upload_to<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        sink.set_texture("material.diffuse", self.diffuse);
        sink.set_texture("material.specular", self.specular);
        sink.set_float("material.shininess", self.shininess);
    }
}
