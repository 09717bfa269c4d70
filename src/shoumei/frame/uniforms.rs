use crate::frame::texture::{TextureHandle, TextureStore};
use glium::uniforms::{UniformValue, Uniforms};
use nalgebra::{Matrix4, Vector3};
use std::collections::HashMap;

/// Named uniform slots of a shader program, written by value type.
///
/// Writing the same name twice keeps the last value. Names that the program does not
/// declare are silently ignored once the set is bound for drawing.
pub trait UniformSink {
    fn set_float(&mut self, name: &str, value: f32);

    fn set_vec3(&mut self, name: &str, value: &Vector3<f32>);

    fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>);

    fn set_texture(&mut self, name: &str, texture: TextureHandle);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformEntry {
    Float(f32),
    Vec3([f32; 3]),
    Mat4([[f32; 4]; 4]),
    Texture(TextureHandle),
}

/// Host-side copy of every uniform a draw call needs.
#[derive(Debug, Clone, Default)]
pub struct UniformSet {
    entries: HashMap<String, UniformEntry>,
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&UniformEntry> {
        self.entries.get(name)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.entries.get(name) {
            Some(UniformEntry::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vector3<f32>> {
        match self.entries.get(name) {
            Some(UniformEntry::Vec3(v)) => Some(Vector3::new(v[0], v[1], v[2])),
            _ => None,
        }
    }

    pub fn mat4(&self, name: &str) -> Option<Matrix4<f32>> {
        match self.entries.get(name) {
            Some(UniformEntry::Mat4(m)) => Some(Matrix4::from(*m)),
            _ => None,
        }
    }

    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        match self.entries.get(name) {
            Some(UniformEntry::Texture(handle)) => Some(*handle),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs the set with the textures its sampler entries refer to.
    pub fn bind<'a>(&'a self, textures: &'a TextureStore) -> BoundUniforms<'a> {
        BoundUniforms {
            set: self,
            textures,
        }
    }

    fn put(&mut self, name: &str, entry: UniformEntry) {
        match self.entries.get_mut(name) {
            Some(slot) => *slot = entry,
            None => {
                self.entries.insert(name.to_owned(), entry);
            }
        }
    }
}

impl UniformSink for UniformSet {
    fn set_float(&mut self, name: &str, value: f32) {
        self.put(name, UniformEntry::Float(value));
    }

    fn set_vec3(&mut self, name: &str, value: &Vector3<f32>) {
        self.put(name, UniformEntry::Vec3([value.x, value.y, value.z]));
    }

    fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>) {
        self.put(name, UniformEntry::Mat4((*value).into()));
    }

    fn set_texture(&mut self, name: &str, texture: TextureHandle) {
        self.put(name, UniformEntry::Texture(texture));
    }
}

pub struct BoundUniforms<'a> {
    set: &'a UniformSet,
    textures: &'a TextureStore,
}

impl Uniforms for BoundUniforms<'_> {
    fn visit_values<'a, F: FnMut(&str, UniformValue<'a>)>(&'a self, mut output: F) {
        for (name, entry) in self.set.entries.iter() {
            let value = match *entry {
                UniformEntry::Float(v) => UniformValue::Float(v),
                UniformEntry::Vec3(v) => UniformValue::Vec3(v),
                UniformEntry::Mat4(m) => UniformValue::Mat4(m),
                // Unbound samplers are left to the driver's default texture.
                UniformEntry::Texture(handle) => match self.textures.get(handle) {
                    Some((texture, behavior)) => UniformValue::Texture2d(texture, Some(behavior)),
                    None => continue,
                },
            };
            output(name.as_str(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut set = UniformSet::new();
        set.set_vec3("viewPos", &Vector3::new(1.0, 2.0, 3.0));
        set.set_vec3("viewPos", &Vector3::new(4.0, 5.0, 6.0));

        assert_eq!(set.len(), 1);
        assert_eq!(set.vec3("viewPos"), Some(Vector3::new(4.0, 5.0, 6.0)));
    }

    #[test]
    fn typed_getters_reject_other_types() {
        let mut set = UniformSet::new();
        set.set_float("material.shininess", 32.0);

        assert_eq!(set.float("material.shininess"), Some(32.0));
        assert_eq!(set.vec3("material.shininess"), None);
        assert_eq!(set.mat4("material.shininess"), None);
    }

    #[test]
    fn matrices_keep_column_major_layout() {
        let mut set = UniformSet::new();
        let m = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        set.set_mat4("model", &m);

        match set.get("model") {
            Some(UniformEntry::Mat4(raw)) => assert_eq!(raw[3], [1.0, 2.0, 3.0, 1.0]),
            other => panic!("unexpected entry {:?}", other),
        }
        assert_eq!(set.mat4("model"), Some(m));
    }

    #[test]
    fn unbound_textures_are_skipped_when_visiting() {
        let mut textures = TextureStore::new();
        let handle = textures.push_unbound("missing.png", Default::default());

        let mut set = UniformSet::new();
        set.set_texture("material.diffuse", handle);
        set.set_float("material.shininess", 32.0);

        let mut seen = Vec::new();
        set.bind(&textures)
            .visit_values(|name, _| seen.push(name.to_owned()));

        assert_eq!(seen, vec!["material.shininess".to_owned()]);
    }
}
