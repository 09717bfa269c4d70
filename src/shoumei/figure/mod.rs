use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PerVertexParams {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}
glium::implement_vertex!(PerVertexParams, position, normal, tex_coords);

impl PerVertexParams {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, tex_coords: [f32; 2]) -> Self {
        PerVertexParams {
            position: [position.x, position.y, position.z],
            normal: [normal.x, normal.y, normal.z],
            tex_coords,
        }
    }
}

/// Texture coordinate window mapped onto every face of a cube.
///
/// Ranges wider than `0..1` make the sampler's wrap mode visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl TexRect {
    pub fn new(min_s: f32, min_t: f32, max_s: f32, max_t: f32) -> Self {
        TexRect {
            min: [min_s, min_t],
            max: [max_s, max_t],
        }
    }

    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Corners in counter-clockwise order starting at the bottom left.
    fn corners(&self) -> [[f32; 2]; 4] {
        [
            [self.min[0], self.min[1]],
            [self.max[0], self.min[1]],
            [self.max[0], self.max[1]],
            [self.min[0], self.max[1]],
        ]
    }
}

/// Indexed triangle list kept on the CPU until it is uploaded.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    pub vertices: Vec<PerVertexParams>,
    pub indices: Vec<u32>,
}

pub struct FigureBuilder {
    figure: Figure,
}

impl FigureBuilder {
    pub fn new() -> Self {
        FigureBuilder {
            figure: Figure::default(),
        }
    }

    /// Adds a flat quad. Corners go counter-clockwise when seen from the side `normal`
    /// points to.
    pub fn quad(mut self, normal: Vector3<f32>, corners: [Point3<f32>; 4], tex: TexRect) -> Self {
        let base = self.figure.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(tex.corners().iter()) {
            self.figure
                .vertices
                .push(PerVertexParams::new(*corner, normal, *uv));
        }
        self.figure
            .indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        self
    }

    pub fn vertex(mut self, vertex: PerVertexParams) -> Self {
        self.figure.vertices.push(vertex);
        self
    }

    pub fn triangle(mut self, a: u32, b: u32, c: u32) -> Self {
        self.figure.indices.extend_from_slice(&[a, b, c]);
        self
    }

    pub fn build(self) -> Figure {
        log::trace!(
            "built figure with {} vertices, {} triangles",
            self.figure.vertices.len(),
            self.figure.indices.len() / 3
        );
        self.figure
    }
}

impl Default for FigureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Cube spanning `0..1` on every axis, one quad per face so each face gets its own
    /// normal and the full `tex` window.
    pub fn unit_cube(tex: TexRect) -> Self {
        let p = |x: f32, y: f32, z: f32| Point3::new(x, y, z);

        FigureBuilder::new()
            // back
            .quad(
                Vector3::new(0.0, 0.0, -1.0),
                [p(1.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0)],
                tex,
            )
            // front
            .quad(
                Vector3::new(0.0, 0.0, 1.0),
                [p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0), p(1.0, 1.0, 1.0), p(0.0, 1.0, 1.0)],
                tex,
            )
            // left
            .quad(
                Vector3::new(-1.0, 0.0, 0.0),
                [p(0.0, 0.0, 0.0), p(0.0, 0.0, 1.0), p(0.0, 1.0, 1.0), p(0.0, 1.0, 0.0)],
                tex,
            )
            // right
            .quad(
                Vector3::new(1.0, 0.0, 0.0),
                [p(1.0, 0.0, 1.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(1.0, 1.0, 1.0)],
                tex,
            )
            // bottom
            .quad(
                Vector3::new(0.0, -1.0, 0.0),
                [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 0.0, 1.0), p(0.0, 0.0, 1.0)],
                tex,
            )
            // top
            .quad(
                Vector3::new(0.0, 1.0, 0.0),
                [p(0.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
                tex,
            )
            .build()
    }

    /// Latitude/longitude sphere centred at the origin.
    pub fn uv_sphere(radius: f32, sectors: u32, stacks: u32) -> Self {
        let sectors = sectors.max(3);
        let stacks = stacks.max(2);
        let sector_step = 2.0 * PI / sectors as f32;
        let stack_step = PI / stacks as f32;

        let mut builder = FigureBuilder::new();
        for i in 0..=stacks {
            let stack_angle = PI / 2.0 - i as f32 * stack_step;
            let xy = radius * stack_angle.cos();
            let z = radius * stack_angle.sin();
            for j in 0..=sectors {
                let sector_angle = j as f32 * sector_step;
                let position = Point3::new(xy * sector_angle.cos(), xy * sector_angle.sin(), z);
                let normal = position.coords / radius;
                let uv = [j as f32 / sectors as f32, i as f32 / stacks as f32];
                builder = builder.vertex(PerVertexParams::new(position, normal, uv));
            }
        }

        for i in 0..stacks {
            let mut k1 = i * (sectors + 1);
            let mut k2 = k1 + sectors + 1;
            for _ in 0..sectors {
                if i != 0 {
                    builder = builder.triangle(k1, k2, k1 + 1);
                }
                if i != stacks - 1 {
                    builder = builder.triangle(k1 + 1, k2, k2 + 1);
                }
                k1 += 1;
                k2 += 1;
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_has_one_quad_per_face() {
        let cube = Figure::unit_cube(TexRect::unit());

        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
    }

    #[test]
    fn unit_cube_spans_zero_to_one() {
        let cube = Figure::unit_cube(TexRect::unit());
        for v in &cube.vertices {
            for c in v.position.iter() {
                assert!(*c == 0.0 || *c == 1.0);
            }
        }
    }

    #[test]
    fn cube_faces_wind_towards_their_normal() {
        let cube = Figure::unit_cube(TexRect::unit());
        for tri in cube.indices.chunks(3) {
            let a = Vector3::from(cube.vertices[tri[0] as usize].position);
            let b = Vector3::from(cube.vertices[tri[1] as usize].position);
            let c = Vector3::from(cube.vertices[tri[2] as usize].position);
            let normal = Vector3::from(cube.vertices[tri[0] as usize].normal);

            let winding = (b - a).cross(&(c - a));
            assert!(winding.dot(&normal) > 0.0);
        }
    }

    #[test]
    fn tex_rect_reaches_every_face() {
        let cube = Figure::unit_cube(TexRect::new(0.0, 0.0, 2.0, 2.0));
        let max_uv = cube
            .vertices
            .iter()
            .filter(|v| v.tex_coords == [2.0, 2.0])
            .count();

        assert_eq!(max_uv, 6);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let sphere = Figure::uv_sphere(0.5, 36, 18);

        assert_eq!(sphere.vertices.len(), 37 * 19);
        assert_eq!(sphere.indices.len(), 6 * 36 * 17);
        for v in &sphere.vertices {
            let length = Vector3::from(v.position).norm();
            assert!((length - 0.5).abs() < 1e-5);
            assert!((Vector3::from(v.normal).norm() - 1.0).abs() < 1e-5);
        }
    }
}
