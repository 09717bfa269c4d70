extern crate nalgebra_glm as glm;

use crate::frame::uniforms::UniformSink;
use nalgebra::{Matrix4, Point3, Vector3};

pub trait ViewAndProject {
    fn view_m(&self) -> Matrix4<f32>;

    fn proj_m(&self) -> Matrix4<f32>;

    /// World-space position of the viewer.
    fn eye(&self) -> Point3<f32>;

    fn update_ar(&mut self, aspect_ratio: f32);

    /// Vertical field of view in degrees.
    fn update_fov(&mut self, fov: f32);

    fn upload_to(&self, sink: &mut dyn UniformSink) {
        sink.set_mat4("projection", &self.proj_m());
        sink.set_mat4("view", &self.view_m());
    }
}

fn calculate_view_m(eye: &Point3<f32>, dest: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
    glm::look_at(&eye.coords, &dest.coords, up)
}

/// Perspective parameters shared by both cameras.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Lens {
    /// Degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near_plane_dist: f32,
    pub far_plane_dist: f32,
}

impl Lens {
    pub fn new(fov: f32, aspect_ratio: f32) -> Self {
        Lens {
            fov,
            aspect_ratio,
            near_plane_dist: 0.1,
            far_plane_dist: 100.0,
        }
    }

    pub fn proj_m(&self) -> Matrix4<f32> {
        glm::perspective(
            self.aspect_ratio,
            self.fov.to_radians(),
            self.near_plane_dist,
            self.far_plane_dist,
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
pub const SPEED: f32 = 2.5;
pub const SENSITIVITY: f32 = 0.1;
pub const ZOOM: f32 = 45.0;

/// Free-look camera steered by WASD and the mouse.
///
/// The mouse wheel drives `zoom`, which is also the field of view of the projection.
#[derive(Debug, Copy, Clone)]
pub struct FlyCamera {
    position: Point3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    /// Degrees.
    yaw: f32,
    /// Degrees.
    pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    zoom: f32,
    lens: Lens,
}

impl FlyCamera {
    pub fn new(position: Point3<f32>, aspect_ratio: f32) -> Self {
        log::trace!("instance of {}", std::any::type_name::<Self>());
        let mut camera = FlyCamera {
            position,
            front: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::y(),
            right: Vector3::x(),
            world_up: Vector3::y(),
            yaw: YAW,
            pitch: PITCH,
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            zoom: ZOOM,
            lens: Lens::new(ZOOM, aspect_ratio),
        };
        camera.update_vectors();
        camera
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn process_keyboard(&mut self, direction: Movement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Left => self.position -= self.right * velocity,
            Movement::Right => self.position += self.right * velocity,
        }
    }

    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch = (self.pitch + y_offset * self.mouse_sensitivity).clamp(-89.0, 89.0);
        self.update_vectors();
    }

    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(1.0, 45.0);
        self.lens.fov = self.zoom;
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

impl ViewAndProject for FlyCamera {
    fn view_m(&self) -> Matrix4<f32> {
        calculate_view_m(&self.position, &(self.position + self.front), &self.up)
    }

    fn proj_m(&self) -> Matrix4<f32> {
        self.lens.proj_m()
    }

    fn eye(&self) -> Point3<f32> {
        self.position
    }

    fn update_ar(&mut self, aspect_ratio: f32) {
        self.lens.aspect_ratio = aspect_ratio;
    }

    fn update_fov(&mut self, fov: f32) {
        self.zoom = fov.clamp(1.0, 45.0);
        self.lens.fov = self.zoom;
    }
}

/// Camera defined by an eye point, a target and an up vector.
#[derive(Debug, Copy, Clone)]
pub struct LookAtCamera {
    eye: Point3<f32>,
    look_at: Point3<f32>,
    up: Vector3<f32>,
    view_m: Matrix4<f32>,
    lens: Lens,
}

impl LookAtCamera {
    pub fn new(eye: Point3<f32>, look_at: Point3<f32>, up: Vector3<f32>, aspect_ratio: f32) -> Self {
        log::trace!("instance of {}", std::any::type_name::<Self>());
        LookAtCamera {
            eye,
            look_at,
            up,
            view_m: calculate_view_m(&eye, &look_at, &up),
            lens: Lens::new(ZOOM, aspect_ratio),
        }
    }

    pub fn change_eye(&mut self, eye: Point3<f32>) {
        self.eye = eye;
        self.view_m = calculate_view_m(&self.eye, &self.look_at, &self.up);
    }
}

impl ViewAndProject for LookAtCamera {
    fn view_m(&self) -> Matrix4<f32> {
        self.view_m
    }

    fn proj_m(&self) -> Matrix4<f32> {
        self.lens.proj_m()
    }

    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn update_ar(&mut self, aspect_ratio: f32) {
        self.lens.aspect_ratio = aspect_ratio;
    }

    fn update_fov(&mut self, fov: f32) {
        self.lens.fov = fov;
    }
}
