pub mod camera;
pub mod input;
pub mod lights;
pub mod material;
pub mod rig;
pub mod transform;

use crate::scene::camera::{FlyCamera, LookAtCamera, ViewAndProject};
use crate::scene::rig::LightRig;
use crate::scene::transform::{Axis, TransformState};
use nalgebra::{Point3, Vector3};
use std::str::FromStr;

/// Offsets of the six container cubes from the scene origin.
pub const CONTAINER_OFFSETS: [[f32; 3]; 6] = [
    [-1.5, 1.2, 0.5],
    [-0.3, 1.2, 0.5],
    [-1.5, 0.0, 0.5],
    [-0.3, 0.0, 0.5],
    [-1.5, -1.2, 0.5],
    [-0.3, -1.2, 0.5],
];

pub const SPHERE_OFFSET: [f32; 3] = [1.7, 1.2, 0.5];

pub const MARKER_SCALE: f32 = 0.2;

const FLY_START: [f32; 3] = [0.0, 1.1, 5.2];
const EYE_START: [f32; 3] = [0.0, 1.0, 3.0];

/// Camera the frame is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Fly,
    Eye,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fly" => Ok(ViewMode::Fly),
            "eye" => Ok(ViewMode::Eye),
            other => Err(format!("unknown view `{}`", other)),
        }
    }
}

/// Everything the input handlers mutate and the renderer reads.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: FlyCamera,
    pub eye_camera: LookAtCamera,
    pub view: ViewMode,
    pub lights: LightRig,
    pub transform: TransformState,
}

impl Scene {
    pub fn lab(width: u32, height: u32) -> Self {
        let aspect_ratio = aspect_ratio(width, height);
        Scene {
            camera: FlyCamera::new(Point3::from(FLY_START), aspect_ratio),
            eye_camera: LookAtCamera::new(
                Point3::from(EYE_START),
                Point3::origin(),
                Vector3::y(),
                aspect_ratio,
            ),
            view: ViewMode::Fly,
            lights: LightRig::lab(),
            transform: TransformState::default(),
        }
    }

    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    pub fn active_camera(&self) -> &dyn ViewAndProject {
        match self.view {
            ViewMode::Fly => &self.camera,
            ViewMode::Eye => &self.eye_camera,
        }
    }

    pub fn view_position(&self) -> Point3<f32> {
        self.active_camera().eye()
    }

    pub fn switch_view(&mut self) {
        self.view = match self.view {
            ViewMode::Fly => ViewMode::Eye,
            ViewMode::Eye => ViewMode::Fly,
        };
        log::info!("Viewing through {:?} camera", self.view);
    }

    pub fn update_ar(&mut self, width: u32, height: u32) {
        let aspect_ratio = aspect_ratio(width, height);
        self.camera.update_ar(aspect_ratio);
        self.eye_camera.update_ar(aspect_ratio);
    }

    pub fn move_eye(&mut self, axis: Axis, delta: f32) {
        let mut eye = self.eye_camera.eye();
        eye.coords[axis.index()] += delta;
        self.eye_camera.change_eye(eye);
    }

    /// Puts the spot light at the fly camera, pointing where it looks.
    pub fn sync_flashlight(&mut self) {
        let (position, front) = (self.camera.position(), self.camera.front());
        self.lights.follow(position.coords, front);
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}
