extern crate nalgebra_glm as glm;

use nalgebra::{Matrix4, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

/// Rotation (degrees), translation and scale applied to the whole scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub rotation: Vector3<f32>,
    /// Axis the last rotation key selected.
    pub axis: Axis,
    pub translation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for TransformState {
    fn default() -> Self {
        TransformState {
            rotation: Vector3::zeros(),
            axis: Axis::Z,
            translation: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
        }
    }
}

impl TransformState {
    /// Selects `axis` and turns around it.
    pub fn rotate(&mut self, axis: Axis, degrees: f32) {
        self.axis = axis;
        self.rotation[axis.index()] += degrees;
    }

    pub fn rotate_selected(&mut self, degrees: f32) {
        self.rotation[self.axis.index()] += degrees;
    }

    pub fn translate(&mut self, axis: Axis, delta: f32) {
        self.translation[axis.index()] += delta;
    }

    pub fn grow(&mut self, axis: Axis, delta: f32) {
        self.scale[axis.index()] += delta;
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        compose(
            &self.translation,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            &self.scale,
        )
    }
}

/// `T(t) · Rx(rx) · Ry(ry) · Rz(rz) · S(s)`, angles in degrees.
pub fn compose(
    translation: &Vector3<f32>,
    rx: f32,
    ry: f32,
    rz: f32,
    scale: &Vector3<f32>,
) -> Matrix4<f32> {
    let identity = Matrix4::identity();
    let translate_m = glm::translate(&identity, translation);
    let rotate_x_m = glm::rotate(&identity, rx.to_radians(), &Axis::X.unit());
    let rotate_y_m = glm::rotate(&identity, ry.to_radians(), &Axis::Y.unit());
    let rotate_z_m = glm::rotate(&identity, rz.to_radians(), &Axis::Z.unit());
    let scale_m = glm::scale(&identity, scale);

    translate_m * rotate_x_m * rotate_y_m * rotate_z_m * scale_m
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Rotation3};

    fn close(a: &Matrix4<f32>, b: &Matrix4<f32>) -> bool {
        (a - b).abs().max() < 1e-5
    }

    #[test]
    fn default_state_is_identity() {
        assert!(close(
            &TransformState::default().model_matrix(),
            &Matrix4::identity()
        ));
    }

    #[test]
    fn compose_applies_fixed_order() {
        let t = Vector3::new(0.5, -1.0, 2.0);
        let s = Vector3::new(2.0, 1.0, 0.5);
        let (rx, ry, rz) = (30.0f32, 45.0f32, 60.0f32);

        let expected = Matrix4::new_translation(&t)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), rx.to_radians()).to_homogeneous()
            * Rotation3::from_axis_angle(&Vector3::y_axis(), ry.to_radians()).to_homogeneous()
            * Rotation3::from_axis_angle(&Vector3::z_axis(), rz.to_radians()).to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&s);

        assert!(close(&compose(&t, rx, ry, rz, &s), &expected));
    }

    #[test]
    fn scale_happens_before_translation() {
        let m = compose(
            &Vector3::new(1.0, 0.0, 0.0),
            0.0,
            0.0,
            0.0,
            &Vector3::repeat(2.0),
        );
        let moved = m.transform_point(&Point3::new(1.0, 0.0, 0.0));

        assert!((moved - Point3::new(3.0, 0.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn rotation_order_is_not_commutative() {
        let xy = compose(&Vector3::zeros(), 90.0, 90.0, 0.0, &Vector3::repeat(1.0));
        let p = xy.transform_point(&Point3::new(0.0, 0.0, 1.0));

        // Ry first sends +Z to +X, Rx then leaves +X alone.
        assert!((p - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn rotate_selects_axis_and_rotate_selected_reverses() {
        let mut state = TransformState::default();
        state.rotate(Axis::Y, 1.0);
        state.rotate(Axis::Y, 1.0);
        state.rotate_selected(-1.0);

        assert_eq!(state.axis, Axis::Y);
        assert_eq!(state.rotation, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn translate_and_grow_touch_one_axis() {
        let mut state = TransformState::default();
        state.translate(Axis::Z, 0.01);
        state.grow(Axis::X, -0.01);

        assert_eq!(state.translation, Vector3::new(0.0, 0.0, 0.01));
        assert_eq!(state.scale, Vector3::new(0.99, 1.0, 1.0));
    }
}
