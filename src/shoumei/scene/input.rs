use crate::scene::camera::Movement;
use crate::scene::lights::Channel;
use crate::scene::rig::LightGroup;
use crate::scene::transform::Axis;
use crate::scene::Scene;
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Per-frame translation and scale step.
const NUDGE: f32 = 0.01;
/// Degrees per frame.
const TURN: f32 = 1.0;
/// Units per second for the auxiliary eye.
const EYE_SPEED: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Effect of a key that keeps acting while held.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Held {
    Move(Movement),
    Rotate(Axis),
    RotateBack,
    Translate(Axis, f32),
    Scale(Axis, f32),
    Eye(Axis, f32),
}

/// Held keys in the order their effects are applied.
const HELD_KEYS: [(KeyCode, Held); 26] = [
    (KeyCode::KeyW, Held::Move(Movement::Forward)),
    (KeyCode::KeyS, Held::Move(Movement::Backward)),
    (KeyCode::KeyA, Held::Move(Movement::Left)),
    (KeyCode::KeyD, Held::Move(Movement::Right)),
    (KeyCode::KeyR, Held::RotateBack),
    (KeyCode::KeyX, Held::Rotate(Axis::X)),
    (KeyCode::KeyY, Held::Rotate(Axis::Y)),
    (KeyCode::KeyZ, Held::Rotate(Axis::Z)),
    (KeyCode::KeyI, Held::Translate(Axis::Y, NUDGE)),
    (KeyCode::KeyK, Held::Translate(Axis::Y, -NUDGE)),
    (KeyCode::KeyL, Held::Translate(Axis::X, NUDGE)),
    (KeyCode::KeyJ, Held::Translate(Axis::X, -NUDGE)),
    (KeyCode::KeyO, Held::Translate(Axis::Z, NUDGE)),
    (KeyCode::KeyP, Held::Translate(Axis::Z, -NUDGE)),
    (KeyCode::KeyC, Held::Scale(Axis::X, NUDGE)),
    (KeyCode::KeyV, Held::Scale(Axis::X, -NUDGE)),
    (KeyCode::KeyB, Held::Scale(Axis::Y, NUDGE)),
    (KeyCode::KeyN, Held::Scale(Axis::Y, -NUDGE)),
    (KeyCode::KeyM, Held::Scale(Axis::Z, NUDGE)),
    (KeyCode::KeyU, Held::Scale(Axis::Z, -NUDGE)),
    (KeyCode::KeyH, Held::Eye(Axis::X, EYE_SPEED)),
    (KeyCode::KeyF, Held::Eye(Axis::X, -EYE_SPEED)),
    (KeyCode::KeyQ, Held::Eye(Axis::Y, EYE_SPEED)),
    (KeyCode::KeyE, Held::Eye(Axis::Y, -EYE_SPEED)),
    (KeyCode::KeyT, Held::Eye(Axis::Z, EYE_SPEED)),
    (KeyCode::KeyG, Held::Eye(Axis::Z, -EYE_SPEED)),
];

/// Keyboard and cursor state between frames.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
    cursor: Option<(f32, f32)>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// Records a key transition. Switches fire once per press; auto-repeat is ignored.
    pub fn key_event(&mut self, scene: &mut Scene, code: KeyCode, pressed: bool, repeat: bool) -> Flow {
        if !pressed {
            self.held.remove(&code);
            return Flow::Continue;
        }
        self.held.insert(code);
        if repeat {
            return Flow::Continue;
        }

        match code {
            KeyCode::Escape => return Flow::Exit,
            KeyCode::Digit1 => scene.lights.toggle_group(LightGroup::Directional),
            KeyCode::Digit2 => scene.lights.toggle_group(LightGroup::Point),
            KeyCode::Digit3 => scene.lights.toggle_group(LightGroup::Spot),
            KeyCode::Digit4 => scene.lights.toggle_channel(Channel::Ambient),
            KeyCode::Digit5 => scene.lights.toggle_channel(Channel::Diffuse),
            KeyCode::Digit6 => scene.lights.toggle_channel(Channel::Specular),
            KeyCode::Tab => scene.switch_view(),
            _ => {}
        }
        Flow::Continue
    }

    /// Applies every held key once.
    pub fn apply_held(&self, scene: &mut Scene, delta_time: f32) {
        for (code, effect) in HELD_KEYS.iter() {
            if !self.held.contains(code) {
                continue;
            }
            match *effect {
                Held::Move(movement) => scene.camera.process_keyboard(movement, delta_time),
                Held::Rotate(axis) => scene.transform.rotate(axis, TURN),
                Held::RotateBack => scene.transform.rotate_selected(-TURN),
                Held::Translate(axis, step) => scene.transform.translate(axis, step),
                Held::Scale(axis, step) => scene.transform.grow(axis, step),
                Held::Eye(axis, speed) => scene.move_eye(axis, speed * delta_time),
            }
        }
    }

    /// The first sample only anchors the cursor.
    pub fn cursor_moved(&mut self, scene: &mut Scene, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.cursor {
            scene.camera.process_mouse_movement(x - last_x, last_y - y);
        }
        self.cursor = Some((x, y));
    }

    pub fn scrolled(&mut self, scene: &mut Scene, y_offset: f32) {
        scene.camera.process_mouse_scroll(y_offset);
    }

    /// Drops held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::camera::ViewAndProject;
    use nalgebra::Vector3;

    fn press(input: &mut InputState, scene: &mut Scene, code: KeyCode) -> Flow {
        input.key_event(scene, code, true, false)
    }

    #[test]
    fn holding_eye_key_accumulates_per_frame() {
        let mut scene = Scene::lab(800, 600);
        let mut input = InputState::new();
        let start = scene.eye_camera.eye();

        press(&mut input, &mut scene, KeyCode::KeyH);
        for _ in 0..10 {
            input.apply_held(&mut scene, 0.016);
        }

        let moved = scene.eye_camera.eye().x - start.x;
        assert!((moved - 10.0 * 2.5 * 0.016).abs() < 1e-5);
        assert_eq!(scene.eye_camera.eye().y, start.y);
    }

    #[test]
    fn released_key_stops_acting() {
        let mut scene = Scene::lab(800, 600);
        let mut input = InputState::new();

        press(&mut input, &mut scene, KeyCode::KeyI);
        input.apply_held(&mut scene, 0.016);
        input.key_event(&mut scene, KeyCode::KeyI, false, false);
        input.apply_held(&mut scene, 0.016);

        assert!(!input.is_held(KeyCode::KeyI));
        assert_eq!(scene.transform.translation, Vector3::new(0.0, NUDGE, 0.0));
    }

    #[test]
    fn rotation_key_selects_axis() {
        let mut scene = Scene::lab(800, 600);
        let mut input = InputState::new();

        press(&mut input, &mut scene, KeyCode::KeyX);
        input.apply_held(&mut scene, 0.016);
        input.key_event(&mut scene, KeyCode::KeyX, false, false);
        press(&mut input, &mut scene, KeyCode::KeyR);
        input.apply_held(&mut scene, 0.016);
        input.apply_held(&mut scene, 0.016);

        assert_eq!(scene.transform.axis, Axis::X);
        assert_eq!(scene.transform.rotation.x, -1.0);
    }

    #[test]
    fn reverse_rotation_applies_before_axis_keys() {
        let mut scene = Scene::lab(800, 600);
        let mut input = InputState::new();
        assert_eq!(scene.transform.axis, Axis::Z);

        press(&mut input, &mut scene, KeyCode::KeyX);
        press(&mut input, &mut scene, KeyCode::KeyR);
        input.apply_held(&mut scene, 0.016);

        assert_eq!(scene.transform.rotation.z, -1.0);
        assert_eq!(scene.transform.rotation.x, 1.0);
        assert_eq!(scene.transform.axis, Axis::X);
    }

    #[test]
    fn toggles_ignore_auto_repeat() {
        let mut scene = Scene::lab(800, 600);
        let mut input = InputState::new();

        press(&mut input, &mut scene, KeyCode::Digit2);
        input.key_event(&mut scene, KeyCode::Digit2, true, true);
        input.key_event(&mut scene, KeyCode::Digit2, true, true);
        input.apply_held(&mut scene, 0.016);

        assert!(!scene.lights.is_group_on(LightGroup::Point));
    }

    #[test]
    fn channel_keys_reach_the_rig() {
        let mut scene = Scene::lab(800, 600);
        let mut input = InputState::new();

        press(&mut input, &mut scene, KeyCode::Digit6);

        assert!(!scene.lights.is_channel_on(Channel::Specular));
        assert!(scene.lights.is_channel_on(Channel::Ambient));
    }

    #[test]
    fn escape_requests_exit() {
        let mut scene = Scene::lab(800, 600);
        let mut input = InputState::new();

        assert_eq!(press(&mut input, &mut scene, KeyCode::KeyW), Flow::Continue);
        assert_eq!(press(&mut input, &mut scene, KeyCode::Escape), Flow::Exit);
    }

    #[test]
    fn first_cursor_sample_only_anchors() {
        let mut scene = Scene::lab(800, 600);
        let mut input = InputState::new();
        let yaw = scene.camera.yaw();

        input.cursor_moved(&mut scene, 400.0, 300.0);
        assert_eq!(scene.camera.yaw(), yaw);

        input.cursor_moved(&mut scene, 410.0, 290.0);
        assert!((scene.camera.yaw() - (yaw + 1.0)).abs() < 1e-4);
        assert!((scene.camera.pitch() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn scroll_zooms_in() {
        let mut scene = Scene::lab(800, 600);
        let mut input = InputState::new();

        input.scrolled(&mut scene, 5.0);

        assert_eq!(scene.camera.zoom(), 40.0);
    }
}
