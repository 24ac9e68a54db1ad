use std::collections::HashSet;

use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::fly_camera::{CameraMovement, FlyCamera};

/// Maps winit input events onto fly-camera actions.
///
/// Movement keys are tracked as a held set and applied in [`update`] so
/// diagonal movement and key repeat both behave; look/zoom/projection
/// changes apply immediately.
///
/// [`update`]: CameraController::update
pub struct CameraController {
    held: HashSet<KeyCode>,
}

const MOVEMENT_BINDINGS: [(KeyCode, CameraMovement); 6] = [
    (KeyCode::KeyW, CameraMovement::Forward),
    (KeyCode::KeyS, CameraMovement::Backward),
    (KeyCode::KeyA, CameraMovement::Left),
    (KeyCode::KeyD, CameraMovement::Right),
    (KeyCode::KeyQ, CameraMovement::Up),
    (KeyCode::KeyE, CameraMovement::Down),
];

impl CameraController {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
        }
    }

    pub fn process_device_event(&mut self, event: &DeviceEvent, camera: &mut FlyCamera) {
        match event {
            DeviceEvent::MouseMotion { delta } => {
                // y is reversed: screen coordinates grow downward.
                camera.process_mouse(delta.0 as f32, -delta.1 as f32);
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.process_scroll(scroll_amount);
            }
            _ => (),
        }
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent, camera: &mut FlyCamera) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                if key_code == KeyCode::KeyP && !event.repeat {
                    camera.toggle_projection();
                }
                self.held.insert(key_code);
            }
            ElementState::Released => {
                self.held.remove(&key_code);
            }
        }
    }

    /// Applies every held movement key for this frame
    pub fn update(&mut self, delta_time: f32, camera: &mut FlyCamera) {
        for (key, movement) in MOVEMENT_BINDINGS {
            if self.held.contains(&key) {
                camera.process_movement(movement, delta_time);
            }
        }
    }

    /// Returns true if any movement key is currently held
    pub fn is_moving(&self) -> bool {
        MOVEMENT_BINDINGS.iter().any(|(key, _)| self.held.contains(key))
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    #[test]
    fn update_moves_the_camera_for_held_keys() {
        let mut controller = CameraController::new();
        controller.held.insert(KeyCode::KeyW);
        let mut camera = FlyCamera::new(Point3::new(0.0, 0.0, 3.0), 1.0);
        let before = camera.position;
        controller.update(0.5, &mut camera);
        assert!(camera.position.z < before.z);
        assert!(controller.is_moving());
    }

    #[test]
    fn update_without_held_keys_is_a_no_op() {
        let mut controller = CameraController::new();
        let mut camera = FlyCamera::new(Point3::new(0.0, 0.0, 3.0), 1.0);
        let before = camera.position;
        controller.update(0.5, &mut camera);
        assert_eq!(camera.position, before);
        assert!(!controller.is_moving());
    }
}
