use cgmath::{Matrix4, SquareMatrix};
use winit::event::{DeviceEvent, KeyEvent};

use super::{camera_controller::CameraController, fly_camera::FlyCamera};

/// Binds the fly camera to its input controller.
pub struct CameraManager {
    pub camera: FlyCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: FlyCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Routes raw device events (mouse motion, scroll) to the camera
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        self.controller.process_device_event(event, &mut self.camera);
    }

    /// Routes keyboard events (movement keys, projection toggle)
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.controller.process_keyboard_event(event, &mut self.camera);
    }

    /// Applies held movement keys, scaled by the frame's delta time
    pub fn update(&mut self, delta_time: f32) {
        self.controller.update(delta_time, &mut self.camera);
    }
}

pub trait Camera: Sized {
    fn view_matrix(&self) -> Matrix4<f32>;
    fn projection_matrix(&self) -> Matrix4<f32>;
}

/// Camera state snapshot consumed by the global uniform buffer.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment
    /// requirement.
    pub view_position: [f32; 4],

    /// World-to-camera matrix
    pub view: [[f32; 4]; 4],

    /// Camera-to-clip matrix (wgpu depth range)
    pub projection: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view: convert_matrix4_to_array(Matrix4::identity()),
            projection: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}
