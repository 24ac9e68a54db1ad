use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Movement directions a key press maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Projection mode. The orthographic variant is a fixed front view of the
/// scene, not a projected version of the fly position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

/// First-person fly camera.
///
/// Yaw/pitch define the view direction; WASDQE-style movement translates
/// the position along the view basis. Scroll narrows or widens the field
/// of view.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Point3<f32>,
    pub yaw: Deg<f32>,
    pub pitch: Deg<f32>,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Field of view in degrees, adjusted by the scroll wheel
    pub zoom: f32,
    pub projection_mode: ProjectionMode,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);
const PITCH_LIMIT: f32 = 89.0;
const ORTHO_EXTENT: f32 = 10.0;

impl Camera for FlyCamera {
    fn view_matrix(&self) -> Matrix4<f32> {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                Matrix4::look_to_rh(self.position, self.front(), WORLD_UP)
            }
            // Fixed front view: looking down -Z from just in front of the scene.
            ProjectionMode::Orthographic => Matrix4::look_at_rh(
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(0.0, 0.0, 0.0),
                WORLD_UP,
            ),
        }
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        let projection = match self.projection_mode {
            ProjectionMode::Perspective => {
                perspective(Deg(self.zoom), self.aspect, self.znear, self.zfar)
            }
            ProjectionMode::Orthographic => ortho(
                -ORTHO_EXTENT,
                ORTHO_EXTENT,
                -ORTHO_EXTENT,
                ORTHO_EXTENT,
                self.znear,
                self.zfar,
            ),
        };
        OPENGL_TO_WGPU_MATRIX * projection
    }
}

impl FlyCamera {
    pub fn new(position: Point3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            yaw: Deg(-90.0), // looking down -Z
            pitch: Deg(0.0),
            movement_speed: 3.0,
            mouse_sensitivity: 0.1,
            zoom: 45.0,
            projection_mode: ProjectionMode::Perspective,
            aspect,
            znear: 0.1,
            zfar: 100.0,
            uniform: CameraUniform::default(),
        };
        camera.update_uniform();
        camera
    }

    /// Unit vector the camera looks along
    pub fn front(&self) -> Vector3<f32> {
        Vector3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    fn right(&self) -> Vector3<f32> {
        self.front().cross(WORLD_UP).normalize()
    }

    /// Translates the camera along its view basis, scaled by delta time.
    ///
    /// Movement is ignored in the fixed orthographic view.
    pub fn process_movement(&mut self, direction: CameraMovement, delta_time: f32) {
        if self.projection_mode == ProjectionMode::Orthographic {
            return;
        }
        let velocity = self.movement_speed * delta_time;
        let offset = match direction {
            CameraMovement::Forward => self.front() * velocity,
            CameraMovement::Backward => -self.front() * velocity,
            CameraMovement::Left => -self.right() * velocity,
            CameraMovement::Right => self.right() * velocity,
            CameraMovement::Up => WORLD_UP * velocity,
            CameraMovement::Down => -WORLD_UP * velocity,
        };
        self.position += offset;
        self.update_uniform();
    }

    /// Applies a mouse delta to yaw/pitch, pitch clamped short of vertical
    pub fn process_mouse(&mut self, x_offset: f32, y_offset: f32) {
        if self.projection_mode == ProjectionMode::Orthographic {
            return;
        }
        self.yaw += Deg(x_offset * self.mouse_sensitivity);
        self.pitch += Deg(y_offset * self.mouse_sensitivity);
        self.pitch.0 = self.pitch.0.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_uniform();
    }

    /// Scroll wheel zoom, clamped to a sane field-of-view range
    pub fn process_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(1.0, 45.0);
        self.update_uniform();
    }

    /// Switches between the fly perspective and the fixed front view
    pub fn toggle_projection(&mut self) {
        self.projection_mode = match self.projection_mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
        self.update_uniform();
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_uniform();
    }

    /// Recomputes the uniform from the current camera state
    pub fn update_uniform(&mut self) {
        self.uniform = CameraUniform {
            view_position: [self.position.x, self.position.y, self.position.z, 1.0],
            view: convert_matrix4_to_array(self.view_matrix()),
            projection: convert_matrix4_to_array(self.projection_matrix()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = FlyCamera::new(Point3::new(0.0, 0.0, 3.0), 1.0);
        let front = camera.front();
        assert!(front.x.abs() < 1e-6);
        assert!(front.y.abs() < 1e-6);
        assert!((front.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn pitch_clamps_short_of_vertical() {
        let mut camera = FlyCamera::new(Point3::new(0.0, 0.0, 3.0), 1.0);
        camera.process_mouse(0.0, 10_000.0);
        assert_eq!(camera.pitch.0, PITCH_LIMIT);
        camera.process_mouse(0.0, -100_000.0);
        assert_eq!(camera.pitch.0, -PITCH_LIMIT);
    }

    #[test]
    fn movement_is_frozen_in_the_fixed_front_view() {
        let mut camera = FlyCamera::new(Point3::new(0.0, 0.0, 3.0), 1.0);
        camera.toggle_projection();
        let before = camera.position;
        camera.process_movement(CameraMovement::Forward, 1.0);
        assert_eq!(camera.position, before);
        camera.toggle_projection();
        camera.process_movement(CameraMovement::Forward, 1.0);
        assert_ne!(camera.position, before);
    }

    #[test]
    fn scroll_zoom_stays_in_range() {
        let mut camera = FlyCamera::new(Point3::new(0.0, 0.0, 3.0), 1.0);
        camera.process_scroll(100.0);
        assert_eq!(camera.zoom, 1.0);
        camera.process_scroll(-100.0);
        assert_eq!(camera.zoom, 45.0);
    }
}
