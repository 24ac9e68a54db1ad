//! Global uniform bindings for camera and lighting data
//!
//! Manages the uniform buffer and bind group for per-frame state shared by
//! every object: camera matrices and the two-light Phong configuration.
//! Bound to group 0 in the render pipelines.

use crate::{
    gfx::{camera::camera_utils::CameraUniform, lighting::LightingConfig},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content.
///
/// Must match the `GlobalUniform` struct in `phong.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    view_position: [f32; 4],
    /// rgb = ambient color, w = ambient strength
    ambient: [f32; 4],
    light_positions: [[f32; 4]; 2],
    light_colors: [[f32; 4]; 2],
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with camera and lighting data.
///
/// Called once per frame; the buffer wrapper skips the GPU write when
/// nothing changed.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lighting: &LightingConfig,
) {
    let pad = |v: [f32; 3]| [v[0], v[1], v[2], 0.0];

    let content = GlobalUBOContent {
        view: camera.view,
        projection: camera.projection,
        view_position: camera.view_position,
        ambient: [
            lighting.ambient.color[0],
            lighting.ambient.color[1],
            lighting.ambient.color[2],
            lighting.ambient.strength,
        ],
        light_positions: [
            pad(lighting.lights[0].position),
            pad(lighting.lights[1].position),
        ],
        light_colors: [pad(lighting.lights[0].color), pad(lighting.lights[1].color)],
    };

    ubo.update_content(queue, content);
}

/// Manages the bind group layout and bind group for global uniforms
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    /// Creates the layout; the bind group itself waits for the UBO.
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer.
    ///
    /// Must be called before any rendering that reads global uniforms.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    /// Returns the bind group layout for pipeline creation
    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// Returns the bind group for rendering
    ///
    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_ubo_content_matches_the_wgsl_layout() {
        // 2 mat4 + 2 vec4 + 2 arrays of 2 vec4 = 224 bytes.
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 224);
    }
}
