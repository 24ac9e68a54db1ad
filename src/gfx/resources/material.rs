//! Material system for the Phong pipeline
//!
//! Materials are stored centrally in [`MaterialManager`] and objects
//! reference them by ID. A material is either textured or flat-colored;
//! untextured materials bind a shared 1x1 white texture so one bind group
//! layout serves every draw call.

use std::collections::HashMap;
use wgpu::Device;

use crate::gfx::lighting::SpecularParams;
use crate::gfx::resources::texture_resource::TextureResource;
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Material ID for referencing materials
pub type MaterialId = String;

/// GPU uniform data for materials.
///
/// Must match the `MaterialUniform` struct in `phong.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub specular_intensity: [f32; 2],
    pub highlight_size: [f32; 2],
    pub has_texture: u32,
    pub _padding: u32,
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material bind group management: uniform + texture + sampler
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Material Bind Group Layout");

        MaterialBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(
        &mut self,
        device: &Device,
        ubo: &MaterialUBO,
        texture: &TextureResource,
    ) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .texture(&texture.view)
                .sampler(&texture.sampler)
                .create(device, "Material Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

/// Material definition: texture-or-flat-color plus specular response.
pub struct Material {
    pub name: String,
    pub color: [f32; 4],
    pub uv_scale: [f32; 2],
    /// Per-light specular response, one entry per scene light.
    pub specular: [SpecularParams; 2],
    texture: Option<TextureResource>,

    // GPU resources - shared by all objects using this material
    material_ubo: Option<MaterialUBO>,
    material_bindings: Option<MaterialBindings>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            color: [0.8, 0.8, 0.8, 1.0],
            uv_scale: [1.0, 1.0],
            specular: [
                SpecularParams {
                    intensity: 1.0,
                    highlight_size: 25.0,
                },
                SpecularParams {
                    intensity: 1.0,
                    highlight_size: 50.0,
                },
            ],
            texture: None,
            material_ubo: None,
            material_bindings: None,
        }
    }
}

impl Material {
    /// Creates a flat-colored material
    pub fn new(name: &str, color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            color,
            ..Default::default()
        }
    }

    /// Builder pattern: attach a texture (replaces the flat color)
    pub fn with_texture(mut self, texture: TextureResource) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Builder pattern: set the UV tiling scale
    pub fn with_uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = [u, v];
        self
    }

    /// Builder pattern: set the specular response for both lights
    pub fn with_specular(mut self, first: SpecularParams, second: SpecularParams) -> Self {
        self.specular = [first, second];
        self
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Creates or refreshes GPU resources for this material.
    ///
    /// `white` is the shared 1x1 fallback bound when the material has no
    /// texture of its own.
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        white: &TextureResource,
    ) {
        if self.material_ubo.is_none() {
            self.material_ubo = Some(MaterialUBO::new(device));
        }

        if self.material_bindings.is_none() {
            let mut bindings = MaterialBindings::new(device);
            let texture = self.texture.as_ref().unwrap_or(white);
            bindings.create_bind_group(device, self.material_ubo.as_ref().unwrap(), texture);
            self.material_bindings = Some(bindings);
        }

        let uniform_data = MaterialUniform {
            object_color: self.color,
            uv_scale: self.uv_scale,
            specular_intensity: [self.specular[0].intensity, self.specular[1].intensity],
            highlight_size: [self.specular[0].highlight_size, self.specular[1].highlight_size],
            has_texture: self.texture.is_some() as u32,
            _padding: 0,
        };

        if let Some(ubo) = &mut self.material_ubo {
            ubo.update_content(queue, uniform_data);
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.material_bindings.as_ref().map(|b| b.bind_groups())
    }
}

/// Centralized storage for all materials.
///
/// Objects reference materials by ID rather than owning material data,
/// so GPU resources are shared between objects.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material_id: MaterialId,
    white: Option<TextureResource>,
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let mut manager = Self {
            materials: HashMap::new(),
            default_material_id: "default".to_string(),
            white: None,
        };
        manager.add_material(Material::default());
        manager
    }

    /// Adds a material to the library
    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Gets a material by ID
    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Gets a mutable material by ID
    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Gets the default material
    pub fn get_default_material(&self) -> &Material {
        self.materials.get(&self.default_material_id).unwrap()
    }

    /// Gets material for an object with fallback to the default.
    ///
    /// This is the method used during rendering, handling objects whose
    /// material ID does not resolve.
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &Material {
        match material_id {
            Some(id) => self
                .get_material(id)
                .unwrap_or_else(|| self.get_default_material()),
            None => self.get_default_material(),
        }
    }

    /// Creates GPU resources for every material.
    ///
    /// Lazily creates the shared white fallback texture on first call.
    pub fn update_all_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        let white = self
            .white
            .get_or_insert_with(|| TextureResource::create_white_pixel(device, queue));
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, white);
        }
    }

    /// Gets the material bind group layout for pipeline creation.
    ///
    /// All materials share one layout.
    pub fn bind_group_layout(device: &Device) -> wgpu::BindGroupLayout {
        MaterialBindings::new(device).bind_group_layout.layout
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_uniform_matches_the_wgsl_layout() {
        // vec4 + 3 * vec2 + u32 + pad = 48 bytes, as declared in phong.wgsl.
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
    }

    #[test]
    fn manager_falls_back_to_the_default_material() {
        let manager = MaterialManager::new();
        let missing = "does-not-exist".to_string();
        assert_eq!(
            manager.get_material_for_object(Some(&missing)).name,
            "default"
        );
        assert_eq!(manager.get_material_for_object(None).name, "default");
    }
}
