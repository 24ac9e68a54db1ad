//! WGPU-based rendering engine for the still-life viewer
//!
//! Owns the surface, device, depth buffer, and the Phong pipeline pair,
//! and renders the scene in a single forward pass per frame.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::gfx::{
    camera::camera_utils::CameraUniform,
    lighting::LightingConfig,
    registry::{DrawMesh, MeshRegistry},
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
        material::MaterialManager,
        texture_resource::TextureResource,
    },
    scene::{object::transform_bind_group_layout, scene::Scene},
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

/// Name of the triangle-list Phong pipeline
const PHONG_LIST: &str = "PhongList";
/// Name of the triangle-strip variant (cylinder sides)
const PHONG_STRIP: &str = "PhongStrip";

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
}

impl RenderEngine {
    /// Creates a new render engine for the given window.
    ///
    /// Shader compilation or pipeline validation failures are fatal here,
    /// reported with the backend's diagnostic text; there is no runtime
    /// shader recovery.
    ///
    /// # Panics
    /// Panics if no adapter/device is available or the shader fails to
    /// compile.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> RenderEngine {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .expect("Failed to request a device!");

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        // Global uniforms: camera + two-light Phong configuration.
        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        let transform_layout = transform_bind_group_layout(&device).layout;
        let material_layout = MaterialManager::bind_group_layout(&device);

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        if let Err(error) = pipeline_manager.load_shader("phong", include_str!("phong.wgsl")) {
            panic!("{error}");
        }

        let color_target = Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        });
        let layouts = vec![
            global_bindings.bind_group_layouts().clone(),
            transform_layout,
            material_layout,
        ];

        pipeline_manager.register_pipeline(
            PHONG_LIST,
            PipelineConfig::default()
                .with_label("PHONG LIST")
                .with_shader("phong")
                .with_depth_stencil(depth_texture.texture.clone())
                .with_bind_group_layouts(layouts.clone())
                .with_color_targets(vec![color_target.clone()]),
        );
        pipeline_manager.register_pipeline(
            PHONG_STRIP,
            PipelineConfig::default()
                .with_label("PHONG STRIP")
                .with_shader("phong")
                .with_primitive_topology(wgpu::PrimitiveTopology::TriangleStrip)
                .with_depth_stencil(depth_texture.texture.clone())
                .with_bind_group_layouts(layouts)
                .with_color_targets(vec![color_target]),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            panic!("failed to create render pipelines:\n{}", errors.join("\n"));
        }

        RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
        }
    }

    /// Updates the global uniform buffer from camera and lighting state.
    ///
    /// Called once per frame before [`render_frame`].
    ///
    /// [`render_frame`]: RenderEngine::render_frame
    pub fn update(&mut self, camera_uniform: CameraUniform, lighting: &LightingConfig) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform, lighting);
    }

    /// Renders one frame of the scene.
    ///
    /// A single forward pass: depth-tested, black clear color, then every
    /// visible object's draw calls against the registry's buffers.
    pub fn render_frame(&mut self, scene: &Scene, registry: &MeshRegistry) {
        let surface_texture = self
            .surface
            .get_current_texture()
            .expect("Failed to get surface texture!");

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let (Some(list_pipeline), Some(strip_pipeline)) = (
                self.pipeline_manager.get_pipeline(PHONG_LIST),
                self.pipeline_manager.get_pipeline(PHONG_STRIP),
            ) else {
                log::error!("phong pipelines missing, skipping frame");
                return;
            };

            render_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);

            for object in scene.objects.iter().filter(|object| object.visible) {
                let Some(mesh) = registry.get(object.shape) else {
                    log::warn!("no mesh registered for '{}'", object.name);
                    continue;
                };
                let Some(transform_bind_group) = object.transform_bind_group() else {
                    log::debug!("'{}' has no GPU transform yet", object.name);
                    continue;
                };
                let material = scene.get_material_for_object(object);
                let Some(material_bind_group) = material.get_bind_group() else {
                    log::debug!(
                        "skipping '{}' - material '{}' has no GPU resources",
                        object.name,
                        material.name
                    );
                    continue;
                };

                render_pass.set_bind_group(1, transform_bind_group, &[]);
                render_pass.set_bind_group(2, material_bind_group, &[]);
                render_pass.draw_mesh(mesh, list_pipeline, strip_pipeline);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Resizes the surface and recreates the depth buffer to match
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns reference to the wgpu device
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns reference to the wgpu command queue
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
