use std::{path::PathBuf, sync::Arc, time::Instant};

use anyhow::Context;
use cgmath::Point3;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, fly_camera::FlyCamera,
    },
    registry::MeshRegistry,
    rendering::render_engine::RenderEngine,
    scene::Scene,
};

/// The viewer application: owns the event loop and the still-life scene.
pub struct ViewerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

/// Everything the event loop drives. GPU-dependent pieces stay `None`
/// until the window exists.
struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    mesh_registry: Option<MeshRegistry>,
    scene: Scene,
    assets_dir: PathBuf,
    last_frame: Instant,
}

impl ViewerApp {
    /// Creates the viewer with the default still-life scene
    pub fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let camera = FlyCamera::new(Point3::new(0.0, 4.0, 14.0), 1.0);
        let controller = CameraController::new();
        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::still_life(camera_manager);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                mesh_registry: None,
                scene,
                assets_dir: PathBuf::from("assets"),
                last_frame: Instant::now(),
            },
        }
    }

    /// Overrides the directory texture assets are loaded from
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.app_state.assets_dir = dir.into();
        self
    }

    /// Runs the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated abnormally")
    }
}

impl Default for ViewerApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("tableau")
                .with_inner_size(winit::dpi::LogicalSize::new(800, 600)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();

            let window_clone = window_handle.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            });

            let mesh_registry = match MeshRegistry::new(renderer.device()) {
                Ok(registry) => registry,
                Err(error) => {
                    log::error!("mesh generation failed: {error}");
                    event_loop.exit();
                    return;
                }
            };

            self.scene.create_still_life_materials(
                renderer.device(),
                renderer.queue(),
                &self.assets_dir,
            );
            self.scene.init_gpu_resources(renderer.device(), renderer.queue());
            self.scene
                .camera_manager
                .camera
                .resize_projection(width, height);

            self.mesh_registry = Some(mesh_registry);
            self.render_engine = Some(renderer);
            self.last_frame = Instant::now();
            log::info!("viewer ready: {} scene objects", self.scene.object_count());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if matches!(
                    key_event.physical_key,
                    PhysicalKey::Code(KeyCode::Escape)
                ) {
                    event_loop.exit();
                    return;
                }
                self.scene.camera_manager.process_keyboard_event(&key_event);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta_time = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;

                self.scene.camera_manager.update(delta_time);
                render_engine.update(
                    self.scene.camera_manager.camera.uniform,
                    &self.scene.lighting,
                );
                if let Some(mesh_registry) = self.mesh_registry.as_ref() {
                    render_engine.render_frame(&self.scene, mesh_registry);
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        if self.window.is_none() {
            return;
        }
        self.scene.camera_manager.process_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release GPU mesh buffers exactly once; the registry's Drop would
        // also do this, and destroy() is a no-op the second time.
        if let Some(mut mesh_registry) = self.mesh_registry.take() {
            mesh_registry.destroy();
        }
    }
}
