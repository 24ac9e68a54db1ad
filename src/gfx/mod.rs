//! # Graphics Module
//!
//! Everything between the generated geometry and the screen:
//!
//! - **Geometry** ([`geometry`]) - Procedural builders for the six solids
//! - **Registry** ([`registry`]) - GPU-resident mesh storage and draw calls
//! - **Lighting** ([`lighting`]) - The dual-light Phong contract
//! - **Rendering** ([`rendering`]) - Pipelines and the per-frame forward pass
//! - **Scene** ([`scene`]) - The still-life objects and materials
//! - **Camera** ([`camera`]) - Fly camera and its input mapping
//! - **Resources** ([`resources`]) - Textures, materials, uniform bindings

pub mod camera;
pub mod geometry;
pub mod lighting;
pub mod registry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::fly_camera::FlyCamera;
pub use geometry::ShapeKind;
pub use registry::MeshRegistry;
pub use rendering::render_engine::RenderEngine;
pub use scene::Scene;
