// src/lib.rs
//! Tableau
//!
//! An interactive 3D still-life viewer built on wgpu and winit. Meshes are
//! generated procedurally, uploaded once into a mesh registry, and rendered
//! with per-fragment dual-light Phong shading under a fly camera.

pub mod app;
pub mod gfx;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ViewerApp;

/// Creates a viewer instance with the default still-life scene
pub fn default() -> ViewerApp {
    ViewerApp::new()
}
