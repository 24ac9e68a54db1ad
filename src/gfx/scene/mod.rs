//! # Scene Management Module
//!
//! Scene data for the still life: objects binding a generated shape to a
//! transform and a material, plus the vertex format every mesh shares.

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::SceneObject;
pub use scene::Scene;
pub use vertex::Vertex;
