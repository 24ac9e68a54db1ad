//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the solids the viewer renders,
//! eliminating the need for external model files. Builders are pure: the same
//! parameters always produce byte-identical vertex and index buffers.
//!
//! ## Supported Primitives
//!
//! - **Box**: Unit cube with one flat normal per face
//! - **Plane**: Single upward-facing quad
//! - **Pyramid**: Four-sided pyramid with flat-shaded faces
//! - **Cylinder**: Two cap fans plus a lateral strip, exposed as draw segments
//! - **Sphere**: UV sphere with configurable resolution
//! - **Torus**: Seamless ring with configurable segment counts

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex;
use thiserror::Error;

/// How consecutive vertices of a draw segment are assembled into triangles.
///
/// This is the mesh data model's notion of topology; the GPU side lowers
/// fans to indexed lists because wgpu has no fan primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    TriangleFan,
    TriangleStrip,
}

/// A contiguous sub-range of a mesh's vertex buffer drawn with one topology.
///
/// Most meshes draw as a single indexed triangle list; the cylinder draws as
/// three segments (bottom cap, top cap, side) sharing one vertex buffer,
/// because caps and side have incompatible normals at the rim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSegment {
    pub topology: PrimitiveTopology,
    pub first_vertex: u32,
    pub vertex_count: u32,
}

/// Generated geometry ready for GPU upload.
///
/// When `indices` is empty the mesh draws unindexed through its `segments`;
/// otherwise `indices` describe a counter-clockwise triangle list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub segments: Vec<DrawSegment>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices (zero for unindexed meshes)
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }
}

/// Errors produced by the shape builders.
///
/// Generation itself is pure arithmetic and cannot fail; bad tessellation
/// parameters are rejected up front instead of silently producing degenerate
/// buffers.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("{shape}: {name} must be at least {min}, got {got}")]
    InvalidParameter {
        shape: &'static str,
        name: &'static str,
        got: u32,
        min: u32,
    },
    #[error("{shape}: {name} must be positive, got {got}")]
    NonPositiveDimension {
        shape: &'static str,
        name: &'static str,
        got: f32,
    },
}

/// The six solids the viewer knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Plane,
    Pyramid,
    Cylinder,
    Sphere,
    Torus,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Box,
        ShapeKind::Plane,
        ShapeKind::Pyramid,
        ShapeKind::Cylinder,
        ShapeKind::Sphere,
        ShapeKind::Torus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Plane => "plane",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Torus => "torus",
        }
    }

    /// Builds the shape at the viewer's default tessellation.
    pub fn build(self) -> Result<MeshData, GeometryError> {
        match self {
            ShapeKind::Box => Ok(generate_box()),
            ShapeKind::Plane => Ok(generate_plane()),
            ShapeKind::Pyramid => Ok(generate_pyramid()),
            ShapeKind::Cylinder => generate_cylinder(1.0, 1.0, CYLINDER_SLICES),
            ShapeKind::Sphere => generate_sphere(1.0, SPHERE_STACKS, SPHERE_SLICES),
            ShapeKind::Torus => generate_torus(
                1.0,
                0.15,
                TORUS_RING_SEGMENTS,
                TORUS_TUBE_SEGMENTS,
            ),
        }
    }
}

/// Angular resolution of the cylinder's rings
pub const CYLINDER_SLICES: u32 = 36;
/// Latitude rows of the default sphere
pub const SPHERE_STACKS: u32 = 18;
/// Longitude columns of the default sphere
pub const SPHERE_SLICES: u32 = 36;
/// Segments around the torus main ring
pub const TORUS_RING_SEGMENTS: u32 = 48;
/// Segments around the torus tube cross-section
pub const TORUS_TUBE_SEGMENTS: u32 = 24;
