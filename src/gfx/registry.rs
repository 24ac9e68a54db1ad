//! Mesh registry: GPU-resident storage for the generated shapes
//!
//! Builds all six solids once at startup, uploads their buffers, and hands
//! the renderer per-shape draw calls. The registry is the sole owner of the
//! buffers; destruction releases them exactly once and is safe to repeat.
//!
//! wgpu has no triangle-fan primitive, so fan segments from the geometry
//! builders are lowered here into indexed triangle lists. Strips stay
//! native and draw through the strip-topology pipeline variant.

use std::collections::HashMap;
use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::gfx::geometry::{GeometryError, MeshData, PrimitiveTopology, ShapeKind};

/// One GPU draw within a mesh, already expressed in wgpu-supported topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    /// A range of the mesh's index buffer, drawn with the triangle-list
    /// pipeline.
    Indexed { indices: Range<u32> },
    /// A range of the vertex buffer, drawn with the triangle-strip pipeline.
    Strip { vertices: Range<u32> },
}

/// GPU-resident copy of one generated mesh.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub vertex_count: u32,
    pub index_count: u32,
    pub draw_calls: Vec<DrawCall>,
}

/// Expands a triangle fan (center, rim...) into triangle-list indices.
///
/// The winding of the fan is preserved: triangle `i` is
/// (center, rim_i, rim_i+1).
pub fn fan_to_list_indices(first_vertex: u32, vertex_count: u32) -> Vec<u32> {
    let mut indices = Vec::new();
    if vertex_count < 3 {
        return indices;
    }
    for i in 1..vertex_count - 1 {
        indices.extend_from_slice(&[first_vertex, first_vertex + i, first_vertex + i + 1]);
    }
    indices
}

/// Lowers a mesh's draw segments into index data and wgpu draw calls.
///
/// Indexed meshes pass through unchanged as a single indexed draw; for
/// unindexed meshes each segment lowers according to its topology.
pub fn lower_segments(data: &MeshData) -> (Vec<u32>, Vec<DrawCall>) {
    if data.is_indexed() {
        let count = data.indices.len() as u32;
        return (
            data.indices.clone(),
            vec![DrawCall::Indexed { indices: 0..count }],
        );
    }

    let mut indices = Vec::new();
    let mut draw_calls = Vec::new();
    for segment in &data.segments {
        match segment.topology {
            PrimitiveTopology::TriangleFan => {
                let start = indices.len() as u32;
                indices.extend(fan_to_list_indices(
                    segment.first_vertex,
                    segment.vertex_count,
                ));
                draw_calls.push(DrawCall::Indexed {
                    indices: start..indices.len() as u32,
                });
            }
            PrimitiveTopology::TriangleList => {
                // Unindexed list: identity indices keep every draw on the
                // same two pipelines.
                let start = indices.len() as u32;
                indices.extend(segment.first_vertex..segment.first_vertex + segment.vertex_count);
                draw_calls.push(DrawCall::Indexed {
                    indices: start..indices.len() as u32,
                });
            }
            PrimitiveTopology::TriangleStrip => {
                draw_calls.push(DrawCall::Strip {
                    vertices: segment.first_vertex
                        ..segment.first_vertex + segment.vertex_count,
                });
            }
        }
    }
    (indices, draw_calls)
}

fn upload_mesh(device: &wgpu::Device, kind: ShapeKind, data: &MeshData) -> GpuMesh {
    let (indices, draw_calls) = lower_segments(data);

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} vertex buffer", kind.label())),
        contents: bytemuck::cast_slice(&data.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = (!indices.is_empty()).then(|| {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} index buffer", kind.label())),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        })
    });

    GpuMesh {
        vertex_buffer,
        index_buffer,
        vertex_count: data.vertices.len() as u32,
        index_count: indices.len() as u32,
        draw_calls,
    }
}

/// Issues a [`GpuMesh`]'s draw calls on a render pass.
///
/// Indexed draws go through the triangle-list pipeline, strip draws through
/// the strip pipeline; the two share bind group layouts so switching between
/// them mid-mesh keeps all bound groups.
pub trait DrawMesh<'a> {
    fn draw_mesh(
        &mut self,
        mesh: &'a GpuMesh,
        list_pipeline: &'a wgpu::RenderPipeline,
        strip_pipeline: &'a wgpu::RenderPipeline,
    );
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(
        &mut self,
        mesh: &'b GpuMesh,
        list_pipeline: &'b wgpu::RenderPipeline,
        strip_pipeline: &'b wgpu::RenderPipeline,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        if let Some(index_buffer) = &mesh.index_buffer {
            self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        }
        for draw in &mesh.draw_calls {
            match draw {
                DrawCall::Indexed { indices } => {
                    self.set_pipeline(list_pipeline);
                    self.draw_indexed(indices.clone(), 0, 0..1);
                }
                DrawCall::Strip { vertices } => {
                    self.set_pipeline(strip_pipeline);
                    self.draw(vertices.clone(), 0..1);
                }
            }
        }
    }
}

/// Owns the GPU meshes for every [`ShapeKind`].
pub struct MeshRegistry {
    meshes: HashMap<ShapeKind, GpuMesh>,
    destroyed: bool,
}

impl MeshRegistry {
    /// Generates and uploads all six shapes.
    ///
    /// A geometry error aborts construction before any mesh is retained,
    /// so a failed registry never holds partial GPU state.
    pub fn new(device: &wgpu::Device) -> Result<Self, GeometryError> {
        let mut meshes = HashMap::new();
        for kind in ShapeKind::ALL {
            let data = kind.build()?;
            log::debug!(
                "{}: {} vertices, {} indices, {} draw call(s)",
                kind.label(),
                data.vertex_count(),
                data.index_count(),
                data.segments.len().max(1),
            );
            meshes.insert(kind, upload_mesh(device, kind, &data));
        }
        log::info!("uploaded {} procedural meshes", meshes.len());
        Ok(Self {
            meshes,
            destroyed: false,
        })
    }

    /// Looks up the GPU mesh for a shape. Returns None after destruction.
    pub fn get(&self, kind: ShapeKind) -> Option<&GpuMesh> {
        if self.destroyed {
            return None;
        }
        self.meshes.get(&kind)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Releases every GPU buffer. Calling this on an already-destroyed
    /// registry is a no-op, never a double-free.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for mesh in self.meshes.values() {
            mesh.vertex_buffer.destroy();
            if let Some(index_buffer) = &mesh.index_buffer {
                index_buffer.destroy();
            }
        }
        self.meshes.clear();
        self.destroyed = true;
        log::debug!("mesh registry destroyed");
    }
}

impl Drop for MeshRegistry {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_cylinder, generate_sphere, CYLINDER_SLICES};

    #[test]
    fn fan_lowering_preserves_the_fan_winding() {
        assert_eq!(
            fan_to_list_indices(10, 5),
            vec![10, 11, 12, 10, 12, 13, 10, 13, 14]
        );
    }

    #[test]
    fn fan_lowering_of_degenerate_fans_is_empty() {
        assert!(fan_to_list_indices(0, 0).is_empty());
        assert!(fan_to_list_indices(0, 2).is_empty());
    }

    #[test]
    fn indexed_meshes_pass_through_as_one_draw() {
        let sphere = generate_sphere(1.0, 6, 8).unwrap();
        let (indices, draw_calls) = lower_segments(&sphere);
        assert_eq!(indices, sphere.indices);
        assert_eq!(
            draw_calls,
            vec![DrawCall::Indexed {
                indices: 0..sphere.indices.len() as u32
            }]
        );
    }

    #[test]
    fn cylinder_lowers_to_two_indexed_fans_and_a_native_strip() {
        let cylinder = generate_cylinder(1.0, 1.0, CYLINDER_SLICES).unwrap();
        let (indices, draw_calls) = lower_segments(&cylinder);
        assert_eq!(draw_calls.len(), 3);

        // Each cap fan of n rim edges becomes n triangles.
        let cap_triangles = CYLINDER_SLICES * 3;
        assert!(matches!(
            &draw_calls[0],
            DrawCall::Indexed { indices } if indices.len() as u32 == cap_triangles
        ));
        assert!(matches!(
            &draw_calls[1],
            DrawCall::Indexed { indices } if indices.len() as u32 == cap_triangles
        ));
        let strip = &cylinder.segments[2];
        assert_eq!(
            draw_calls[2],
            DrawCall::Strip {
                vertices: strip.first_vertex..strip.first_vertex + strip.vertex_count
            }
        );

        // Every lowered index stays inside the vertex buffer.
        let vertex_count = cylinder.vertices.len() as u32;
        assert!(indices.iter().all(|&i| i < vertex_count));
    }
}
