//! # Primitive Shape Generation
//!
//! Builders for the solids the still-life scene is assembled from. All shapes
//! are generated with outward unit normals and texture coordinates, wound
//! counter-clockwise as seen from outside so backface culling never discards
//! a visible face.

use super::{DrawSegment, GeometryError, MeshData, PrimitiveTopology};
use crate::gfx::scene::vertex::Vertex;
use std::f32::consts::PI;

const TWO_PI: f32 = 2.0 * PI;

fn check_count(
    shape: &'static str,
    name: &'static str,
    got: u32,
    min: u32,
) -> Result<(), GeometryError> {
    if got < min {
        return Err(GeometryError::InvalidParameter {
            shape,
            name,
            got,
            min,
        });
    }
    Ok(())
}

fn check_dimension(
    shape: &'static str,
    name: &'static str,
    got: f32,
) -> Result<(), GeometryError> {
    if !(got > 0.0) {
        return Err(GeometryError::NonPositiveDimension { shape, name, got });
    }
    Ok(())
}

/// Flat normal of the triangle (a, b, c), unit length.
fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        e1[1] * e2[2] - e1[2] * e2[1],
        e1[2] * e2[0] - e1[0] * e2[2],
        e1[0] * e2[1] - e1[1] * e2[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    [n[0] / len, n[1] / len, n[2] / len]
}

/// Appends a quad as 4 vertices and 6 triangle-list indices.
///
/// Corners must be given counter-clockwise as seen from outside; all four
/// share `normal` and get texture corners (0,0)-(1,1).
fn push_quad(data: &mut MeshData, corners: [[f32; 3]; 4], normal: [f32; 3]) {
    let base = data.vertices.len() as u32;
    let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    for (position, tex_coords) in corners.into_iter().zip(uvs) {
        data.vertices.push(Vertex {
            position,
            normal,
            tex_coords,
        });
    }
    data.indices
        .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
}

/// Generate a unit box centered at the origin.
///
/// 24 vertices (4 per face, unshared across faces so each face keeps its own
/// flat normal) and 36 indices forming 2 triangles per face.
pub fn generate_box() -> MeshData {
    let mut data = MeshData::new();
    let h = 0.5;

    // Front (+Z)
    push_quad(
        &mut data,
        [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
        [0.0, 0.0, 1.0],
    );
    // Back (-Z)
    push_quad(
        &mut data,
        [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]],
        [0.0, 0.0, -1.0],
    );
    // Left (-X)
    push_quad(
        &mut data,
        [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
        [-1.0, 0.0, 0.0],
    );
    // Right (+X)
    push_quad(
        &mut data,
        [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],
        [1.0, 0.0, 0.0],
    );
    // Top (+Y)
    push_quad(
        &mut data,
        [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],
        [0.0, 1.0, 0.0],
    );
    // Bottom (-Y)
    push_quad(
        &mut data,
        [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
        [0.0, -1.0, 0.0],
    );

    data.segments.push(DrawSegment {
        topology: PrimitiveTopology::TriangleList,
        first_vertex: 0,
        vertex_count: data.vertices.len() as u32,
    });
    data
}

/// Generate a flat plane spanning -1..1 in X and Z at y = 0.
///
/// 4 vertices sharing one upward normal and 6 indices. Texture corners run
/// (0,0)-(1,1); tiling over large surfaces comes from the UV-scale uniform,
/// not from the geometry.
pub fn generate_plane() -> MeshData {
    let mut data = MeshData::new();
    push_quad(
        &mut data,
        [
            [-1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 0.0, -1.0],
            [-1.0, 0.0, -1.0],
        ],
        [0.0, 1.0, 0.0],
    );
    data.segments.push(DrawSegment {
        topology: PrimitiveTopology::TriangleList,
        first_vertex: 0,
        vertex_count: 4,
    });
    data
}

/// Generate a four-sided pyramid with a unit base and flat-shaded faces.
///
/// Base corners are duplicated per adjacent face: a vertex shared between
/// faces with different normals would smooth the silhouette edges away.
/// The base draws as 2 triangles with its own downward normal.
pub fn generate_pyramid() -> MeshData {
    let mut data = MeshData::new();
    let h = 0.5;
    let apex = [0.0, h, 0.0];
    // Base corners, counter-clockwise seen from above
    let c0 = [-h, -h, h];
    let c1 = [h, -h, h];
    let c2 = [h, -h, -h];
    let c3 = [-h, -h, -h];

    for (a, b) in [(c0, c1), (c1, c2), (c2, c3), (c3, c0)] {
        let normal = face_normal(a, b, apex);
        let base = data.vertices.len() as u32;
        for (position, tex_coords) in [(a, [0.0, 0.0]), (b, [1.0, 0.0]), (apex, [0.5, 1.0])] {
            data.vertices.push(Vertex {
                position,
                normal,
                tex_coords,
            });
        }
        data.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    // Base, counter-clockwise seen from below
    push_quad(&mut data, [c3, c2, c1, c0], [0.0, -1.0, 0.0]);

    data.segments.push(DrawSegment {
        topology: PrimitiveTopology::TriangleList,
        first_vertex: 0,
        vertex_count: data.vertices.len() as u32,
    });
    data
}

/// Generate a cylinder standing on the XZ plane, extending up to `height`.
///
/// Three draw segments share one unindexed vertex buffer: a triangle fan for
/// the bottom cap, a fan for the top cap, and a triangle strip for the
/// lateral surface. Caps and side cannot share rim vertices because cap
/// normals are vertical while side normals are radial.
pub fn generate_cylinder(radius: f32, height: f32, slices: u32) -> Result<MeshData, GeometryError> {
    check_count("cylinder", "slices", slices, 3)?;
    check_dimension("cylinder", "radius", radius)?;
    check_dimension("cylinder", "height", height)?;

    let mut data = MeshData::new();
    let step = TWO_PI / slices as f32;

    // Bottom cap: fan around the bottom center, rim wound so the face
    // points down. The rim repeats its first vertex to close the fan.
    let bottom_first = data.vertices.len() as u32;
    data.vertices.push(Vertex {
        position: [0.0, 0.0, 0.0],
        normal: [0.0, -1.0, 0.0],
        tex_coords: [0.5, 0.5],
    });
    for i in 0..=slices {
        // `i % slices` folds the closing vertex back onto angle 0, so the
        // wrap is bit-exact rather than sin/cos-of-2-pi close.
        let angle = (i % slices) as f32 * step;
        let (sin_a, cos_a) = angle.sin_cos();
        data.vertices.push(Vertex {
            position: [radius * cos_a, 0.0, radius * sin_a],
            normal: [0.0, -1.0, 0.0],
            tex_coords: [0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a],
        });
    }
    let bottom_count = data.vertices.len() as u32 - bottom_first;

    // Top cap: same fan with the rim traversed in reverse so the face
    // points up.
    let top_first = data.vertices.len() as u32;
    data.vertices.push(Vertex {
        position: [0.0, height, 0.0],
        normal: [0.0, 1.0, 0.0],
        tex_coords: [0.5, 0.5],
    });
    for i in 0..=slices {
        let angle = ((slices - i) % slices) as f32 * step;
        let (sin_a, cos_a) = angle.sin_cos();
        data.vertices.push(Vertex {
            position: [radius * cos_a, height, radius * sin_a],
            normal: [0.0, 1.0, 0.0],
            tex_coords: [0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a],
        });
    }
    let top_count = data.vertices.len() as u32 - top_first;

    // Lateral surface: strip alternating bottom/top ring vertices, with
    // radial normals (no Y component). The final pair repeats angle 0 so
    // the wrap closes exactly.
    let side_first = data.vertices.len() as u32;
    for i in 0..=slices {
        let angle = (i % slices) as f32 * step;
        let (sin_a, cos_a) = angle.sin_cos();
        let u = i as f32 / slices as f32;
        data.vertices.push(Vertex {
            position: [radius * cos_a, 0.0, radius * sin_a],
            normal: [cos_a, 0.0, sin_a],
            tex_coords: [u, 0.0],
        });
        data.vertices.push(Vertex {
            position: [radius * cos_a, height, radius * sin_a],
            normal: [cos_a, 0.0, sin_a],
            tex_coords: [u, 1.0],
        });
    }
    let side_count = data.vertices.len() as u32 - side_first;

    data.segments = vec![
        DrawSegment {
            topology: PrimitiveTopology::TriangleFan,
            first_vertex: bottom_first,
            vertex_count: bottom_count,
        },
        DrawSegment {
            topology: PrimitiveTopology::TriangleFan,
            first_vertex: top_first,
            vertex_count: top_count,
        },
        DrawSegment {
            topology: PrimitiveTopology::TriangleStrip,
            first_vertex: side_first,
            vertex_count: side_count,
        },
    ];
    Ok(data)
}

/// Generate a UV sphere centered at the origin.
///
/// Latitude/longitude tessellation; the normal of a vertex equals its
/// position divided by the radius. Quads touching a pole emit a single
/// triangle instead of a degenerate pair.
pub fn generate_sphere(radius: f32, stacks: u32, slices: u32) -> Result<MeshData, GeometryError> {
    check_count("sphere", "stacks", stacks, 2)?;
    check_count("sphere", "slices", slices, 3)?;
    check_dimension("sphere", "radius", radius)?;

    let mut data = MeshData::new();

    for stack in 0..=stacks {
        let theta = stack as f32 * PI / stacks as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for slice in 0..=slices {
            // The seam column repeats angle 0 exactly (only u differs).
            let phi = (slice % slices) as f32 * TWO_PI / slices as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices.push(Vertex {
                position: [radius * normal[0], radius * normal[1], radius * normal[2]],
                normal,
                tex_coords: [
                    slice as f32 / slices as f32,
                    stack as f32 / stacks as f32,
                ],
            });
        }
    }

    for stack in 0..stacks {
        for slice in 0..slices {
            let i0 = stack * (slices + 1) + slice;
            let i1 = i0 + slices + 1;

            // Skip the degenerate triangle at each pole: both its "upper"
            // (or "lower") corners sit on the pole itself.
            if stack != 0 {
                data.indices.extend_from_slice(&[i0, i0 + 1, i1 + 1]);
            }
            if stack != stacks - 1 {
                data.indices.extend_from_slice(&[i0, i1 + 1, i1]);
            }
        }
    }

    data.segments.push(DrawSegment {
        topology: PrimitiveTopology::TriangleList,
        first_vertex: 0,
        vertex_count: data.vertices.len() as u32,
    });
    Ok(data)
}

/// Generate a torus lying flat in the XZ plane.
///
/// Each vertex derives from two angles: theta around the main ring, phi
/// around the tube cross-section. The normal is the tube-local radial
/// direction rotated by theta, independent of the major radius. Indices
/// wrap modulo both segment counts, so the seam rings are shared rather
/// than duplicated and the surface closes exactly.
pub fn generate_torus(
    major_radius: f32,
    minor_radius: f32,
    ring_segments: u32,
    tube_segments: u32,
) -> Result<MeshData, GeometryError> {
    check_count("torus", "ring_segments", ring_segments, 3)?;
    check_count("torus", "tube_segments", tube_segments, 3)?;
    check_dimension("torus", "major_radius", major_radius)?;
    check_dimension("torus", "minor_radius", minor_radius)?;

    let mut data = MeshData::new();

    for i in 0..ring_segments {
        let theta = i as f32 * TWO_PI / ring_segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for j in 0..tube_segments {
            let phi = j as f32 * TWO_PI / tube_segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let ring = major_radius + minor_radius * cos_phi;
            data.vertices.push(Vertex {
                position: [ring * cos_theta, minor_radius * sin_phi, ring * sin_theta],
                normal: [cos_phi * cos_theta, sin_phi, cos_phi * sin_theta],
                tex_coords: [
                    i as f32 / ring_segments as f32,
                    j as f32 / tube_segments as f32,
                ],
            });
        }
    }

    for i in 0..ring_segments {
        let i_next = (i + 1) % ring_segments;
        for j in 0..tube_segments {
            let j_next = (j + 1) % tube_segments;

            let a = i * tube_segments + j;
            let a1 = i * tube_segments + j_next;
            let b = i_next * tube_segments + j;
            let b1 = i_next * tube_segments + j_next;

            data.indices.extend_from_slice(&[a, a1, b1, a, b1, b]);
        }
    }

    data.segments.push(DrawSegment {
        topology: PrimitiveTopology::TriangleList,
        first_vertex: 0,
        vertex_count: data.vertices.len() as u32,
    });
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::ShapeKind;

    const NORMAL_TOLERANCE: f32 = 1e-4;

    fn length(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    fn assert_mesh_invariants(data: &MeshData) {
        assert!(!data.vertices.is_empty());
        for vertex in &data.vertices {
            let len = length(vertex.normal);
            assert!(
                (len - 1.0).abs() < NORMAL_TOLERANCE,
                "normal {:?} has length {}",
                vertex.normal,
                len
            );
        }
        let vertex_count = data.vertices.len() as u32;
        for &index in &data.indices {
            assert!(index < vertex_count, "index {} out of range", index);
        }
        for segment in &data.segments {
            assert!(segment.first_vertex + segment.vertex_count <= vertex_count);
        }
    }

    #[test]
    fn all_shapes_satisfy_mesh_invariants() {
        for kind in ShapeKind::ALL {
            let data = kind.build().expect("default tessellation is valid");
            assert_mesh_invariants(&data);
        }
    }

    #[test]
    fn box_has_one_flat_normal_per_face() {
        let data = generate_box();
        assert_eq!(data.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(data.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        for face in data.vertices.chunks(4) {
            let normal = face[0].normal;
            assert!(face.iter().all(|v| v.normal == normal));
        }
    }

    #[test]
    fn plane_is_a_single_upward_quad() {
        let data = generate_plane();
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.indices.len(), 6);
        for vertex in &data.vertices {
            assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
            assert_eq!(vertex.position[1], 0.0);
        }
    }

    #[test]
    fn pyramid_duplicates_base_corners_per_face() {
        let data = generate_pyramid();
        // 4 side faces * 3 vertices + 4 base vertices
        assert_eq!(data.vertices.len(), 16);
        assert_eq!(data.indices.len(), 18);
        // Every side face is flat: one normal for its 3 vertices, with an
        // upward component (faces lean out and up).
        for face in data.vertices[..12].chunks(3) {
            assert_eq!(face[0].normal, face[1].normal);
            assert_eq!(face[1].normal, face[2].normal);
            assert!(face[0].normal[1] > 0.0);
        }
        // Base points straight down.
        for vertex in &data.vertices[12..] {
            assert_eq!(vertex.normal, [0.0, -1.0, 0.0]);
        }
    }

    #[test]
    fn cylinder_segments_cover_the_whole_vertex_buffer() {
        let data = generate_cylinder(1.0, 2.0, 36).unwrap();
        assert_eq!(data.segments.len(), 3);
        assert_eq!(data.segments[0].topology, PrimitiveTopology::TriangleFan);
        assert_eq!(data.segments[1].topology, PrimitiveTopology::TriangleFan);
        assert_eq!(data.segments[2].topology, PrimitiveTopology::TriangleStrip);

        let total: u32 = data.segments.iter().map(|s| s.vertex_count).sum();
        assert_eq!(total, data.vertices.len() as u32);

        // Segments tile the buffer contiguously.
        assert_eq!(data.segments[0].first_vertex, 0);
        assert_eq!(
            data.segments[1].first_vertex,
            data.segments[0].vertex_count
        );
        assert_eq!(
            data.segments[2].first_vertex,
            data.segments[0].vertex_count + data.segments[1].vertex_count
        );
        assert!(!data.is_indexed());
    }

    #[test]
    fn cylinder_side_normals_are_radial() {
        let data = generate_cylinder(1.0, 1.0, 36).unwrap();
        let side = data.segments[2];
        for vertex in &data.vertices[side.first_vertex as usize..] {
            assert_eq!(vertex.normal[1], 0.0);
            let radial = (vertex.normal[0].powi(2) + vertex.normal[2].powi(2)).sqrt();
            assert!((radial - 1.0).abs() < NORMAL_TOLERANCE);
        }
    }

    #[test]
    fn cylinder_strip_closes_its_wrap_exactly() {
        let data = generate_cylinder(1.0, 1.0, 36).unwrap();
        let side = data.segments[2];
        let first = side.first_vertex as usize;
        let last = first + side.vertex_count as usize - 2;
        assert_eq!(data.vertices[first].position, data.vertices[last].position);
        assert_eq!(data.vertices[first].normal, data.vertices[last].normal);
    }

    #[test]
    fn sphere_poles_sit_on_the_y_axis() {
        let radius = 2.0;
        let data = generate_sphere(radius, 8, 12).unwrap();
        let top = data.vertices[0];
        assert!((top.position[0]).abs() < NORMAL_TOLERANCE);
        assert!((top.position[1] - radius).abs() < NORMAL_TOLERANCE);
        assert!((top.position[2]).abs() < NORMAL_TOLERANCE);
        assert_eq!(top.tex_coords[1], 0.0);

        let bottom = *data.vertices.last().unwrap();
        assert!((bottom.position[0]).abs() < NORMAL_TOLERANCE);
        assert!((bottom.position[1] + radius).abs() < NORMAL_TOLERANCE);
        assert!((bottom.position[2]).abs() < NORMAL_TOLERANCE);
        assert_eq!(bottom.tex_coords[1], 1.0);
    }

    #[test]
    fn sphere_emits_single_triangles_at_the_poles() {
        let stacks = 6;
        let slices = 8;
        let data = generate_sphere(1.0, stacks, slices).unwrap();
        // 2 triangles per interior quad, 1 per pole quad.
        let expected_triangles = 2 * (stacks - 2) * slices + 2 * slices;
        assert_eq!(data.indices.len() as u32, expected_triangles * 3);
    }

    #[test]
    fn sphere_seam_column_repeats_the_first_exactly() {
        let stacks = 6;
        let slices = 8;
        let data = generate_sphere(1.0, stacks, slices).unwrap();
        for stack in 0..=stacks {
            let row = (stack * (slices + 1)) as usize;
            let first = data.vertices[row];
            let last = data.vertices[row + slices as usize];
            assert_eq!(first.position, last.position);
            assert_eq!(first.normal, last.normal);
            assert_eq!(last.tex_coords[0], 1.0);
        }
    }

    #[test]
    fn sphere_normal_equals_position_over_radius() {
        let radius = 3.0;
        let data = generate_sphere(radius, 8, 12).unwrap();
        for vertex in &data.vertices {
            for axis in 0..3 {
                let expected = vertex.position[axis] / radius;
                assert!((vertex.normal[axis] - expected).abs() < NORMAL_TOLERANCE);
            }
        }
    }

    #[test]
    fn torus_seam_wraps_onto_the_first_ring() {
        let ring_segments = 16;
        let tube_segments = 8;
        let data = generate_torus(1.0, 0.25, ring_segments, tube_segments).unwrap();
        assert_eq!(
            data.vertices.len() as u32,
            ring_segments * tube_segments,
            "seam rings must be shared, not duplicated"
        );

        // The last ring's quads must index back into ring 0.
        let last_quad_start = ((ring_segments - 1) * tube_segments * 6) as usize;
        let wrap_indices = &data.indices[last_quad_start..last_quad_start + 6];
        assert!(
            wrap_indices.iter().any(|&i| i < tube_segments),
            "wrap quad {:?} never references ring 0",
            wrap_indices
        );

        // And the wrap target really is the ring generated at angle 0.
        let seam_vertex = data.vertices[0];
        assert_eq!(seam_vertex.position[2], 0.0); // theta = 0 lies on +X
    }

    #[test]
    fn torus_normals_ignore_the_major_radius() {
        let thin = generate_torus(1.0, 0.25, 16, 8).unwrap();
        let wide = generate_torus(5.0, 0.25, 16, 8).unwrap();
        for (a, b) in thin.vertices.iter().zip(&wide.vertices) {
            assert_eq!(a.normal, b.normal);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        for kind in ShapeKind::ALL {
            let first = kind.build().unwrap();
            let second = kind.build().unwrap();
            assert_eq!(
                bytemuck::cast_slice::<Vertex, u8>(&first.vertices),
                bytemuck::cast_slice::<Vertex, u8>(&second.vertices),
            );
            assert_eq!(first.indices, second.indices);
            assert_eq!(first.segments, second.segments);
        }
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        assert!(matches!(
            generate_cylinder(1.0, 1.0, 0),
            Err(GeometryError::InvalidParameter { .. })
        ));
        assert!(matches!(
            generate_cylinder(1.0, 1.0, 2),
            Err(GeometryError::InvalidParameter { .. })
        ));
        assert!(matches!(
            generate_sphere(1.0, 1, 12),
            Err(GeometryError::InvalidParameter { .. })
        ));
        assert!(matches!(
            generate_sphere(1.0, 8, 0),
            Err(GeometryError::InvalidParameter { .. })
        ));
        assert!(matches!(
            generate_torus(1.0, 0.25, 2, 8),
            Err(GeometryError::InvalidParameter { .. })
        ));
        assert!(matches!(
            generate_torus(1.0, 0.25, 16, 1),
            Err(GeometryError::InvalidParameter { .. })
        ));
        assert!(matches!(
            generate_cylinder(0.0, 1.0, 36),
            Err(GeometryError::NonPositiveDimension { .. })
        ));
        assert!(matches!(
            generate_torus(1.0, -0.25, 16, 8),
            Err(GeometryError::NonPositiveDimension { .. })
        ));
    }
}
