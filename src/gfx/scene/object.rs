//! Scene objects: a shape reference, a model transform, and a material.

use cgmath::{Deg, Matrix, Matrix3, Matrix4, SquareMatrix, Vector3};
use wgpu::Device;

use crate::gfx::geometry::ShapeKind;
use crate::gfx::resources::material::MaterialId;
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Per-object uniform data.
///
/// Must match the `TransformUniform` struct in `phong.wgsl` exactly. The
/// normal matrix is the inverse-transpose of the model's upper 3x3, padded
/// to a mat4; computing it here keeps non-uniform scale from bending
/// normals, and WGSL has no matrix inverse anyway.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
}

type TransformUBO = UniformBuffer<TransformUniform>;

/// Creates the bind group layout shared by every object's transform group
pub fn transform_bind_group_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_vertex(binding_types::uniform())
        .create(device, "Transform Bind Group Layout")
}

/// GPU resources backing one object's transform
pub struct ObjectGpuResources {
    transform_ubo: TransformUBO,
    transform_bind_group: wgpu::BindGroup,
}

/// One drawable in the still life.
pub struct SceneObject {
    pub name: String,
    pub shape: ShapeKind,
    pub transform: Matrix4<f32>,
    pub material_id: Option<MaterialId>,
    pub visible: bool,
    gpu_resources: Option<ObjectGpuResources>,
}

impl SceneObject {
    pub fn new(name: &str, shape: ShapeKind) -> Self {
        Self {
            name: name.to_string(),
            shape,
            transform: Matrix4::identity(),
            material_id: None,
            visible: true,
            gpu_resources: None,
        }
    }

    /// Builder pattern: assign a material by ID
    pub fn with_material(mut self, material_id: &str) -> Self {
        self.material_id = Some(material_id.to_string());
        self
    }

    /// Builder pattern: set the model transform directly
    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.transform = transform;
        self
    }

    /// Builder pattern: compose translation * rotation-about-Y * scale,
    /// applied right-to-left as usual.
    pub fn with_trs(
        mut self,
        translation: Vector3<f32>,
        rotation_y: Deg<f32>,
        scale: Vector3<f32>,
    ) -> Self {
        let t = Matrix4::from_translation(translation);
        let r = Matrix4::from_angle_y(rotation_y);
        let s = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
        self.transform = t * r * s;
        self
    }

    /// The uniform content for the current transform
    pub fn transform_uniform(&self) -> TransformUniform {
        TransformUniform {
            model: *self.transform.as_ref(),
            normal_matrix: *normal_matrix(&self.transform).as_ref(),
        }
    }

    /// Creates the transform uniform buffer and bind group
    pub fn init_gpu_resources(&mut self, device: &Device) {
        let layout = transform_bind_group_layout(device);
        let transform_ubo = TransformUBO::new_with_data(device, &self.transform_uniform());
        let transform_bind_group = BindGroupBuilder::new(&layout)
            .resource(transform_ubo.binding_resource())
            .create(device, "Transform Bind Group");

        self.gpu_resources = Some(ObjectGpuResources {
            transform_ubo,
            transform_bind_group,
        });
    }

    /// Syncs the transform uniform to the GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        let uniform = self.transform_uniform();
        if let Some(gpu_resources) = &mut self.gpu_resources {
            gpu_resources.transform_ubo.update_content(queue, uniform);
        }
    }

    /// The transform bind group for rendering
    pub fn transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }
}

/// Inverse-transpose of the model's upper 3x3, embedded in a mat4.
///
/// Falls back to the model's own rotation part for singular transforms
/// (zero scale) instead of poisoning normals with NaNs.
fn normal_matrix(model: &Matrix4<f32>) -> Matrix4<f32> {
    let linear = Matrix3::from_cols(
        model.x.truncate(),
        model.y.truncate(),
        model.z.truncate(),
    );
    let inverse_transpose = linear
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or(linear);
    Matrix4::from(inverse_transpose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Rad, Vector4};

    const EPS: f32 = 1e-6;

    fn assert_vec4_eq(actual: Vector4<f32>, expected: Vector4<f32>) {
        for axis in 0..4 {
            assert!(
                (actual[axis] - expected[axis]).abs() < EPS,
                "{:?} != {:?}",
                actual,
                expected
            );
        }
    }

    #[test]
    fn normal_matrix_of_a_rotation_is_the_rotation() {
        let model = Matrix4::from_angle_y(Rad(0.7));
        let normal = normal_matrix(&model);
        for column in 0..3 {
            assert_vec4_eq(normal[column], model[column]);
        }
    }

    #[test]
    fn normal_matrix_counters_non_uniform_scale() {
        let model = Matrix4::from_nonuniform_scale(2.0, 1.0, 1.0);
        let normal = normal_matrix(&model);
        // Inverse-transpose of diag(2,1,1) is diag(0.5,1,1).
        assert!((normal.x.x - 0.5).abs() < EPS);
        assert!((normal.y.y - 1.0).abs() < EPS);
        assert!((normal.z.z - 1.0).abs() < EPS);
    }

    #[test]
    fn normal_matrix_ignores_translation() {
        let model = Matrix4::from_translation(Vector3::new(5.0, -2.0, 3.0));
        let normal = normal_matrix(&model);
        assert_vec4_eq(normal.w, Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert!((normal.x.x - 1.0).abs() < EPS);
    }

    #[test]
    fn trs_builder_applies_scale_before_translation() {
        let object = SceneObject::new("test", ShapeKind::Box).with_trs(
            Vector3::new(1.0, 2.0, 3.0),
            Deg(0.0),
            Vector3::new(2.0, 2.0, 2.0),
        );
        let origin = object.transform * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_vec4_eq(origin, Vector4::new(1.0, 2.0, 3.0, 1.0));
        let unit_x = object.transform * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_vec4_eq(unit_x, Vector4::new(3.0, 2.0, 3.0, 1.0));
    }
}
