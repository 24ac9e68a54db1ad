//! Scene container and the still-life arrangement
//!
//! A desk scene: a wood plane, a computer case assembled from boxes, a jar
//! of cashews (cylinder) with its lid (torus), a rubber-band ball (sphere),
//! and a pyramid paperweight. Placement data lives here; the mesh data it
//! references belongs to the registry.

use std::path::Path;

use cgmath::{Deg, Vector3};
use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    geometry::ShapeKind,
    lighting::LightingConfig,
    resources::{
        material::{Material, MaterialManager},
        texture_resource::TextureResource,
    },
    scene::object::SceneObject,
};

/// Main scene: objects, materials, lighting, and the camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<SceneObject>,
    pub material_manager: MaterialManager,
    pub lighting: LightingConfig,
}

impl Scene {
    /// Creates an empty scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            lighting: LightingConfig::default(),
        }
    }

    /// Builds the fixed still-life arrangement.
    ///
    /// Materials are referenced by ID here and created in
    /// [`create_still_life_materials`] once a GPU device exists.
    ///
    /// [`create_still_life_materials`]: Scene::create_still_life_materials
    pub fn still_life(camera_manager: CameraManager) -> Self {
        let mut scene = Self::new(camera_manager);

        // Desk top: the unit plane spans +/-1, so scale 15 covers the
        // whole arrangement.
        scene.objects.push(
            SceneObject::new("desk", ShapeKind::Plane)
                .with_material("wood")
                .with_trs(
                    Vector3::new(0.0, 0.0, 0.0),
                    Deg(0.0),
                    Vector3::new(15.0, 1.0, 15.0),
                ),
        );

        // Computer case: five box panels.
        scene.objects.push(
            SceneObject::new("computer side", ShapeKind::Box)
                .with_material("computer shell")
                .with_trs(
                    Vector3::new(10.0, 3.5, -3.0),
                    Deg(0.0),
                    Vector3::new(7.0, 7.0, 2.5),
                ),
        );
        scene.objects.push(
            SceneObject::new("computer back", ShapeKind::Box)
                .with_material("panel")
                .with_trs(
                    Vector3::new(13.6, 3.5, -3.0),
                    Deg(0.0),
                    Vector3::new(0.2, 7.0, 2.5),
                ),
        );
        scene.objects.push(
            SceneObject::new("computer top", ShapeKind::Box)
                .with_material("computer vents")
                .with_trs(
                    Vector3::new(9.7, 7.0, -2.7),
                    Deg(90.0),
                    Vector3::new(2.9, 0.1, 7.3),
                ),
        );
        scene.objects.push(
            SceneObject::new("computer front", ShapeKind::Box)
                .with_material("panel")
                .with_trs(
                    Vector3::new(6.3, 3.5, -3.0),
                    Deg(0.0),
                    Vector3::new(0.5, 7.0, 2.5),
                ),
        );
        scene.objects.push(
            SceneObject::new("computer far side", ShapeKind::Box)
                .with_material("panel")
                .with_trs(
                    Vector3::new(9.7, 3.5, -1.5),
                    Deg(0.0),
                    Vector3::new(7.3, 7.0, 0.5),
                ),
        );

        // Cashew jar: drawn through the cylinder's cap/cap/side segments.
        scene.objects.push(
            SceneObject::new("cashew jar", ShapeKind::Cylinder)
                .with_material("cashews")
                .with_trs(
                    Vector3::new(0.0, 0.1, 0.0),
                    Deg(0.0),
                    Vector3::new(1.0, 3.2, 1.0),
                ),
        );
        scene.objects.push(
            SceneObject::new("jar lid", ShapeKind::Torus)
                .with_material("jar lid")
                .with_trs(
                    Vector3::new(0.0, 3.35, 0.0),
                    Deg(0.0),
                    Vector3::new(1.1, 1.0, 1.1),
                ),
        );

        // Rubber band ball on the desk.
        scene.objects.push(
            SceneObject::new("rubber band ball", ShapeKind::Sphere)
                .with_material("rubber bands")
                .with_trs(
                    Vector3::new(3.0, 0.68, -5.0),
                    Deg(0.0),
                    Vector3::new(0.7, 0.7, 0.7),
                ),
        );

        // Pyramid paperweight.
        scene.objects.push(
            SceneObject::new("paperweight", ShapeKind::Pyramid)
                .with_material("brass")
                .with_trs(
                    Vector3::new(-3.5, 0.4, -4.0),
                    Deg(30.0),
                    Vector3::new(0.8, 0.8, 0.8),
                ),
        );

        scene
    }

    /// Creates the still-life materials.
    ///
    /// Image assets are looked up under `assets_dir`; a missing or
    /// undecodable file degrades to a procedural checkerboard (textured
    /// surfaces) or a flat color with a logged warning, so the viewer runs
    /// without any files on disk.
    pub fn create_still_life_materials(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        assets_dir: &Path,
    ) {
        let load = |file: &str, checker_a: [u8; 4], checker_b: [u8; 4]| {
            let path = assets_dir.join(file);
            match TextureResource::from_image_file(device, queue, &path) {
                Ok(texture) => texture,
                Err(error) => {
                    log::warn!("{error}; using a procedural texture instead");
                    TextureResource::create_checkerboard(
                        device, queue, checker_a, checker_b, 8, file,
                    )
                }
            }
        };

        let wood = load("wood.jpg", [139, 94, 52, 255], [110, 72, 40, 255]);
        self.material_manager.add_material(
            Material::new("wood", [1.0, 1.0, 1.0, 1.0])
                .with_texture(wood)
                .with_uv_scale(5.0, 5.0),
        );

        let shell = load("computer_shell.jpg", [40, 40, 45, 255], [55, 55, 60, 255]);
        self.material_manager
            .add_material(Material::new("computer shell", [1.0, 1.0, 1.0, 1.0]).with_texture(shell));

        let vents = load("computer_vents.jpg", [30, 30, 32, 255], [70, 70, 75, 255]);
        self.material_manager
            .add_material(Material::new("computer vents", [1.0, 1.0, 1.0, 1.0]).with_texture(vents));

        let cashews = load("cashews.jpg", [225, 180, 120, 255], [200, 150, 90, 255]);
        self.material_manager
            .add_material(Material::new("cashews", [0.25, 0.68, 0.75, 1.0]).with_texture(cashews));

        let lid = load("jar_lid.jpg", [180, 40, 40, 255], [160, 30, 30, 255]);
        self.material_manager
            .add_material(Material::new("jar lid", [1.0, 1.0, 1.0, 1.0]).with_texture(lid));

        let bands = load("rubber_bands.jpg", [180, 60, 160, 255], [60, 140, 80, 255]);
        self.material_manager
            .add_material(Material::new("rubber bands", [1.0, 1.0, 1.0, 1.0]).with_texture(bands));

        // Flat-colored materials.
        self.material_manager
            .add_material(Material::new("panel", [0.35, 0.35, 0.38, 1.0]));
        self.material_manager
            .add_material(Material::new("brass", [0.72, 0.58, 0.25, 1.0]));
    }

    /// Initializes GPU resources for all objects and materials.
    ///
    /// Must be called after the GPU context is available and before
    /// rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device);
        }
        self.material_manager
            .update_all_gpu_resources(device, queue);
    }

    /// Syncs every visible object's transform uniform to the GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            object.update_transform(queue);
        }
    }

    /// Gets the material for rendering an object, falling back to the
    /// default material when the object's ID does not resolve.
    pub fn get_material_for_object(&self, object: &SceneObject) -> &Material {
        self.material_manager
            .get_material_for_object(object.material_id.as_ref())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{camera_controller::CameraController, fly_camera::FlyCamera};
    use cgmath::Point3;

    fn test_scene() -> Scene {
        let camera = FlyCamera::new(Point3::new(0.0, 0.0, 3.0), 1.0);
        let manager = CameraManager::new(camera, CameraController::new());
        Scene::still_life(manager)
    }

    #[test]
    fn still_life_places_every_shape_kind() {
        let scene = test_scene();
        for kind in ShapeKind::ALL {
            assert!(
                scene.objects.iter().any(|object| object.shape == kind),
                "no object uses {:?}",
                kind
            );
        }
    }

    #[test]
    fn still_life_objects_reference_materials() {
        let scene = test_scene();
        for object in &scene.objects {
            assert!(
                object.material_id.is_some(),
                "{} has no material",
                object.name
            );
        }
    }
}
