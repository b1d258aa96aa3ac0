//! One-time scene setup and the Bevy side of the droplet scene contract.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use shared::{DropletMaterial, DropletScene, PointerCamera};

use crate::camera::OrbitCamera;
use crate::constants::*;

/// Marker for the camera pointer rays are cast from.
#[derive(Component)]
pub struct RainCamera;

/// Marker for droplet renderables.
#[derive(Component)]
pub struct DropletMarker;

/// Mesh and material shared by every droplet; each droplet is a scaled
/// unit sphere.
#[derive(Resource, Debug)]
pub struct DropletAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub fn standard_material(material: &DropletMaterial) -> StandardMaterial {
    let [r, g, b] = material.base_color;
    StandardMaterial {
        base_color: Color::srgb_u8(r, g, b).with_alpha(material.opacity),
        perceptual_roughness: material.roughness,
        reflectance: material.reflectance,
        specular_transmission: material.transmission,
        thickness: material.thickness,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        RainCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::from_position(CAMERA_POSITION, Vec3::ZERO),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            ..default()
        },
        Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Plane3d already faces +Y, so the pane lies flat at y = 0.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GLASS_SIZE, GLASS_SIZE))),
        MeshMaterial3d(materials.add(standard_material(&DropletMaterial::glass()))),
        Transform::default(),
    ));

    commands.insert_resource(DropletAssets {
        mesh: meshes.add(
            Sphere::new(1.0)
                .mesh()
                .uv(DROPLET_MESH_RESOLUTION, DROPLET_MESH_RESOLUTION),
        ),
        material: materials.add(standard_material(&DropletMaterial::water())),
    });

    info!("Scene ready");
}

/// Droplet renderables as Bevy entities.
#[derive(SystemParam)]
pub struct BevyDropletScene<'w, 's> {
    commands: Commands<'w, 's>,
    assets: Res<'w, DropletAssets>,
    transforms: Query<'w, 's, &'static mut Transform, With<DropletMarker>>,
}

impl DropletScene for BevyDropletScene<'_, '_> {
    type Handle = Entity;

    fn spawn_droplet(&mut self, position: Vec3, radius: f32) -> Entity {
        self.commands
            .spawn((
                DropletMarker,
                Mesh3d(self.assets.mesh.clone()),
                MeshMaterial3d(self.assets.material.clone()),
                Transform::from_translation(position).with_scale(Vec3::splat(radius)),
            ))
            .id()
    }

    fn move_droplet(&mut self, handle: Entity, position: Vec3) {
        // Droplets spawned this frame only exist once commands are applied;
        // their spawn transform is already correct.
        if let Ok(mut transform) = self.transforms.get_mut(handle) {
            transform.translation = position;
        }
    }

    fn despawn_droplet(&mut self, handle: Entity) {
        self.commands.entity(handle).despawn();
    }
}

/// A Bevy camera seen through the core's [`PointerCamera`] contract.
pub struct BevyPointerCamera<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
}

impl PointerCamera for BevyPointerCamera<'_> {
    fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray3d> {
        // Bevy uses reversed depth: the near plane sits at z = 1.
        let near = self.camera.ndc_to_world(self.transform, ndc.extend(1.0))?;
        let far = self
            .camera
            .ndc_to_world(self.transform, ndc.extend(f32::EPSILON))?;
        Dir3::new(far - near)
            .ok()
            .map(|direction| Ray3d::new(near, direction))
    }
}
