//! Camera, lights and background

use bevy::prelude::*;
use tracing::info;

use crate::types::{srgb, MainCamera, ViewerCamera, ViewerSettings};

/// Ambient brightness for a hemisphere intensity of 1.0
const AMBIENT_BRIGHTNESS: f32 = 600.0;
/// Directional illuminance (lux) for an intensity of 1.0
const DIRECTIONAL_ILLUMINANCE: f32 = 8000.0;
/// Share of the hemisphere light bounced up from the ground
const GROUND_BOUNCE: f32 = 0.25;

pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene);
    }
}

fn setup_scene(
    mut commands: Commands,
    settings: Res<ViewerSettings>,
    viewer_camera: Res<ViewerCamera>,
) {
    let scene = &settings.0.scene;
    let lens = &settings.0.camera;

    commands.insert_resource(ClearColor(srgb(scene.background)));

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: lens.fov_degrees.to_radians(),
            near: lens.near,
            far: lens.far,
            aspect_ratio: viewer_camera.lens.aspect,
            ..default()
        }),
        Transform::from_translation(viewer_camera.position())
            .looking_at(viewer_camera.target(), Vec3::Y),
        MainCamera,
    ));

    // Sky half of the hemisphere light
    commands.insert_resource(AmbientLight {
        color: srgb(scene.sky_color),
        brightness: scene.hemisphere_intensity * AMBIENT_BRIGHTNESS,
        affects_lightmapped_meshes: false,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: scene.directional_intensity * DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(scene.directional_position))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ground half of the hemisphere light, shining up from below
    commands.spawn((
        DirectionalLight {
            color: srgb(scene.ground_color),
            illuminance: scene.hemisphere_intensity * DIRECTIONAL_ILLUMINANCE * GROUND_BOUNCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, -10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));

    info!("Scene ready");
}
