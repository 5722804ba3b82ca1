//! Part meshes and materials, kept in step with [`AnatomyState`]

use anatomy_core::{PartMaterial, Rgb, Shape};
use bevy::prelude::*;
use tracing::info;

use crate::types::{from_core, srgb, AnatomyState, PartEntity};

pub struct BodyPlugin;

impl Plugin for BodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_body)
            .add_systems(Update, sync_parts.run_if(resource_changed::<AnatomyState>));
    }
}

/// Tessellate a part shape
pub fn shape_mesh(shape: &Shape) -> Mesh {
    match *shape {
        Shape::Cuboid { size } => Mesh::from(Cuboid::new(size.x, size.y, size.z)),
        Shape::Sphere {
            radius,
            sectors,
            stacks,
        } => Sphere::new(radius).mesh().uv(sectors, stacks),
        Shape::Cylinder {
            radius_top,
            radius_bottom,
            height,
            resolution,
        } => {
            if (radius_top - radius_bottom).abs() <= f32::EPSILON {
                Mesh::from(Cylinder::new(radius_top, height).mesh().resolution(resolution))
            } else {
                let frustum = ConicalFrustum {
                    radius_top,
                    radius_bottom,
                    height,
                };
                Mesh::from(frustum.mesh().resolution(resolution))
            }
        }
        Shape::Capsule {
            radius,
            length,
            cap_segments,
            radial_segments,
        } => Mesh::from(
            Capsule3d::new(radius, length)
                .mesh()
                .latitudes(cap_segments * 2)
                .longitudes(radial_segments),
        ),
    }
}

/// Emissive term of a part; hex values are used as-is so 0x222222 gives a
/// visible lift under the default exposure
pub fn emissive(color: Option<Rgb>) -> LinearRgba {
    match color {
        Some(rgb) => {
            let [r, g, b] = rgb.to_f32_array();
            LinearRgba::rgb(r, g, b)
        }
        None => LinearRgba::BLACK,
    }
}

fn alpha_mode(material: &PartMaterial) -> AlphaMode {
    if material.transparent {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    }
}

fn base_color(material: &PartMaterial) -> Color {
    srgb(material.color).with_alpha(material.opacity)
}

pub fn standard_material(material: &PartMaterial) -> StandardMaterial {
    StandardMaterial {
        base_color: base_color(material),
        metallic: material.metalness,
        perceptual_roughness: material.roughness,
        alpha_mode: alpha_mode(material),
        emissive: emissive(material.emissive),
        ..default()
    }
}

fn spawn_body(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<AnatomyState>,
) {
    for (index, part) in state.0.parts().iter().enumerate() {
        let id = anatomy_core::PartId(index);
        let transform = Transform {
            translation: from_core(part.translation),
            rotation: Quat::from_array(part.rotation.to_array()),
            ..default()
        };
        let visibility = if part.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };

        commands.spawn((
            Mesh3d(meshes.add(shape_mesh(&part.shape))),
            MeshMaterial3d(materials.add(standard_material(&part.material))),
            transform,
            visibility,
            Name::new(part.display_name().to_string()),
            PartEntity {
                id,
                layer: part.layer,
            },
        ));
    }

    info!(parts = state.0.parts().len(), "Body spawned");
}

/// Mirror visibility, opacity and highlight from the state onto the entities
fn sync_parts(
    state: Res<AnatomyState>,
    mut parts: Query<(&PartEntity, &mut Visibility, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, mut visibility, handle) in &mut parts {
        let Some(part) = state.0.part(entity.id) else {
            continue;
        };

        visibility.set_if_neq(if part.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        });

        let wanted_color = base_color(&part.material);
        let wanted_alpha = alpha_mode(&part.material);
        let wanted_emissive = emissive(part.material.emissive);

        let stale = materials.get(&handle.0).is_some_and(|current| {
            current.base_color != wanted_color
                || current.alpha_mode != wanted_alpha
                || current.emissive != wanted_emissive
        });
        if !stale {
            continue;
        }
        if let Some(mut material) = materials.get_mut(&handle.0) {
            material.base_color = wanted_color;
            material.alpha_mode = wanted_alpha;
            material.emissive = wanted_emissive;
        }
    }
}
