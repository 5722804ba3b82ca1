//! Orbit controls: drag to rotate, right-drag to pan, scroll or pinch to zoom

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::types::{MainCamera, ViewerCamera};

/// Scroll lines to orbit zoom steps
const LINE_SCROLL: f32 = 1.0;
/// Pixel scroll (trackpads, browsers) to orbit zoom steps
const PIXEL_SCROLL: f32 = 0.01;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (orbit_input, apply_camera_pose).chain());
    }
}

fn orbit_input(
    mut viewer_camera: ResMut<ViewerCamera>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut contexts: EguiContexts,
) {
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);

    let total_motion: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll: f32 = mouse_wheel
        .read()
        .map(|wheel| match wheel.unit {
            bevy::input::mouse::MouseScrollUnit::Line => wheel.y * LINE_SCROLL,
            bevy::input::mouse::MouseScrollUnit::Pixel => wheel.y * PIXEL_SCROLL,
        })
        .sum();

    if egui_wants_pointer {
        return;
    }

    let orbit = &mut viewer_camera.bypass_change_detection().orbit;
    let mut moved = false;

    if total_motion != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(to_core(total_motion));
            moved = true;
        } else if mouse_button.pressed(MouseButton::Right) {
            orbit.pan(to_core(total_motion));
            moved = true;
        }
    }

    if scroll != 0.0 {
        orbit.zoom(scroll);
        moved = true;
    }

    // Touch: one finger rotates, two fingers pinch
    let touches: Vec<_> = touch_input.iter().collect();
    match touches.as_slice() {
        [touch] => {
            let delta = touch.delta();
            if delta != Vec2::ZERO {
                orbit.rotate(to_core(delta));
                moved = true;
            }
        }
        [first, second] => {
            let current = first.position().distance(second.position());
            let previous = (first.position() - first.delta())
                .distance(second.position() - second.delta());
            if previous > 1.0 && current > 1.0 && (current - previous).abs() > f32::EPSILON {
                // Spreading fingers zooms in
                orbit.zoom((current / previous - 1.0) / orbit.zoom_speed);
                moved = true;
            }
        }
        _ => {}
    }

    if moved {
        viewer_camera.set_changed();
    }
}

/// Place the camera entity at the orbit pose
fn apply_camera_pose(
    viewer_camera: Res<ViewerCamera>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if !viewer_camera.is_changed() {
        return;
    }
    if let Ok(mut transform) = camera_query.single_mut() {
        *transform = Transform::from_translation(viewer_camera.position())
            .looking_at(viewer_camera.target(), Vec3::Y);
    }
}

fn to_core(v: Vec2) -> anatomy_core::glam::Vec2 {
    anatomy_core::glam::Vec2::new(v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anatomy_core::ViewerConfig;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_camera_follows_orbit() {
        let config = ViewerConfig::default();
        let mut world = World::new();
        world.insert_resource(ViewerCamera::from_config(&config));
        let camera = world.spawn((Transform::default(), MainCamera)).id();

        world.resource_mut::<ViewerCamera>().orbit.zoom(2.0);
        world.run_system_once(apply_camera_pose).unwrap();

        let expected = world.resource::<ViewerCamera>().position();
        let transform = world.get::<Transform>(camera).unwrap();
        assert!((transform.translation - expected).length() < 1e-4);
        assert!(transform.translation.distance(Vec3::new(0.0, 1.0, 0.0)) < 4.0);
    }
}
