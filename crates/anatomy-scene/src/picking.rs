//! Pointer-down picking with highlight and info panel update

use anatomy_core::glam;
use anatomy_core::{client_to_ndc, Anatomy, Selection, SurfaceRect};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use tracing::debug;

use crate::types::{AnatomyState, MainCamera, PartSelected, ViewerCamera};

pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, pick_on_pointer_down);
    }
}

/// Select the part under a client-space pointer position.
///
/// Returns `None` without touching the state when the pointer is outside the
/// surface or the ray misses every candidate part.
pub fn pick_at(
    anatomy: &mut Anatomy,
    viewer_camera: &ViewerCamera,
    surface: SurfaceRect,
    pointer: Vec2,
) -> Option<Selection> {
    let client = glam::Vec2::new(pointer.x, pointer.y);
    if surface.width <= 0.0 || surface.height <= 0.0 || !surface.contains(client) {
        return None;
    }
    let ndc = client_to_ndc(client, surface);
    let ray = viewer_camera.ray_from_ndc(Vec2::new(ndc.x, ndc.y));
    anatomy.select(&ray)
}

/// Client position of a pointer that went down this frame. Any mouse button
/// counts, including the one that starts a pan.
pub fn pointer_down(
    mouse_button: &ButtonInput<MouseButton>,
    cursor: Option<Vec2>,
    touches: &Touches,
) -> Option<Vec2> {
    if mouse_button.get_just_pressed().next().is_some() {
        if let Some(cursor) = cursor {
            return Some(cursor);
        }
    }
    touches.iter_just_pressed().next().map(|t| t.position())
}

fn surface_rect(camera: &Camera) -> Option<SurfaceRect> {
    let rect = camera.logical_viewport_rect()?;
    Some(SurfaceRect {
        left: rect.min.x,
        top: rect.min.y,
        width: rect.width(),
        height: rect.height(),
    })
}

fn pick_on_pointer_down(
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<&Camera, With<MainCamera>>,
    viewer_camera: Res<ViewerCamera>,
    mut state: ResMut<AnatomyState>,
    mut selected: MessageWriter<PartSelected>,
    mut contexts: EguiContexts,
) {
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);
    if egui_wants_pointer {
        return;
    }

    let cursor = windows.single().ok().and_then(Window::cursor_position);
    let Some(pointer) = pointer_down(&mouse_button, cursor, &touch_input) else {
        return;
    };

    let Some(surface) = cameras.single().ok().and_then(surface_rect) else {
        return;
    };

    // Misses leave the state untouched so nothing re-syncs
    let anatomy = &mut state.bypass_change_detection().0;
    let Some(selection) = pick_at(anatomy, &viewer_camera, surface, pointer) else {
        debug!(x = pointer.x, y = pointer.y, "Pick missed");
        return;
    };
    state.set_changed();

    debug!(
        part = %selection.info.name,
        distance = selection.distance,
        "Part selected"
    );
    selected.write(PartSelected {
        part: selection.part,
        info: selection.info,
    });
}
