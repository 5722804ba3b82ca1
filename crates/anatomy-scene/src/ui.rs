//! egui overlay used when the host provides no controls of its own

use anatomy_core::config::ControlsMode;
use anatomy_core::Layer;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::types::{AnatomyState, ControlEvent, RenderSurface, SurfaceMode, ViewerSettings};

/// Shown in the info panel until something is picked
pub const INFO_PLACEHOLDER: &str = "Selecciona una parte del cuerpo";

const MIN_PANEL: f32 = 160.0;
const FLOATING_WIDTH: f32 = 180.0;
const FLOATING_MARGIN: f32 = 8.0;

/// Where the overlay goes relative to the rendered body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayLayout {
    /// Panels fill the window strips the camera viewport leaves free
    Docked { side_width: f32, bottom_height: f32 },
    /// The render fills the whole window; small windows float in its corners
    Floating { width: f32 },
}

pub fn overlay_layout(mode: SurfaceMode, surface: &RenderSurface) -> OverlayLayout {
    match mode {
        SurfaceMode::Viewport => OverlayLayout::Docked {
            side_width: (surface.host.x - surface.size.width).max(MIN_PANEL),
            bottom_height: (surface.host.y - surface.size.height).max(MIN_PANEL / 2.0),
        },
        SurfaceMode::Canvas => OverlayLayout::Floating {
            width: FLOATING_WIDTH.min(surface.size.width / 3.0),
        },
    }
}

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            overlay_ui.run_if(|settings: Res<ViewerSettings>| {
                settings.controls_mode() == ControlsMode::Overlay
            }),
        );
    }
}

fn overlay_ui(
    mut contexts: EguiContexts,
    state: Res<AnatomyState>,
    mode: Res<SurfaceMode>,
    surface: Res<RenderSurface>,
    mut controls: MessageWriter<ControlEvent>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    match overlay_layout(*mode, &surface) {
        OverlayLayout::Docked {
            side_width,
            bottom_height,
        } => {
            egui::SidePanel::right("anatomy_controls")
                .exact_width(side_width)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.heading("Capas");
                    ui.add_space(4.0);
                    controls_contents(ui, &state, &mut controls);
                });

            egui::TopBottomPanel::bottom("anatomy_info")
                .exact_height(bottom_height)
                .resizable(false)
                .show(ctx, |ui| info_contents(ui, &state));
        }
        OverlayLayout::Floating { width } => {
            egui::Window::new("Capas")
                .id(egui::Id::new("anatomy_controls"))
                .anchor(
                    egui::Align2::RIGHT_TOP,
                    [-FLOATING_MARGIN, FLOATING_MARGIN],
                )
                .default_width(width)
                .resizable(false)
                .collapsible(true)
                .show(ctx, |ui| controls_contents(ui, &state, &mut controls));

            egui::Window::new("Información")
                .id(egui::Id::new("anatomy_info"))
                .anchor(
                    egui::Align2::LEFT_BOTTOM,
                    [FLOATING_MARGIN, -FLOATING_MARGIN],
                )
                .default_width(width * 1.5)
                .resizable(false)
                .collapsible(true)
                .show(ctx, |ui| info_contents(ui, &state));
        }
    }
}

fn controls_contents(
    ui: &mut egui::Ui,
    state: &AnatomyState,
    controls: &mut MessageWriter<ControlEvent>,
) {
    for layer in Layer::ALL {
        let mut visible = state.0.is_layer_visible(layer);
        if ui.checkbox(&mut visible, layer.label()).changed() {
            controls.write(ControlEvent::LayerToggled { layer, visible });
        }
    }

    ui.separator();
    ui.label("Opacidad");
    ui.horizontal(|ui| {
        let mut opacity = state.0.opacity();
        let slider = egui::Slider::new(&mut opacity, 0.0..=1.0)
            .step_by(0.01)
            .show_value(false);
        if ui.add(slider).changed() {
            controls.write(ControlEvent::OpacityChanged(opacity));
        }
        ui.monospace(state.0.opacity_readout());
    });
}

fn info_contents(ui: &mut egui::Ui, state: &AnatomyState) {
    match state.0.info() {
        Some(card) => {
            ui.strong(&card.name);
            ui.add_space(6.0);
            ui.label(&card.description);
        }
        None => {
            ui.weak(INFO_PLACEHOLDER);
        }
    }
}
