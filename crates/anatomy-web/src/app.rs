//! Bevy application setup

use anatomy_core::config::ControlsMode;
use anatomy_scene::{AnatomyScenePlugin, SurfaceMode};
use bevy::prelude::*;
use bevy::winit::WinitSettings;
use bevy_egui::EguiPlugin;
use bevy_picking::DefaultPickingPlugins;
use tracing::info;

use crate::bridge::{BridgePlugin, HostOutputs, PendingControls, PendingResize};
use crate::dom;
use crate::error::HostError;

pub fn run() -> Result<(), HostError> {
    let window = dom::window()?;
    let document = dom::document()?;

    let config = dom::load_inline_config(&document);
    let canvas = dom::mount_canvas(&document, &config.controls)?;

    let controls = PendingControls::default();
    let resize = PendingResize::default();

    let outputs = match config.controls.mode {
        ControlsMode::Host => {
            dom::bind_controls(&document, &config.controls, &controls)?;
            Some(HostOutputs {
                readout_id: config.controls.readout_id.clone(),
                info_id: config.controls.info_id.clone(),
            })
        }
        ControlsMode::Overlay => None,
    };
    dom::bind_resize(&window, &resize)?;

    let scene = AnatomyScenePlugin::new(config, SurfaceMode::Canvas)?;
    info!("Starting viewer on {}", canvas);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Visor anatómico".to_string(),
                canvas: Some(canvas),
                // The surface is sized from the host viewport, not the parent
                fit_canvas_to_parent: false,
                prevent_default_event_handling: false,
                ..default()
            }),
            ..default()
        }))
        // Redraw every frame
        .insert_resource(WinitSettings::game())
        // These must be added BEFORE EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(EguiPlugin::default())
        .add_plugins(scene)
        .add_plugins(BridgePlugin {
            controls,
            resize,
            outputs,
        })
        .run();

    Ok(())
}
