//! Anatomy Desktop - native window entry point
//!
//! Runs the viewer in an OS window with the egui control overlay. The render
//! surface takes the configured fraction of the window; the layer and opacity
//! controls sit to its right and the info panel below it.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use anatomy_core::config::{self, ControlsMode};
use anatomy_scene::{AnatomyScenePlugin, SurfaceMode};
use bevy::prelude::*;
use bevy::winit::WinitSettings;
use bevy_egui::EguiPlugin;
use bevy_picking::DefaultPickingPlugins;

#[derive(Parser, Debug)]
#[command(name = "anatomy")]
#[command(about = "Interactive stylized human body viewer")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "anatomy.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Write a default configuration file to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&args.log_level))
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Anatomy viewer v{}", env!("CARGO_PKG_VERSION"));

    if args.write_default_config {
        config::save_default_config(&args.config)?;
        info!("Wrote default configuration to {:?}", args.config);
        return Ok(());
    }

    let mut config = config::load_config(&args.config)?;
    // No host page here, so the controls are always drawn by the viewer
    config.controls.mode = ControlsMode::Overlay;

    info!(
        width = config.viewport.width_fraction,
        height = config.viewport.height_fraction,
        "Configuration loaded"
    );

    let scene = AnatomyScenePlugin::new(config, SurfaceMode::Viewport)?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Visor anatómico".to_string(),
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
        .run();

    Ok(())
}
