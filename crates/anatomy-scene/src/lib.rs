//! Anatomy Scene - Bevy rendering, controls and picking
//!
//! This crate turns the `anatomy-core` state into a live Bevy scene and is
//! shared by the browser front-end (anatomy-web) and the native viewer
//! (anatomy-desktop). Front-ends add Bevy's default plugins, picking and egui,
//! then [`AnatomyScenePlugin`] and feed [`ControlEvent`] / [`HostResized`]
//! messages from their own environment.

pub mod body;
pub mod camera;
pub mod controls;
pub mod picking;
pub mod resize;
pub mod scene;
pub mod types;
pub mod ui;

use anatomy_core::{Anatomy, BodyError, ViewerConfig};
use bevy::prelude::*;

pub use types::*;

/// Plugin that sets up the anatomy scene and its interaction systems
pub struct AnatomyScenePlugin {
    anatomy: Anatomy,
    config: ViewerConfig,
    surface: SurfaceMode,
}

impl AnatomyScenePlugin {
    /// Build the body from configuration; fails only if part names collide
    pub fn new(config: ViewerConfig, surface: SurfaceMode) -> Result<Self, BodyError> {
        let anatomy = Anatomy::from_config(&config)?;
        Ok(Self {
            anatomy,
            config,
            surface,
        })
    }
}

impl Plugin for AnatomyScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AnatomyState(self.anatomy.clone()))
            .insert_resource(ViewerSettings(self.config.clone()))
            .insert_resource(self.surface)
            .insert_resource(RenderSurface::new(&self.config))
            .insert_resource(ViewerCamera::from_config(&self.config))
            .add_message::<ControlEvent>()
            .add_message::<HostResized>()
            .add_message::<PartSelected>()
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(body::BodyPlugin)
            .add_plugins(camera::CameraPlugin)
            .add_plugins(resize::ResizePlugin)
            .add_plugins(controls::ControlsPlugin)
            .add_plugins(picking::PickingPlugin)
            .add_plugins(ui::OverlayPlugin);
    }
}
