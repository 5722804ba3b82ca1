//! Shared resources, components and messages

use anatomy_core::config::ControlsMode;
use anatomy_core::{
    Anatomy, InfoCard, Layer, OrbitCamera, PartId, PerspectiveCamera, Ray, Rgb, SurfaceSize,
    ViewerConfig,
};
use bevy::prelude::*;

/// The viewer state every control and pick event mutates
#[derive(Debug, Clone, Resource)]
pub struct AnatomyState(pub Anatomy);

/// Configuration the app was started with
#[derive(Debug, Clone, Resource)]
pub struct ViewerSettings(pub ViewerConfig);

impl ViewerSettings {
    pub fn controls_mode(&self) -> ControlsMode {
        self.0.controls.mode
    }
}

/// How the render surface is fitted into its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource)]
pub enum SurfaceMode {
    /// The window itself is the surface (a canvas sized inside a web page)
    Canvas,
    /// The camera renders into a sub-rectangle of a larger OS window
    Viewport,
}

/// Current host and surface dimensions in logical pixels
#[derive(Debug, Clone, Resource)]
pub struct RenderSurface {
    pub host: Vec2,
    pub size: SurfaceSize,
}

impl RenderSurface {
    pub fn new(config: &ViewerConfig) -> Self {
        let host = Vec2::new(1280.0, 800.0);
        Self {
            host,
            size: config.viewport().surface_size(host.x, host.y),
        }
    }
}

/// Orbit pose plus lens parameters of the main camera
#[derive(Debug, Clone, Resource)]
pub struct ViewerCamera {
    pub orbit: OrbitCamera,
    pub lens: PerspectiveCamera,
}

impl ViewerCamera {
    pub fn from_config(config: &ViewerConfig) -> Self {
        let camera = &config.camera;
        let position = Vec3::from_array(camera.position);
        let target = Vec3::from_array(camera.target);
        let orbit = OrbitCamera::looking_at(to_core(position), to_core(target))
            .with_distance_limits(camera.min_distance, camera.max_distance);

        let size = RenderSurface::new(config).size;
        let mut lens =
            PerspectiveCamera::new(camera.fov_degrees, size.aspect(), camera.near, camera.far);
        orbit.apply(&mut lens);

        Self { orbit, lens }
    }

    /// Camera translation for the current orbit pose
    pub fn position(&self) -> Vec3 {
        from_core(self.orbit.position())
    }

    pub fn target(&self) -> Vec3 {
        from_core(self.orbit.target)
    }

    /// Pick ray through a point in normalized device coordinates
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let mut lens = self.lens;
        self.orbit.apply(&mut lens);
        lens.ray_from_ndc(anatomy_core::glam::Vec2::new(ndc.x, ndc.y))
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Links a mesh entity to its part in [`AnatomyState`]
#[derive(Component, Debug, Clone, Copy)]
pub struct PartEntity {
    pub id: PartId,
    pub layer: Layer,
}

/// Input from the layer toggles and the opacity slider
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    LayerToggled { layer: Layer, visible: bool },
    OpacityChanged(f32),
}

/// The host viewport changed size (logical pixels)
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct HostResized {
    pub width: f32,
    pub height: f32,
}

/// A pick hit a part; carries what the info panel should show
#[derive(Message, Debug, Clone, PartialEq)]
pub struct PartSelected {
    pub part: PartId,
    pub info: InfoCard,
}

/// Bevy and the core crate use the same glam version but convert through
/// arrays so the crates stay decoupled
pub fn to_core(v: Vec3) -> anatomy_core::glam::Vec3 {
    anatomy_core::glam::Vec3::from_array(v.to_array())
}

pub fn from_core(v: anatomy_core::glam::Vec3) -> Vec3 {
    Vec3::from_array(v.to_array())
}

/// sRGB color of a hex value
pub fn srgb(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.to_f32_array();
    Color::srgb(r, g, b)
}
