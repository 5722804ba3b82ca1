//! Viewer configuration loading and defaults

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::describe::DescriptionIndex;
use crate::error::BodyError;
use crate::layer::Layer;
use crate::part::Rgb;
use crate::viewport::Viewport;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub picking: PickingConfig,
    /// Extra or replacement descriptions keyed by exact part name
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Share of the host width given to the render surface
    #[serde(default = "default_width_fraction")]
    pub width_fraction: f32,
    /// Share of the host height given to the render surface
    #[serde(default = "default_height_fraction")]
    pub height_fraction: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width_fraction: default_width_fraction(),
            height_fraction: default_height_fraction(),
        }
    }
}

fn default_width_fraction() -> f32 {
    0.72
}

fn default_height_fraction() -> f32 {
    0.82
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    /// Fixed look-at point the orbit controller turns around
    #[serde(default = "default_camera_target")]
    pub target: [f32; 3],
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            position: default_camera_position(),
            target: default_camera_target(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
        }
    }
}

fn default_fov() -> f32 {
    45.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    1000.0
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 1.6, 4.0]
}

fn default_camera_target() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_min_distance() -> f32 {
    0.5
}

fn default_max_distance() -> f32 {
    50.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_background")]
    pub background: Rgb,
    /// Emissive tint applied to the selected part
    #[serde(default = "default_highlight")]
    pub highlight: Rgb,
    #[serde(default = "default_sky")]
    pub sky_color: Rgb,
    #[serde(default = "default_ground")]
    pub ground_color: Rgb,
    #[serde(default = "default_hemisphere_intensity")]
    pub hemisphere_intensity: f32,
    #[serde(default = "default_directional_intensity")]
    pub directional_intensity: f32,
    #[serde(default = "default_directional_position")]
    pub directional_position: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            highlight: default_highlight(),
            sky_color: default_sky(),
            ground_color: default_ground(),
            hemisphere_intensity: default_hemisphere_intensity(),
            directional_intensity: default_directional_intensity(),
            directional_position: default_directional_position(),
        }
    }
}

fn default_background() -> Rgb {
    Rgb(0xf8fafc)
}

fn default_highlight() -> Rgb {
    Rgb(0x222222)
}

fn default_sky() -> Rgb {
    Rgb(0xffffff)
}

fn default_ground() -> Rgb {
    Rgb(0x444444)
}

fn default_hemisphere_intensity() -> f32 {
    1.0
}

fn default_directional_intensity() -> f32 {
    0.8
}

fn default_directional_position() -> [f32; 3] {
    [3.0, 10.0, 10.0]
}

/// Where the layer toggles and opacity slider live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlsMode {
    /// Elements provided by the host page, bound by id
    #[default]
    Host,
    /// egui panel drawn by the viewer itself
    Overlay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default)]
    pub mode: ControlsMode,
    /// Host element that receives the render canvas
    #[serde(default = "default_mount_id")]
    pub mount_id: String,
    #[serde(default = "default_canvas_id")]
    pub canvas_id: String,
    #[serde(default = "default_opacity_id")]
    pub opacity_id: String,
    #[serde(default = "default_readout_id")]
    pub readout_id: String,
    #[serde(default = "default_info_id")]
    pub info_id: String,
    #[serde(default)]
    pub layers: LayerControlIds,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            mode: ControlsMode::default(),
            mount_id: default_mount_id(),
            canvas_id: default_canvas_id(),
            opacity_id: default_opacity_id(),
            readout_id: default_readout_id(),
            info_id: default_info_id(),
            layers: LayerControlIds::default(),
        }
    }
}

fn default_mount_id() -> String {
    "canvas-wrap".to_string()
}

fn default_canvas_id() -> String {
    "anatomy-canvas".to_string()
}

fn default_opacity_id() -> String {
    "opacity".to_string()
}

fn default_readout_id() -> String {
    "op-val".to_string()
}

fn default_info_id() -> String {
    "selected-info".to_string()
}

/// Checkbox ids per layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerControlIds {
    #[serde(default = "default_skeleton_id")]
    pub skeleton: String,
    #[serde(default = "default_muscles_id")]
    pub muscles: String,
    #[serde(default = "default_organs_id")]
    pub organs: String,
    #[serde(default = "default_head_id")]
    pub head: String,
}

impl Default for LayerControlIds {
    fn default() -> Self {
        Self {
            skeleton: default_skeleton_id(),
            muscles: default_muscles_id(),
            organs: default_organs_id(),
            head: default_head_id(),
        }
    }
}

impl LayerControlIds {
    pub fn get(&self, layer: Layer) -> &str {
        match layer {
            Layer::Skeleton => &self.skeleton,
            Layer::Muscles => &self.muscles,
            Layer::Organs => &self.organs,
            Layer::Head => &self.head,
        }
    }
}

fn default_skeleton_id() -> String {
    Layer::Skeleton.default_control_id()
}

fn default_muscles_id() -> String {
    Layer::Muscles.default_control_id()
}

fn default_organs_id() -> String {
    Layer::Organs.default_control_id()
}

fn default_head_id() -> String {
    Layer::Head.default_control_id()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickingConfig {
    /// Intersect parts whose layer is hidden; `false` restricts picks to
    /// what is on screen
    #[serde(default = "default_include_hidden")]
    pub include_hidden: bool,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            include_hidden: default_include_hidden(),
        }
    }
}

fn default_include_hidden() -> bool {
    true
}

impl ViewerConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, BodyError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, BodyError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport.width_fraction, self.viewport.height_fraction)
    }

    /// Built-in descriptions merged with the configured overrides
    pub fn description_index(&self) -> DescriptionIndex {
        DescriptionIndex::with_overrides(
            self.descriptions
                .iter()
                .map(|(name, text)| (name.clone(), text.clone())),
        )
    }
}

/// Load configuration from file, falling back to defaults when it is missing
pub fn load_config(path: &Path) -> Result<ViewerConfig, BodyError> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config = ViewerConfig::from_toml(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(ViewerConfig::default())
    }
}

/// Save default configuration to file
pub fn save_default_config(path: &Path) -> Result<(), BodyError> {
    let mut config = ViewerConfig::default();
    config.descriptions.insert(
        "Ojo izquierdo".to_string(),
        "Órgano de la visión; capta la luz y la envía al cerebro.".to_string(),
    );
    std::fs::write(path, config.to_toml()?)?;
    Ok(())
}
