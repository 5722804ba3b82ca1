//! Anatomical layers

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four anatomical layers a part belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Skeleton,
    Muscles,
    Organs,
    Head,
}

impl Layer {
    /// All layers in build order
    pub const ALL: [Layer; 4] = [Layer::Skeleton, Layer::Muscles, Layer::Organs, Layer::Head];

    /// Stable key used in config files and control ids
    pub fn key(self) -> &'static str {
        match self {
            Layer::Skeleton => "skeleton",
            Layer::Muscles => "muscles",
            Layer::Organs => "organs",
            Layer::Head => "head",
        }
    }

    /// Label shown next to the layer toggle
    pub fn label(self) -> &'static str {
        match self {
            Layer::Skeleton => "Esqueleto",
            Layer::Muscles => "Músculos",
            Layer::Organs => "Órganos",
            Layer::Head => "Cabeza",
        }
    }

    /// Default id of the host page checkbox bound to this layer
    pub fn default_control_id(self) -> String {
        format!("toggle-{}", self.key())
    }

    pub fn index(self) -> usize {
        match self {
            Layer::Skeleton => 0,
            Layer::Muscles => 1,
            Layer::Organs => 2,
            Layer::Head => 3,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
