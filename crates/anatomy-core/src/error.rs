//! Error types for body construction, state updates and configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BodyError {
    #[error("Duplicate part name: {0}")]
    DuplicateName(String),
    #[error("Invalid opacity value: {0}")]
    InvalidOpacity(f32),
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}
