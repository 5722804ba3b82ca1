//! Anatomy Core - Body catalog, picking math and viewer state
//!
//! This crate holds everything about the anatomy viewer that does not need a
//! renderer:
//! - The hand-authored body catalog (four layers of primitive parts)
//! - The read-only description index behind the info panel
//! - Ray casting against the analytic primitives
//! - Orbit camera and viewport math
//! - The explicit application state (`Anatomy`) mutated by control and pick events

pub mod anatomy;
pub mod body;
pub mod camera;
pub mod config;
pub mod describe;
pub mod error;
pub mod layer;
pub mod part;
pub mod ray;
pub mod shape;
pub mod viewport;

pub use anatomy::{Anatomy, InfoCard, Selection};
pub use body::{build_body, BodyPlan};
pub use camera::{OrbitCamera, PerspectiveCamera};
pub use config::ViewerConfig;
pub use describe::DescriptionIndex;
pub use error::BodyError;
pub use layer::Layer;
pub use part::{Part, PartId, PartMaterial, PartSpec, Rgb};
pub use ray::{Hit, Ray};
pub use shape::Shape;
pub use viewport::{client_to_ndc, SurfaceRect, SurfaceSize, Viewport};

pub use glam;
