//! Anatomy Web - browser front-end
//!
//! Mounts the render canvas inside the host page, binds the page's layer
//! checkboxes and opacity slider, and mirrors the selection into the page's
//! info panel. Pages without controls can switch to the egui overlay through
//! the inline configuration block.

mod app;
mod bridge;
mod dom;
mod error;

use wasm_bindgen::prelude::*;

/// Entry point for WASM module
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging with filtering to reduce wgpu noise
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::WARN)
            .build(),
    );

    app::run().map_err(JsValue::from)
}
