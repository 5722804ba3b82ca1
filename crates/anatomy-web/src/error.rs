//! Host page errors

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("No browser window")]
    NoWindow,

    #[error("Window has no document")]
    NoDocument,

    #[error("Required element #{0} not found")]
    MissingElement(String),

    #[error("Element #{0} is not an <input>")]
    NotAnInput(String),

    #[error("DOM call failed: {0}")]
    Dom(String),

    #[error("Body setup failed: {0}")]
    Body(#[from] anatomy_core::BodyError),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        HostError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<HostError> for JsValue {
    fn from(error: HostError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
