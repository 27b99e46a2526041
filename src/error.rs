//! Error Types
//!
//! Failures raised by page glue and server/API requests.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("element {0} not found")]
    MissingElement(String),
    #[error("data island #{id} is not valid JSON: {message}")]
    Island { id: String, message: String },
    #[error("browser window is not available")]
    NoWindow,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out after {0} ms")]
    Timeout(u32),
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Best-effort text of a thrown JS value
pub fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

impl From<JsValue> for FormError {
    fn from(value: JsValue) -> Self {
        FormError::Transport(js_message(&value))
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::Decode(err.to_string())
    }
}
