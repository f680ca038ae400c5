//! Shared helpers for WASM API operations
//!
//! Serialization to and from JavaScript values with error logging, and
//! conversion of crate errors into `JsValue`s.

use crate::renderers::RenderConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| to_js_error(error_context, e))
}

/// Deserialize an optional argument, falling back to the default when it
/// is `undefined` or `null`
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    deserialize(value, error_context)
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| to_js_error(error_context, e))
}

/// Render configuration argument, default when omitted
pub fn render_config(value: JsValue) -> Result<RenderConfig, JsValue> {
    deserialize_or_default(value, "Invalid render configuration")
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Log an error and turn it into a JavaScript string value
pub fn to_js_error(context: &str, error: impl Display) -> JsValue {
    let msg = format!("{}: {}", context, error);
    log::error!("{}", msg);
    JsValue::from_str(&msg)
}
