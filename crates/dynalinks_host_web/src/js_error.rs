//! Conversion of typed errors into JS `Error` objects for promise rejection.

use dynalinks_host::{DynalinksError, ErrorCode};
use wasm_bindgen::JsValue;

/// `name` property set on every rejected error object.
pub const JS_ERROR_NAME: &str = "DynalinksError";

/// Builds a JS `Error` with `name`, `code`, and `message` set from `err`.
pub fn to_js_error(err: &DynalinksError) -> JsValue {
    let js_err = js_sys::Error::new(err.message());
    js_err.set_name(JS_ERROR_NAME);
    let value: JsValue = js_err.into();
    let code = JsValue::from_str(err.code().as_str());
    if js_sys::Reflect::set(&value, &JsValue::from_str("code"), &code).is_err() {
        tracing::warn!(code = err.code().as_str(), "failed to attach code to JS error");
    }
    value
}

/// Typed error for a configuration object that could not be read.
pub fn invalid_configuration(detail: impl std::fmt::Display) -> DynalinksError {
    DynalinksError::new(
        ErrorCode::Unknown,
        format!("Invalid Dynalinks configuration: {detail}"),
    )
}
