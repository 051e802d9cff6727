//! wasm-bindgen promise API consumed by application JavaScript.
//!
//! Each export resolves with a normalized value or rejects with a `DynalinksError` JS `Error`
//! carrying a stable `code`.

use dynalinks_host::{
    Configuration, DeepLinkResult, Dynalinks, DynalinksError, ErrorCode, SDK_VERSION,
};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

use crate::adapters;
use crate::js_error::{invalid_configuration, to_js_error};

thread_local! {
    static CLIENT: Dynalinks = adapters::build_client();
}

fn client() -> Dynalinks {
    CLIENT.with(Clone::clone)
}

fn result_to_js(result: &DeepLinkResult) -> Result<JsValue, JsValue> {
    result
        .serialize(&Serializer::json_compatible())
        .map_err(|e| to_js_error(&DynalinksError::new(ErrorCode::InvalidResponse, e.to_string())))
}

/// Reads the JS configuration object. `null`/`undefined` reads as an empty configuration so
/// validation reports the missing key.
fn read_configuration(config: JsValue) -> Result<Configuration, DynalinksError> {
    if config.is_null() || config.is_undefined() {
        return Ok(Configuration::default());
    }
    from_value(config).map_err(invalid_configuration)
}

/// Configures the SDK. Must resolve before the other operations are used.
#[wasm_bindgen(js_name = configure)]
pub async fn configure(config: JsValue) -> Result<(), JsValue> {
    let config = read_configuration(config).map_err(|err| to_js_error(&err))?;
    client()
        .configure(&config)
        .await
        .map_err(|err| to_js_error(&err))
}

/// Checks for a deferred deep link captured before install.
#[wasm_bindgen(js_name = checkForDeferredDeepLink)]
pub async fn check_for_deferred_deep_link() -> Result<JsValue, JsValue> {
    let result = client()
        .check_for_deferred_deep_link()
        .await
        .map_err(|err| to_js_error(&err))?;
    result_to_js(&result)
}

/// Resolves a URL the app was opened with.
#[wasm_bindgen(js_name = resolveLink)]
pub async fn resolve_link(url: String) -> Result<JsValue, JsValue> {
    let result = client()
        .resolve_link(&url)
        .await
        .map_err(|err| to_js_error(&err))?;
    result_to_js(&result)
}

/// Version of the binding layer.
#[wasm_bindgen(js_name = version)]
pub fn version() -> String {
    SDK_VERSION.to_string()
}

/// Native platform the build was linked against.
#[wasm_bindgen(js_name = bridgePlatform)]
pub fn bridge_platform() -> String {
    adapters::bridge_platform_name().to_string()
}
