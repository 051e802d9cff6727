//! Shared transport interop for native-module calls.
//!
//! This module routes calls to target-specific implementations while preserving a uniform API
//! for the bridge layer.

use dynalinks_host::{NativeConfig, NativeError};
use serde_json::Value;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub async fn native_configure(module: &str, config: &NativeConfig) -> Result<(), NativeError> {
    imp::native_configure(module, config).await
}

pub async fn native_check_for_deferred_deep_link(module: &str) -> Result<Value, NativeError> {
    imp::native_check_for_deferred_deep_link(module).await
}

pub async fn native_resolve_link(module: &str, url: &str) -> Result<Value, NativeError> {
    imp::native_resolve_link(module, url).await
}
