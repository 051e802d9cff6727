//! Native-module call bridge for the platform adapters in [`crate::native`].
//!
//! Each function issues exactly one call into the JS-registered native module named by
//! `module` and returns the raw payload or the raw native rejection.

mod interop;

use dynalinks_host::{NativeConfig, NativeError};
use serde_json::Value;

pub(crate) async fn native_configure(
    module: &str,
    config: &NativeConfig,
) -> Result<(), NativeError> {
    interop::native_configure(module, config).await
}

pub(crate) async fn native_check_for_deferred_deep_link(
    module: &str,
) -> Result<Value, NativeError> {
    interop::native_check_for_deferred_deep_link(module).await
}

pub(crate) async fn native_resolve_link(module: &str, url: &str) -> Result<Value, NativeError> {
    interop::native_resolve_link(module, url).await
}
