//! wasm32 bindings that expose the Dynalinks native SDK to application JavaScript.
//!
//! The native module behind the promise API is chosen at build time:
//! - `native-ios` talks to the iOS module
//! - `native-android` talks to the Android module
//! - `native-stub` (or no feature) uses the no-op bridge
//!
//! Native calls go through `bridge::interop`, which holds the wasm transport and a non-wasm
//! fallback that rejects every call.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time platform selection and the adapter that erases the concrete native module.
pub mod adapters;
mod bridge;
#[cfg(target_arch = "wasm32")]
pub mod exports;
pub mod js_error;
pub mod native;

pub use adapters::{
    bridge_platform_name, build_client, native_bridge, selected_bridge_platform,
    NativeBridgeAdapter,
};
pub use js_error::{invalid_configuration, to_js_error, JS_ERROR_NAME};
pub use native::{AndroidNativeBridge, IosNativeBridge, ANDROID_NATIVE_MODULE, IOS_NATIVE_MODULE};
