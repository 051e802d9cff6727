//! iOS and Android native-module adapters.
//!
//! Both platforms expose the same three methods; they differ only in the name the native
//! module registers under.

use dynalinks_host::{NativeBridge, NativeBridgeFuture, NativeConfig, NativeError};
use serde_json::Value;

use crate::bridge;

/// Registered name of the iOS native module.
pub const IOS_NATIVE_MODULE: &str = "DynalinksSDK";
/// Registered name of the Android native module.
pub const ANDROID_NATIVE_MODULE: &str = "DynalinksModule";

#[derive(Debug, Clone, Copy, Default)]
/// iOS adapter backed by the bridge interop layer.
pub struct IosNativeBridge;

impl NativeBridge for IosNativeBridge {
    fn configure<'a>(
        &'a self,
        config: &'a NativeConfig,
    ) -> NativeBridgeFuture<'a, Result<(), NativeError>> {
        Box::pin(async move { bridge::native_configure(IOS_NATIVE_MODULE, config).await })
    }

    fn check_for_deferred_deep_link<'a>(
        &'a self,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>> {
        Box::pin(async move {
            bridge::native_check_for_deferred_deep_link(IOS_NATIVE_MODULE).await
        })
    }

    fn resolve_link<'a>(
        &'a self,
        url: &'a str,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>> {
        Box::pin(async move { bridge::native_resolve_link(IOS_NATIVE_MODULE, url).await })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Android adapter backed by the bridge interop layer.
///
/// The Android module reports malformed intents as `INVALID_INTENT`, which normalizes to
/// `INVALID_URL`.
pub struct AndroidNativeBridge;

impl NativeBridge for AndroidNativeBridge {
    fn configure<'a>(
        &'a self,
        config: &'a NativeConfig,
    ) -> NativeBridgeFuture<'a, Result<(), NativeError>> {
        Box::pin(async move { bridge::native_configure(ANDROID_NATIVE_MODULE, config).await })
    }

    fn check_for_deferred_deep_link<'a>(
        &'a self,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>> {
        Box::pin(async move {
            bridge::native_check_for_deferred_deep_link(ANDROID_NATIVE_MODULE).await
        })
    }

    fn resolve_link<'a>(
        &'a self,
        url: &'a str,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>> {
        Box::pin(async move { bridge::native_resolve_link(ANDROID_NATIVE_MODULE, url).await })
    }
}
