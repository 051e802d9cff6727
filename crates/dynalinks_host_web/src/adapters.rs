use std::rc::Rc;

use dynalinks_host::{
    BridgePlatform, Dynalinks, NativeBridge, NativeBridgeFuture, NativeConfig, NativeError,
    NoopNativeBridge,
};
use serde_json::Value;

use crate::{AndroidNativeBridge, IosNativeBridge};

#[cfg(any(
    all(feature = "native-ios", feature = "native-android"),
    all(feature = "native-ios", feature = "native-stub"),
    all(feature = "native-android", feature = "native-stub"),
))]
compile_error!(
    "features `native-ios`, `native-android`, and `native-stub` are mutually exclusive; enable only one"
);

/// Returns the compile-time selected native platform for the active build.
pub const fn selected_bridge_platform() -> BridgePlatform {
    #[cfg(feature = "native-ios")]
    {
        BridgePlatform::Ios
    }

    #[cfg(feature = "native-android")]
    {
        BridgePlatform::Android
    }

    #[cfg(not(any(feature = "native-ios", feature = "native-android")))]
    {
        BridgePlatform::Stub
    }
}

/// Returns the selected platform as a stable string token.
pub fn bridge_platform_name() -> &'static str {
    selected_bridge_platform().as_str()
}

/// Adapter enum that erases the concrete native module behind [`NativeBridge`].
#[derive(Debug, Clone, Copy)]
pub enum NativeBridgeAdapter {
    /// iOS native module.
    Ios(IosNativeBridge),
    /// Android native module.
    Android(AndroidNativeBridge),
    /// No native module linked.
    Stub(NoopNativeBridge),
}

impl NativeBridgeAdapter {
    /// Builds the adapter for `platform`.
    pub const fn for_platform(platform: BridgePlatform) -> Self {
        match platform {
            BridgePlatform::Ios => Self::Ios(IosNativeBridge),
            BridgePlatform::Android => Self::Android(AndroidNativeBridge),
            BridgePlatform::Stub => Self::Stub(NoopNativeBridge),
        }
    }

    /// Returns the platform this adapter talks to.
    pub const fn platform(&self) -> BridgePlatform {
        match self {
            Self::Ios(_) => BridgePlatform::Ios,
            Self::Android(_) => BridgePlatform::Android,
            Self::Stub(_) => BridgePlatform::Stub,
        }
    }
}

impl NativeBridge for NativeBridgeAdapter {
    fn configure<'a>(
        &'a self,
        config: &'a NativeConfig,
    ) -> NativeBridgeFuture<'a, Result<(), NativeError>> {
        match self {
            Self::Ios(bridge) => bridge.configure(config),
            Self::Android(bridge) => bridge.configure(config),
            Self::Stub(bridge) => bridge.configure(config),
        }
    }

    fn check_for_deferred_deep_link<'a>(
        &'a self,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>> {
        match self {
            Self::Ios(bridge) => bridge.check_for_deferred_deep_link(),
            Self::Android(bridge) => bridge.check_for_deferred_deep_link(),
            Self::Stub(bridge) => bridge.check_for_deferred_deep_link(),
        }
    }

    fn resolve_link<'a>(
        &'a self,
        url: &'a str,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>> {
        match self {
            Self::Ios(bridge) => bridge.resolve_link(url),
            Self::Android(bridge) => bridge.resolve_link(url),
            Self::Stub(bridge) => bridge.resolve_link(url),
        }
    }
}

/// Builds the native bridge adapter for the compile-time selected platform.
pub fn native_bridge() -> NativeBridgeAdapter {
    NativeBridgeAdapter::for_platform(selected_bridge_platform())
}

/// Builds a [`Dynalinks`] client wired to the compile-time selected native module.
pub fn build_client() -> Dynalinks {
    let adapter = native_bridge();
    Dynalinks::new(Rc::new(adapter), adapter.platform())
}
