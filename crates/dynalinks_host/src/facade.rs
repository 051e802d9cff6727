//! Promise-style facade over a [`NativeBridge`].
//!
//! Every operation issues exactly one bridge call and either returns a normalized value or a
//! [`DynalinksError`]. Overlapping calls are neither queued nor serialized here.

use std::rc::Rc;

use crate::{
    bridge::NativeBridge,
    config::Configuration,
    error::{DynalinksError, ErrorCode, NativeError},
    link::{normalize_native_result, DeepLinkResult},
    platform::BridgePlatform,
};

/// Version of this binding layer.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application-facing Dynalinks client.
#[derive(Clone)]
pub struct Dynalinks {
    bridge: Rc<dyn NativeBridge>,
    platform: BridgePlatform,
}

impl std::fmt::Debug for Dynalinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dynalinks")
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

impl Dynalinks {
    /// Wraps a bridge for the given platform.
    pub fn new(bridge: Rc<dyn NativeBridge>, platform: BridgePlatform) -> Self {
        Self { bridge, platform }
    }

    /// Returns the binding layer version.
    pub const fn version() -> &'static str {
        SDK_VERSION
    }

    /// Returns the platform backing this client.
    pub const fn platform(&self) -> BridgePlatform {
        self.platform
    }

    fn normalize(&self, err: &NativeError) -> DynalinksError {
        let normalized = err.normalize();
        let referrer_code = matches!(
            normalized.code(),
            ErrorCode::InstallReferrerUnavailable | ErrorCode::InstallReferrerTimeout
        );
        if referrer_code && !self.platform.uses_install_referrer() {
            tracing::warn!(
                platform = %self.platform,
                code = normalized.code().as_str(),
                "install referrer error reported by a platform without install referrer"
            );
        }
        normalized
    }

    /// Validates `config`, applies defaults, and configures the native SDK.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_API_KEY` or `INVALID_URL` without calling the bridge when validation
    /// fails, and the normalized native error when the bridge rejects.
    pub async fn configure(&self, config: &Configuration) -> Result<(), DynalinksError> {
        let native = config.validate()?;
        tracing::debug!(
            platform = %self.platform,
            log_level = native.log_level.as_str(),
            allow_simulator = native.allow_simulator,
            custom_base_url = native.base_url.is_some(),
            "forwarding configure"
        );
        self.bridge
            .configure(&native)
            .await
            .map_err(|err| self.normalize(&err))
    }

    /// Checks for a deferred deep link. The result always has `is_deferred == true`.
    ///
    /// # Errors
    ///
    /// Returns the normalized native error, e.g. `NOT_CONFIGURED` or `SIMULATOR`.
    pub async fn check_for_deferred_deep_link(&self) -> Result<DeepLinkResult, DynalinksError> {
        tracing::debug!(platform = %self.platform, "forwarding deferred deep link check");
        let raw = self
            .bridge
            .check_for_deferred_deep_link()
            .await
            .map_err(|err| self.normalize(&err))?;
        Ok(normalize_native_result(&raw, true))
    }

    /// Resolves a URL received by the app. The result always has `is_deferred == false`.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_URL` without calling the bridge for a blank URL, otherwise the
    /// normalized native error.
    pub async fn resolve_link(&self, url: &str) -> Result<DeepLinkResult, DynalinksError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DynalinksError::new(
                ErrorCode::InvalidUrl,
                "url is required and cannot be empty",
            ));
        }
        tracing::debug!(platform = %self.platform, "forwarding link resolution");
        let raw = self
            .bridge
            .resolve_link(url)
            .await
            .map_err(|err| self.normalize(&err))?;
        Ok(normalize_native_result(&raw, false))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use tracing_test::traced_test;

    use super::*;
    use crate::bridge::MemoryNativeBridge;

    fn client(bridge: MemoryNativeBridge, platform: BridgePlatform) -> Dynalinks {
        Dynalinks::new(Rc::new(bridge), platform)
    }

    #[traced_test]
    #[test]
    fn referrer_error_from_ios_is_flagged() {
        let bridge = MemoryNativeBridge::new()
            .with_configure_error(NativeError::new("INSTALL_REFERRER_TIMEOUT", "timed out"));
        let dynalinks = client(bridge, BridgePlatform::Ios);

        let err = block_on(dynalinks.configure(&Configuration::new("k"))).expect_err("reject");

        assert_eq!(err.code(), ErrorCode::InstallReferrerTimeout);
        assert!(logs_contain("platform without install referrer"));
    }

    #[traced_test]
    #[test]
    fn referrer_error_from_android_is_expected() {
        let bridge = MemoryNativeBridge::new()
            .with_configure_error(NativeError::new("INSTALL_REFERRER_UNAVAILABLE", "no service"));
        let dynalinks = client(bridge, BridgePlatform::Android);

        let err = block_on(dynalinks.configure(&Configuration::new("k"))).expect_err("reject");

        assert_eq!(err.code(), ErrorCode::InstallReferrerUnavailable);
        assert!(!logs_contain("platform without install referrer"));
    }
}
