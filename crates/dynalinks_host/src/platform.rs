//! Native platform identity shared by the facade and build-time adapter selection.

/// Native platform whose module backs the active [`crate::NativeBridge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgePlatform {
    /// iOS native module.
    Ios,
    /// Android native module.
    Android,
    /// No native module; the no-op bridge answers every call.
    Stub,
}

impl BridgePlatform {
    /// Returns a stable string token for diagnostics and runtime inspection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Stub => "stub",
        }
    }

    /// Returns whether the platform attributes installs through an install referrer.
    ///
    /// Only Android reports `INSTALL_REFERRER_*` errors.
    pub const fn uses_install_referrer(self) -> bool {
        matches!(self, Self::Android)
    }
}

impl std::fmt::Display for BridgePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_tokens_are_stable() {
        assert_eq!(BridgePlatform::Ios.as_str(), "ios");
        assert_eq!(BridgePlatform::Android.to_string(), "android");
        assert_eq!(BridgePlatform::Stub.as_str(), "stub");
    }

    #[test]
    fn only_android_uses_install_referrer() {
        assert!(BridgePlatform::Android.uses_install_referrer());
        assert!(!BridgePlatform::Ios.uses_install_referrer());
        assert!(!BridgePlatform::Stub.uses_install_referrer());
    }
}
