//! Typed error taxonomy and native error normalization.
//!
//! Native modules reject with an opaque `(code, message)` pair. [`normalize_native_error`] maps
//! that pair onto the closed [`DynalinksError`] sum type so callers can branch on a stable
//! [`ErrorCode`] regardless of platform.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed guidance message for [`DynalinksError::NotConfigured`].
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Dynalinks is not configured. Call configure() with your client API key first.";
/// Placeholder message used when neither the code nor a message identify the failure.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Stable machine-readable error code exposed to application code.
pub enum ErrorCode {
    /// `configure` has not completed successfully.
    NotConfigured,
    /// The client API key is blank or was rejected.
    InvalidApiKey,
    /// Running on a simulator/emulator without `allowSimulator`.
    Simulator,
    /// Transport failure reaching the Dynalinks service.
    NetworkError,
    /// The service answered with a failure status.
    ServerError,
    /// The service answered with an unparseable body.
    InvalidResponse,
    /// No link matched the install or URL.
    NoMatch,
    /// Android install referrer service is unavailable.
    InstallReferrerUnavailable,
    /// Android install referrer lookup timed out.
    InstallReferrerTimeout,
    /// The URL (or Android intent) passed for resolution is malformed.
    InvalidUrl,
    /// Catch-all for codes outside the fixed table.
    Unknown,
}

impl ErrorCode {
    /// Every code in declaration order.
    pub const ALL: [Self; 11] = [
        Self::NotConfigured,
        Self::InvalidApiKey,
        Self::Simulator,
        Self::NetworkError,
        Self::ServerError,
        Self::InvalidResponse,
        Self::NoMatch,
        Self::InstallReferrerUnavailable,
        Self::InstallReferrerTimeout,
        Self::InvalidUrl,
        Self::Unknown,
    ];

    /// Returns the stable string token for this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::Simulator => "SIMULATOR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::ServerError => "SERVER_ERROR",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::NoMatch => "NO_MATCH",
            Self::InstallReferrerUnavailable => "INSTALL_REFERRER_UNAVAILABLE",
            Self::InstallReferrerTimeout => "INSTALL_REFERRER_TIMEOUT",
            Self::InvalidUrl => "INVALID_URL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Exact-match lookup of a native code. `INVALID_INTENT` is the Android spelling of
    /// `INVALID_URL`.
    ///
    /// Returns `None` for codes outside the fixed table; note that the literal `UNKNOWN` also
    /// maps here to [`ErrorCode::Unknown`].
    pub fn from_native(code: &str) -> Option<Self> {
        let code = match code {
            "NOT_CONFIGURED" => Self::NotConfigured,
            "INVALID_API_KEY" => Self::InvalidApiKey,
            "SIMULATOR" => Self::Simulator,
            "NETWORK_ERROR" => Self::NetworkError,
            "SERVER_ERROR" => Self::ServerError,
            "INVALID_RESPONSE" => Self::InvalidResponse,
            "NO_MATCH" => Self::NoMatch,
            "INSTALL_REFERRER_UNAVAILABLE" => Self::InstallReferrerUnavailable,
            "INSTALL_REFERRER_TIMEOUT" => Self::InstallReferrerTimeout,
            "INVALID_URL" | "INVALID_INTENT" => Self::InvalidUrl,
            "UNKNOWN" => Self::Unknown,
            _ => return None,
        };
        Some(code)
    }

    /// Message used when the native layer sends none.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::NotConfigured => NOT_CONFIGURED_MESSAGE,
            Self::InvalidApiKey => "Invalid client API key",
            Self::Simulator => {
                "Deferred deep linking is not available on simulators. Set allowSimulator to true for testing."
            }
            Self::NetworkError => "A network error occurred while contacting Dynalinks",
            Self::ServerError => "The Dynalinks server returned an error",
            Self::InvalidResponse => "The Dynalinks server returned an invalid response",
            Self::NoMatch => "No matching deep link was found",
            Self::InstallReferrerUnavailable => "Install referrer is not available on this device",
            Self::InstallReferrerTimeout => "Timed out waiting for the install referrer",
            Self::InvalidUrl => "The provided URL is invalid",
            Self::Unknown => UNKNOWN_ERROR_MESSAGE,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed Dynalinks failure surfaced to application code.
///
/// Every variant carries a stable [`ErrorCode`] (see [`DynalinksError::code`]). All variants
/// except [`DynalinksError::NotConfigured`] carry a message, which is the native message when
/// one was sent and the code's default message otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DynalinksError {
    /// `configure` has not completed successfully.
    #[error("{}", NOT_CONFIGURED_MESSAGE)]
    NotConfigured,
    /// The client API key is blank or was rejected.
    #[error("{message}")]
    InvalidApiKey {
        /// Human-readable detail.
        message: String,
    },
    /// Running on a simulator/emulator without `allowSimulator`.
    #[error("{message}")]
    Simulator {
        /// Human-readable detail.
        message: String,
    },
    /// Transport failure.
    #[error("{message}")]
    NetworkError {
        /// Human-readable detail.
        message: String,
    },
    /// Remote failure status.
    #[error("{message}")]
    ServerError {
        /// Human-readable detail.
        message: String,
    },
    /// Remote response could not be interpreted.
    #[error("{message}")]
    InvalidResponse {
        /// Human-readable detail.
        message: String,
    },
    /// No link matched.
    #[error("{message}")]
    NoMatch {
        /// Human-readable detail.
        message: String,
    },
    /// Install referrer service unavailable.
    #[error("{message}")]
    InstallReferrerUnavailable {
        /// Human-readable detail.
        message: String,
    },
    /// Install referrer lookup timed out.
    #[error("{message}")]
    InstallReferrerTimeout {
        /// Human-readable detail.
        message: String,
    },
    /// Malformed URL or intent.
    #[error("{message}")]
    InvalidUrl {
        /// Human-readable detail.
        message: String,
    },
    /// Anything outside the fixed table.
    #[error("{message}")]
    Unknown {
        /// Human-readable detail.
        message: String,
    },
}

impl DynalinksError {
    /// Builds the variant for `code` with the given message.
    ///
    /// `NotConfigured` ignores the message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            ErrorCode::NotConfigured => Self::NotConfigured,
            ErrorCode::InvalidApiKey => Self::InvalidApiKey { message },
            ErrorCode::Simulator => Self::Simulator { message },
            ErrorCode::NetworkError => Self::NetworkError { message },
            ErrorCode::ServerError => Self::ServerError { message },
            ErrorCode::InvalidResponse => Self::InvalidResponse { message },
            ErrorCode::NoMatch => Self::NoMatch { message },
            ErrorCode::InstallReferrerUnavailable => Self::InstallReferrerUnavailable { message },
            ErrorCode::InstallReferrerTimeout => Self::InstallReferrerTimeout { message },
            ErrorCode::InvalidUrl => Self::InvalidUrl { message },
            ErrorCode::Unknown => Self::Unknown { message },
        }
    }

    /// Builds the variant for `code` with its default message.
    pub fn with_default_message(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Returns the stable code for this error.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotConfigured => ErrorCode::NotConfigured,
            Self::InvalidApiKey { .. } => ErrorCode::InvalidApiKey,
            Self::Simulator { .. } => ErrorCode::Simulator,
            Self::NetworkError { .. } => ErrorCode::NetworkError,
            Self::ServerError { .. } => ErrorCode::ServerError,
            Self::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            Self::NoMatch { .. } => ErrorCode::NoMatch,
            Self::InstallReferrerUnavailable { .. } => ErrorCode::InstallReferrerUnavailable,
            Self::InstallReferrerTimeout { .. } => ErrorCode::InstallReferrerTimeout,
            Self::InvalidUrl { .. } => ErrorCode::InvalidUrl,
            Self::Unknown { .. } => ErrorCode::Unknown,
        }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::NotConfigured => NOT_CONFIGURED_MESSAGE,
            Self::InvalidApiKey { message }
            | Self::Simulator { message }
            | Self::NetworkError { message }
            | Self::ServerError { message }
            | Self::InvalidResponse { message }
            | Self::NoMatch { message }
            | Self::InstallReferrerUnavailable { message }
            | Self::InstallReferrerTimeout { message }
            | Self::InvalidUrl { message }
            | Self::Unknown { message } => message,
        }
    }

    /// Returns the `{code, message}` transfer shape.
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code(),
            message: self.message().to_string(),
        }
    }
}

impl Serialize for DynalinksError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Serialized `{code, message}` form of a [`DynalinksError`].
pub struct ErrorPayload {
    /// Stable code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Raw rejection reported by a native module, before normalization.
pub struct NativeError {
    /// Native error code, if any.
    #[serde(default)]
    pub code: Option<String>,
    /// Native error message, if any.
    #[serde(default)]
    pub message: Option<String>,
}

impl NativeError {
    /// Creates a native error with both parts present.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
        }
    }

    /// Creates a code-less native error, used for transport failures in adapters.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: Some(message.into()),
        }
    }

    /// Normalizes this error into a [`DynalinksError`].
    pub fn normalize(&self) -> DynalinksError {
        normalize_native_error(self.code.as_deref(), self.message.as_deref())
    }
}

/// Maps a native `(code, message)` pair to a typed error. Never fails.
///
/// Codes are matched exactly against the fixed table; anything else becomes
/// [`DynalinksError::Unknown`] carrying the native message. Empty or absent messages fall back to
/// the code's default message.
pub fn normalize_native_error(code: Option<&str>, message: Option<&str>) -> DynalinksError {
    let message = message.filter(|text| !text.trim().is_empty());
    let resolved = code.and_then(ErrorCode::from_native);
    let code = match resolved {
        Some(code) => code,
        None => {
            tracing::warn!(
                native_code = code.unwrap_or("<absent>"),
                "unrecognized native error code; reporting UNKNOWN"
            );
            ErrorCode::Unknown
        }
    };
    match message {
        Some(message) => DynalinksError::new(code, message),
        None => DynalinksError::with_default_message(code),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;

    #[test]
    fn every_table_code_maps_to_its_variant_with_verbatim_message() {
        let table = [
            ("INVALID_API_KEY", ErrorCode::InvalidApiKey),
            ("SIMULATOR", ErrorCode::Simulator),
            ("NETWORK_ERROR", ErrorCode::NetworkError),
            ("SERVER_ERROR", ErrorCode::ServerError),
            ("INVALID_RESPONSE", ErrorCode::InvalidResponse),
            ("NO_MATCH", ErrorCode::NoMatch),
            (
                "INSTALL_REFERRER_UNAVAILABLE",
                ErrorCode::InstallReferrerUnavailable,
            ),
            ("INSTALL_REFERRER_TIMEOUT", ErrorCode::InstallReferrerTimeout),
            ("INVALID_URL", ErrorCode::InvalidUrl),
        ];

        for (native, expected) in table {
            let err = normalize_native_error(Some(native), Some("native detail"));
            assert_eq!(err.code(), expected);
            assert_eq!(err.code().as_str(), native);
            assert_eq!(err.message(), "native detail");
        }
    }

    #[test]
    fn not_configured_always_uses_fixed_guidance() {
        let err = normalize_native_error(Some("NOT_CONFIGURED"), Some("sdk not ready (native)"));
        assert_eq!(err, DynalinksError::NotConfigured);
        assert_eq!(err.message(), NOT_CONFIGURED_MESSAGE);
        assert_eq!(err.to_string(), NOT_CONFIGURED_MESSAGE);
    }

    #[test]
    fn invalid_intent_is_a_synonym_for_invalid_url() {
        let err = normalize_native_error(Some("INVALID_INTENT"), Some("bad intent"));
        assert_eq!(
            err,
            DynalinksError::InvalidUrl {
                message: "bad intent".to_string()
            }
        );
        assert_eq!(err.code().as_str(), "INVALID_URL");
    }

    #[test]
    fn missing_message_falls_back_to_code_default() {
        for code in ErrorCode::ALL {
            let err = normalize_native_error(Some(code.as_str()), None);
            assert_eq!(err.code(), code);
            assert_eq!(err.message(), code.default_message());

            let blank = normalize_native_error(Some(code.as_str()), Some("   "));
            assert_eq!(blank.message(), code.default_message());
        }
    }

    #[traced_test]
    #[test]
    fn unrecognized_and_absent_codes_become_unknown() {
        let err = normalize_native_error(Some("E_TEAPOT"), Some("short and stout"));
        assert_eq!(
            err,
            DynalinksError::Unknown {
                message: "short and stout".to_string()
            }
        );

        let err = normalize_native_error(None, Some("bridge exploded"));
        assert_eq!(err.code(), ErrorCode::Unknown);
        assert_eq!(err.message(), "bridge exploded");

        let err = normalize_native_error(Some("E_TEAPOT"), Some(""));
        assert_eq!(err.message(), UNKNOWN_ERROR_MESSAGE);

        let err = normalize_native_error(None, None);
        assert_eq!(err.message(), UNKNOWN_ERROR_MESSAGE);

        assert!(logs_contain("unrecognized native error code"));
    }

    #[test]
    fn codes_are_case_sensitive() {
        let err = normalize_native_error(Some("network_error"), Some("lower"));
        assert_eq!(err.code(), ErrorCode::Unknown);
    }

    #[test]
    fn error_serializes_as_code_and_message() {
        let err = DynalinksError::new(ErrorCode::Simulator, "no simulators");
        assert_eq!(
            serde_json::to_value(&err).expect("serialize"),
            json!({"code": "SIMULATOR", "message": "no simulators"})
        );
        assert_eq!(
            serde_json::to_value(DynalinksError::NotConfigured).expect("serialize"),
            json!({"code": "NOT_CONFIGURED", "message": NOT_CONFIGURED_MESSAGE})
        );
    }

    #[test]
    fn native_error_deserializes_with_missing_parts() {
        let raw: NativeError = serde_json::from_value(json!({"message": "oops"})).expect("parse");
        assert_eq!(raw.code, None);
        assert_eq!(raw.normalize().code(), ErrorCode::Unknown);
    }
}
