//! SDK configuration accepted from application code and the payload forwarded to native modules.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{DynalinksError, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Verbosity of the native SDK's own logging.
pub enum LogLevel {
    /// Native logging disabled.
    None,
    /// Errors only.
    #[default]
    Error,
    /// Warnings and errors.
    Warning,
    /// Informational messages and above.
    Info,
    /// Everything, including request tracing.
    Debug,
}

impl LogLevel {
    /// Returns the stable token forwarded to native modules.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Configuration supplied by application code to `configure`.
pub struct Configuration {
    /// Client API key issued by the Dynalinks console.
    ///
    /// A `null` or non-string key reads as absent so validation reports `INVALID_API_KEY`.
    #[serde(
        rename = "clientAPIKey",
        default,
        deserialize_with = "string_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_api_key: Option<String>,
    /// Optional API base URL; the native SDK default is used when absent.
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Native SDK log level, `error` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    /// Whether deferred checks may run on simulators/emulators, `false` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_simulator: Option<bool>,
}

impl Configuration {
    /// Creates a configuration with only the client API key set.
    pub fn new(client_api_key: impl Into<String>) -> Self {
        Self {
            client_api_key: Some(client_api_key.into()),
            ..Self::default()
        }
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the native log level.
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = Some(log_level);
        self
    }

    /// Sets whether simulators/emulators are allowed.
    pub fn with_allow_simulator(mut self, allow_simulator: bool) -> Self {
        self.allow_simulator = Some(allow_simulator);
        self
    }

    /// Validates the configuration and applies defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DynalinksError::InvalidApiKey`] when the key is absent or blank and
    /// [`DynalinksError::InvalidUrl`] when `baseURL` is present but not an absolute URL.
    pub fn validate(&self) -> Result<NativeConfig, DynalinksError> {
        let client_api_key = self.client_api_key.as_deref().map_or("", str::trim);
        if client_api_key.is_empty() {
            return Err(DynalinksError::new(
                ErrorCode::InvalidApiKey,
                "clientAPIKey is required and cannot be empty",
            ));
        }

        let base_url = match self.base_url.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(validate_base_url(raw)?),
        };

        Ok(NativeConfig {
            client_api_key: client_api_key.to_string(),
            base_url,
            log_level: self.log_level.unwrap_or_default(),
            allow_simulator: self.allow_simulator.unwrap_or(false),
        })
    }
}

fn string_or_absent<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn validate_base_url(raw: &str) -> Result<String, DynalinksError> {
    let invalid = || {
        DynalinksError::new(
            ErrorCode::InvalidUrl,
            format!("baseURL must be an absolute URL: {raw}"),
        )
    };
    let parsed = Url::parse(raw).map_err(|_| invalid())?;
    if parsed.cannot_be_a_base() || !parsed.has_host() {
        return Err(invalid());
    }
    Ok(raw.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Validated configuration forwarded to the native bridge.
///
/// `baseURL` is omitted from the serialized form when unset so the native SDK keeps its built-in
/// endpoint.
pub struct NativeConfig {
    /// Trimmed, non-empty client API key.
    #[serde(rename = "clientAPIKey")]
    pub client_api_key: String,
    /// Absolute API base URL override.
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Native log level.
    pub log_level: LogLevel,
    /// Whether simulators/emulators are allowed.
    pub allow_simulator: bool,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_are_applied_and_base_url_is_omitted() {
        let native = Configuration::new("k").validate().expect("valid config");
        assert_eq!(
            serde_json::to_value(&native).expect("serialize"),
            json!({
                "clientAPIKey": "k",
                "logLevel": "error",
                "allowSimulator": false,
            })
        );
    }

    #[test]
    fn blank_api_key_is_rejected() {
        for key in ["", "   ", "\n\t"] {
            let err = Configuration::new(key).validate().expect_err("blank key");
            assert_eq!(err.code(), ErrorCode::InvalidApiKey);
        }
    }

    #[test]
    fn explicit_values_are_forwarded_trimmed() {
        let native = Configuration::new("  key-123 ")
            .with_base_url("https://api.example.com/v1")
            .with_log_level(LogLevel::Debug)
            .with_allow_simulator(true)
            .validate()
            .expect("valid config");

        assert_eq!(
            native,
            NativeConfig {
                client_api_key: "key-123".to_string(),
                base_url: Some("https://api.example.com/v1".to_string()),
                log_level: LogLevel::Debug,
                allow_simulator: true,
            }
        );
    }

    #[test]
    fn relative_or_malformed_base_url_is_rejected() {
        for bad in ["/v1/api", "not a url", "mailto:team@example.com"] {
            let err = Configuration::new("k")
                .with_base_url(bad)
                .validate()
                .expect_err("bad base url");
            assert_eq!(err.code(), ErrorCode::InvalidUrl);
        }
    }

    #[test]
    fn blank_base_url_is_treated_as_absent() {
        let native = Configuration::new("k")
            .with_base_url("  ")
            .validate()
            .expect("valid config");
        assert_eq!(native.base_url, None);
    }

    #[test]
    fn configuration_deserializes_from_js_shape() {
        let config: Configuration = serde_json::from_value(json!({
            "clientAPIKey": "abc",
            "logLevel": "warning",
        }))
        .expect("parse");

        assert_eq!(
            config,
            Configuration {
                client_api_key: Some("abc".to_string()),
                base_url: None,
                log_level: Some(LogLevel::Warning),
                allow_simulator: None,
            }
        );

        let missing: Configuration = serde_json::from_value(json!({})).expect("parse");
        assert_eq!(missing.client_api_key, None);
    }

    #[test]
    fn absent_null_or_non_string_key_is_an_invalid_api_key() {
        for raw in [
            json!({}),
            json!({"clientAPIKey": null}),
            json!({"clientAPIKey": 42}),
            json!({"clientAPIKey": {"value": "k"}}),
            json!({"clientAPIKey": "  "}),
        ] {
            let config: Configuration = serde_json::from_value(raw.clone()).expect("parse");
            let err = config.validate().expect_err("missing key");
            assert_eq!(err.code(), ErrorCode::InvalidApiKey, "payload: {raw}");
        }

        let err = Configuration::default().validate().expect_err("default config");
        assert_eq!(err.code(), ErrorCode::InvalidApiKey);
    }
}
