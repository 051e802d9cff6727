//! Deep-link result models and native payload normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Match confidence reported by the native SDK.
pub enum Confidence {
    /// Strong attribution signal.
    High,
    /// Probabilistic attribution.
    Medium,
    /// Weak attribution.
    Low,
}

impl Confidence {
    /// Returns the stable string token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parses a native token; anything outside `high|medium|low` yields `None`.
    pub fn from_native(token: &str) -> Option<Self> {
        match token {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single dynamic link. Only `id` is guaranteed.
pub struct LinkData {
    /// Link identifier.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Link path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Shortened path segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortened_path: Option<String>,
    /// Destination URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Full short-link URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
    /// In-app route value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_link_value: Option<String>,
    /// iOS fallback URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_fallback_url: Option<String>,
    /// Android fallback URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_fallback_url: Option<String>,
    /// Whether the link forces a redirect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_forced_redirect: Option<bool>,
    /// Social preview title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_title: Option<String>,
    /// Social preview description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_description: Option<String>,
    /// Social preview image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_image_url: Option<String>,
    /// Click count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clicks: Option<u64>,
}

impl LinkData {
    /// Creates link data with only `id` set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Outcome of a deferred check or a manual link resolution.
///
/// `link` is usually present when `matched` is true, but consumers must tolerate its absence.
pub struct DeepLinkResult {
    /// Whether a link matched.
    pub matched: bool,
    /// Match confidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// Match score, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    /// Matched link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkData>,
    /// `true` for the deferred check, `false` for manual resolution.
    pub is_deferred: bool,
}

impl DeepLinkResult {
    /// A non-matching result.
    pub fn unmatched(is_deferred: bool) -> Self {
        Self {
            matched: false,
            confidence: None,
            match_score: None,
            link: None,
            is_deferred,
        }
    }
}

/// Normalizes a raw native payload into a [`DeepLinkResult`]. Never fails.
///
/// `is_deferred` comes from the calling operation and overrides anything in the payload.
/// Non-object payloads and fields of the wrong type are treated as absent.
pub fn normalize_native_result(raw: &Value, is_deferred: bool) -> DeepLinkResult {
    let Some(object) = raw.as_object() else {
        tracing::warn!("native result is not an object; treating as unmatched");
        return DeepLinkResult::unmatched(is_deferred);
    };

    let matched = object
        .get("matched")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let confidence = object
        .get("confidence")
        .and_then(Value::as_str)
        .and_then(Confidence::from_native);
    let match_score = field(object, "match_score", "matchScore")
        .and_then(Value::as_f64)
        .filter(|score| score.is_finite());
    let link = object
        .get("link")
        .and_then(Value::as_object)
        .and_then(normalize_link);

    tracing::debug!(
        matched,
        is_deferred,
        confidence = confidence.map_or("absent", Confidence::as_str),
        has_link = link.is_some(),
        "normalized native deep link result"
    );

    DeepLinkResult {
        matched,
        confidence,
        match_score,
        link,
        is_deferred,
    }
}

/// Rebuilds [`LinkData`] from a native `link` object.
///
/// Each field is read from its snake_case key, falling back to the camelCase key. Returns `None`
/// when no usable `id` is present.
pub fn normalize_link(object: &Map<String, Value>) -> Option<LinkData> {
    let id = match object.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) if id.is_u64() || id.is_i64() => id.to_string(),
        None | Some(Value::Null) => {
            tracing::warn!("dropping native link: id is missing");
            return None;
        }
        Some(Value::String(_)) => {
            tracing::warn!("dropping native link: id is an empty string");
            return None;
        }
        Some(other) => {
            tracing::warn!(
                id_type = json_type(other),
                "dropping native link: id has an unsupported type"
            );
            return None;
        }
    };

    let text = |snake: &str, camel: &str| {
        field(object, snake, camel)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    Some(LinkData {
        id,
        name: text("name", "name"),
        path: text("path", "path"),
        shortened_path: text("shortened_path", "shortenedPath"),
        url: text("url", "url"),
        full_url: text("full_url", "fullUrl"),
        deep_link_value: text("deep_link_value", "deepLinkValue"),
        ios_fallback_url: text("ios_fallback_url", "iosFallbackUrl"),
        android_fallback_url: text("android_fallback_url", "androidFallbackUrl"),
        enable_forced_redirect: field(object, "enable_forced_redirect", "enableForcedRedirect")
            .and_then(Value::as_bool),
        social_title: text("social_title", "socialTitle"),
        social_description: text("social_description", "socialDescription"),
        social_image_url: text("social_image_url", "socialImageUrl"),
        clicks: field(object, "clicks", "clicks").and_then(Value::as_u64),
    })
}

fn field<'a>(object: &'a Map<String, Value>, snake: &str, camel: &str) -> Option<&'a Value> {
    object
        .get(snake)
        .filter(|value| !value.is_null())
        .or_else(|| object.get(camel))
        .filter(|value| !value.is_null())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
