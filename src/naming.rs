//! Configuration-name derivation.
//!
//! Header parameters and security definitions are looked up in the user
//! configuration under a *configuration name*. Both go through
//! [`config_name`] so the key used when building a
//! [`ProviderConfiguration`](crate::provider_config::ProviderConfiguration)
//! is the same key used when querying it later.

use once_cell::sync::Lazy;
use regex::Regex;

/// `apiKey` -> `api_Key`
static LOWER_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("lower/upper regex should be valid"));

/// `HTTPHeader` -> `HTTP_Header`
static ACRONYM_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym regex should be valid"));

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("separator regex should be valid"));

/// Normalise a declared name into a lookup-safe configuration name.
///
/// The result is snake_case: camel-case boundaries and any run of
/// non-alphanumeric characters become a single `_`, everything is lower-cased
/// and leading/trailing underscores are dropped.
///
/// ```
/// use openapi_provider::naming::config_name;
///
/// assert_eq!(config_name("X-Request-ID"), "x_request_id");
/// assert_eq!(config_name("apiKeyAuth"), "api_key_auth");
/// ```
pub fn config_name(name: &str) -> String {
    let split = ACRONYM_WORD.replace_all(name, "${1}_${2}");
    let split = LOWER_UPPER.replace_all(&split, "${1}_${2}");
    let joined = SEPARATORS.replace_all(&split, "_");
    joined.trim_matches('_').to_ascii_lowercase()
}

/// Configuration name for an entity with an optional override.
///
/// The override wins when present and non-empty; it is normalised too.
pub fn config_name_with_override(name: &str, override_name: Option<&str>) -> String {
    match override_name {
        Some(o) if !o.is_empty() => config_name(o),
        _ => config_name(name),
    }
}
