//! # Plugin Configuration
//!
//! The versioned document telling the plugin where to find the specification
//! of each service it exposes:
//!
//! ```yaml
//! version: "1"
//! services:
//!   petstore:
//!     swagger-url: https://petstore.example.com/swagger.yaml
//!     insecure_skip_verify: false
//! ```
//!
//! Files are located with [`resolve_plugin_config_path`] and read with
//! [`load_plugin_config`], which validates before returning. YAML is the
//! canonical format; `.json` and `.toml` files with the same keys are accepted.
//!
//! Validation checks that a location names an existing file when it is not a
//! URL. The file may disappear before it is read; callers must still handle
//! read errors.

use crate::error::{ResolveError, SUPPORTED_PLUGIN_CONFIG_VERSION};
use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

/// File name looked up in the default configuration directory.
pub const DEFAULT_PLUGIN_CONFIG_FILE: &str = "openapi-provider.yaml";

/// Where one service's specification lives.
pub trait ServiceConfiguration {
    /// URL or file path of the specification document.
    fn swagger_url(&self) -> &str;

    /// Whether TLS certificate verification is skipped when fetching it.
    fn is_insecure_skip_verify_enabled(&self) -> bool;
}

/// A versioned plugin configuration document.
pub trait PluginConfigSchema {
    type Service: ServiceConfiguration;

    /// Check the version and every service location.
    fn validate(&self) -> Result<(), ResolveError>;

    /// Configuration of `service_name`.
    fn service_config(&self, service_name: &str) -> Result<&Self::Service, ResolveError>;

    fn version(&self) -> &str;

    /// Every declared service, sorted by name.
    fn all_service_configurations(&self) -> &BTreeMap<String, Self::Service>;

    /// Canonical YAML representation.
    fn marshal(&self) -> anyhow::Result<String>;
}

/// Service entry of a version 1 document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfigV1 {
    #[serde(rename = "swagger-url")]
    pub swagger_url: String,
    #[serde(rename = "insecure_skip_verify", default)]
    pub insecure_skip_verify: bool,
}

impl ServiceConfigV1 {
    pub fn new(swagger_url: impl Into<String>, insecure_skip_verify: bool) -> Self {
        Self {
            swagger_url: swagger_url.into(),
            insecure_skip_verify,
        }
    }
}

impl ServiceConfiguration for ServiceConfigV1 {
    fn swagger_url(&self) -> &str {
        &self.swagger_url
    }

    fn is_insecure_skip_verify_enabled(&self) -> bool {
        self.insecure_skip_verify
    }
}

/// Version 1 of the plugin configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfigSchemaV1 {
    #[serde(deserialize_with = "string_or_number")]
    pub version: String,
    #[serde(default)]
    pub services: BTreeMap<String, ServiceConfigV1>,
}

impl PluginConfigSchemaV1 {
    /// Document at the current version holding `services`.
    pub fn new(services: BTreeMap<String, ServiceConfigV1>) -> Self {
        Self {
            version: SUPPORTED_PLUGIN_CONFIG_VERSION.to_string(),
            services,
        }
    }

    /// Parse a YAML document without validating it.
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

impl PluginConfigSchema for PluginConfigSchemaV1 {
    type Service = ServiceConfigV1;

    fn validate(&self) -> Result<(), ResolveError> {
        if self.version != SUPPORTED_PLUGIN_CONFIG_VERSION {
            warn!(version = %self.version, "unsupported plugin configuration version");
            return Err(ResolveError::UnsupportedConfigVersion {
                found: self.version.clone(),
            });
        }
        for (name, service) in &self.services {
            if !is_valid_location(&service.swagger_url) {
                warn!(service = %name, location = %service.swagger_url, "invalid service location");
                return Err(ResolveError::InvalidServiceLocation {
                    service: name.clone(),
                    location: service.swagger_url.clone(),
                });
            }
            debug!(service = %name, location = %service.swagger_url, "service location validated");
        }
        Ok(())
    }

    fn service_config(&self, service_name: &str) -> Result<&ServiceConfigV1, ResolveError> {
        self.services
            .get(service_name)
            .ok_or_else(|| ResolveError::ServiceNotFound {
                service: service_name.to_string(),
            })
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn all_service_configurations(&self) -> &BTreeMap<String, ServiceConfigV1> {
        &self.services
    }

    fn marshal(&self) -> anyhow::Result<String> {
        let mut out = String::new();
        writeln!(out, "version: {}", serde_json::to_string(&self.version)?)?;
        if self.services.is_empty() {
            writeln!(out, "services: {{}}")?;
            return Ok(out);
        }
        writeln!(out, "services:")?;
        for (name, service) in &self.services {
            writeln!(out, "  {}:", yaml_scalar(name)?)?;
            writeln!(out, "    swagger-url: {}", yaml_scalar(&service.swagger_url)?)?;
            writeln!(out, "    insecure_skip_verify: {}", service.insecure_skip_verify)?;
        }
        Ok(out)
    }
}

/// `s` as a plain YAML scalar when it reads back unchanged, else double-quoted.
fn yaml_scalar(s: &str) -> anyhow::Result<String> {
    let plain = !s.is_empty()
        && !s.contains('\n')
        && s.trim() == s
        && matches!(
            serde_yaml::from_str::<serde_yaml::Value>(s),
            Ok(serde_yaml::Value::String(ref v)) if v == s
        );
    if plain {
        Ok(s.to_string())
    } else {
        Ok(serde_json::to_string(s)?)
    }
}

/// Absolute `http`/`https` URL with a host, or a path that exists right now.
fn is_valid_location(location: &str) -> bool {
    is_valid_url(location) || Path::new(location).exists()
}

/// Only `http` and `https` count: other schemes cannot be fetched by the plugin.
fn is_valid_url(location: &str) -> bool {
    match Url::parse(location) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Accepts a string or an integer; floats are rejected so `1.0` is not read as `1`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(i) => i.to_string(),
    })
}

/// Environment variable naming the configuration file of `provider_name`.
///
/// `petstore` -> `OAPI_PROVIDER_PETSTORE_PLUGIN_CONFIGURATION_FILE`
pub fn plugin_config_env_var(provider_name: &str) -> String {
    let provider = crate::naming::config_name(provider_name).to_ascii_uppercase();
    format!("OAPI_PROVIDER_{}_PLUGIN_CONFIGURATION_FILE", provider)
}

/// `$HOME/.openapi-provider/plugins/openapi-provider.yaml`
pub fn default_plugin_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".openapi-provider")
            .join("plugins")
            .join(DEFAULT_PLUGIN_CONFIG_FILE)
    })
}

/// Locate the plugin configuration file.
///
/// Priority:
/// 1. Explicitly provided path
/// 2. The provider's environment variable (see [`plugin_config_env_var`])
/// 3. The default path, when the file exists
pub fn resolve_plugin_config_path(
    explicit_path: Option<&Path>,
    provider_name: &str,
) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(plugin_config_env_var(provider_name)) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    default_plugin_config_path().filter(|p| p.exists())
}

/// Read, parse and validate a plugin configuration file.
pub fn load_plugin_config(config_path: &Path) -> anyhow::Result<PluginConfigSchemaV1> {
    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!(
            "Failed to read plugin configuration: {}",
            config_path.display()
        )
    })?;

    let schema: PluginConfigSchemaV1 = match config_path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&contents).map_err(anyhow::Error::from),
        Some("json") => serde_json::from_str(&contents).map_err(anyhow::Error::from),
        _ => serde_yaml::from_str(&contents).map_err(anyhow::Error::from),
    }
    .with_context(|| {
        format!(
            "Failed to parse plugin configuration: {}",
            config_path.display()
        )
    })?;

    schema.validate().with_context(|| {
        format!(
            "Invalid plugin configuration: {}",
            config_path.display()
        )
    })?;
    Ok(schema)
}
