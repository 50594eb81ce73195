//! # Provider Configuration
//!
//! Merges user-supplied values with what a specification declares, producing
//! one [`ProviderConfiguration`] per API consumer.
//!
//! Values are pulled through the [`ValueLookup`] capability, keyed by
//! configuration name (see [`crate::naming`]). Construction is all-or-nothing:
//! the first declared security definition or header parameter without a value
//! aborts the build and nothing is returned.
//!
//! ## Example
//!
//! ```rust
//! use openapi_provider::headers::HeaderParameter;
//! use openapi_provider::provider_config::ProviderConfiguration;
//! use std::collections::HashMap;
//!
//! let headers = vec![HeaderParameter::new("X-Request-ID")];
//! let mut values = HashMap::new();
//! values.insert("x_request_id".to_string(), "abc-123".to_string());
//!
//! let config = ProviderConfiguration::new(&headers, None, &values).unwrap();
//! assert_eq!(config.header_value_for(&headers[0]), Some("abc-123"));
//! ```

use crate::error::ResolveError;
use crate::headers::{ensure_unique_config_names, HeaderParameter};
use crate::security::{Authenticator, GlobalSecurityScheme, SecurityDefinition, SecurityDefinitions};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// Source of user-supplied configuration values.
///
/// `None` means "no value supplied"; an explicitly empty value is whatever the
/// implementation decides to return for it.
pub trait ValueLookup {
    /// Value configured under `config_name`.
    fn lookup(&self, config_name: &str) -> Option<String>;
}

impl ValueLookup for HashMap<String, String> {
    fn lookup(&self, config_name: &str) -> Option<String> {
        self.get(config_name).cloned()
    }
}

impl ValueLookup for BTreeMap<String, String> {
    fn lookup(&self, config_name: &str) -> Option<String> {
        self.get(config_name).cloned()
    }
}

/// Adapts a closure into a [`ValueLookup`].
pub struct LookupFn<F>(pub F);

impl<F> ValueLookup for LookupFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, config_name: &str) -> Option<String> {
        (self.0)(config_name)
    }
}

/// Reads values from the process environment as `<prefix><CONFIG_NAME>`.
///
/// `EnvLookup::new("PETSTORE_")` resolves `x_request_id` from
/// `PETSTORE_X_REQUEST_ID`.
#[derive(Debug, Clone, Default)]
pub struct EnvLookup {
    prefix: String,
}

impl EnvLookup {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Environment variable consulted for `config_name`.
    pub fn var_name(&self, config_name: &str) -> String {
        format!("{}{}", self.prefix, config_name.to_ascii_uppercase())
    }
}

impl ValueLookup for EnvLookup {
    fn lookup(&self, config_name: &str) -> Option<String> {
        std::env::var(self.var_name(config_name)).ok()
    }
}

/// First lookup that has a value wins.
pub struct ChainedLookup<'a> {
    sources: Vec<&'a dyn ValueLookup>,
}

impl<'a> ChainedLookup<'a> {
    pub fn new(sources: Vec<&'a dyn ValueLookup>) -> Self {
        Self { sources }
    }
}

impl ValueLookup for ChainedLookup<'_> {
    fn lookup(&self, config_name: &str) -> Option<String> {
        self.sources.iter().find_map(|s| s.lookup(config_name))
    }
}

/// Header values and authenticators resolved for one API consumer.
///
/// Immutable once built; share it by reference between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfiguration {
    headers: HashMap<String, String>,
    authenticators: HashMap<String, Authenticator>,
}

impl ProviderConfiguration {
    /// Resolve every declared security definition and header parameter.
    ///
    /// `security_definitions` of `None` means the API declares no security.
    pub fn new<L>(
        headers: &[HeaderParameter],
        security_definitions: Option<&SecurityDefinitions>,
        lookup: &L,
    ) -> Result<Self, ResolveError>
    where
        L: ValueLookup + ?Sized,
    {
        ensure_unique_config_names(headers)?;
        if let Some(definitions) = security_definitions {
            definitions.ensure_unique_config_names()?;
        }

        let mut authenticators = HashMap::new();
        for definition in security_definitions.into_iter().flatten() {
            let config_name = definition.config_name();
            let Some(value) = lookup.lookup(&config_name) else {
                warn!(definition = %config_name, "no value supplied for security definition");
                return Err(ResolveError::MissingSecurityValue { config_name });
            };
            let authenticator = Authenticator::new(definition, &value)?;
            debug!(definition = %config_name, kind = definition.kind(), "security definition configured");
            authenticators.insert(config_name, authenticator);
        }

        let mut header_values = HashMap::with_capacity(headers.len());
        for header in headers {
            let config_name = header.config_name();
            let Some(value) = lookup.lookup(&config_name) else {
                warn!(header = %config_name, "no value supplied for header parameter");
                return Err(ResolveError::MissingHeaderValue { config_name });
            };
            debug!(header = %config_name, "header parameter configured");
            header_values.insert(config_name, value);
        }

        info!(
            headers = header_values.len(),
            authenticators = authenticators.len(),
            "provider configuration built"
        );
        Ok(Self {
            headers: header_values,
            authenticators,
        })
    }

    /// Authenticator for a global security scheme, if one was configured.
    pub fn authenticator_for(&self, scheme: &GlobalSecurityScheme) -> Option<&Authenticator> {
        self.authenticators.get(&scheme.config_name())
    }

    /// Authenticator for a security definition, if one was configured.
    pub fn authenticator_for_definition(
        &self,
        definition: &SecurityDefinition,
    ) -> Option<&Authenticator> {
        self.authenticators.get(&definition.config_name())
    }

    /// Value configured for a header parameter.
    pub fn header_value_for(&self, header: &HeaderParameter) -> Option<&str> {
        self.headers.get(&header.config_name()).map(String::as_str)
    }

    /// Configuration names of the configured headers, sorted.
    pub fn header_config_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.headers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Configuration names of the configured authenticators, sorted.
    pub fn authenticator_config_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.authenticators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
