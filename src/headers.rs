//! Header parameters declared by a specification.

use crate::error::ResolveError;
use crate::naming::config_name_with_override;
use std::collections::HashMap;

/// A header parameter whose value comes from the user configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderParameter {
    /// Header name as declared in the specification
    pub name: String,
    /// Configuration name to use instead of the normalised header name
    pub config_name_override: Option<String>,
}

/// All header parameters of one specification, in declaration order.
pub type HeaderParameters = Vec<HeaderParameter>;

impl HeaderParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_name_override: None,
        }
    }

    /// Set the override configuration name.
    pub fn with_config_name(mut self, config_name: impl Into<String>) -> Self {
        self.config_name_override = Some(config_name.into());
        self
    }

    /// Key the header value is stored and looked up under.
    pub fn config_name(&self) -> String {
        config_name_with_override(&self.name, self.config_name_override.as_deref())
    }
}

/// Reject header lists where two entries share a configuration name.
///
/// Such a pair would read the same user value, which silently sends one
/// value under two different headers.
pub fn ensure_unique_config_names(headers: &[HeaderParameter]) -> Result<(), ResolveError> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(headers.len());
    for header in headers {
        let config_name = header.config_name();
        if let Some(first) = seen.get(&config_name) {
            return Err(ResolveError::DuplicateHeaderConfigName {
                config_name,
                first: (*first).to_string(),
                second: header.name.clone(),
            });
        }
        seen.insert(config_name, &header.name);
    }
    Ok(())
}
