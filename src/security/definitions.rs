use super::SpecSecurity;
use crate::error::ResolveError;
use crate::naming::config_name;
use crate::spec::SecuritySchemeDescriptor;
use std::collections::HashMap;
use tracing::debug;

/// A named authentication mechanism declared by the specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SecurityDefinition {
    /// API key sent in the `header` request header
    ApiKeyHeader { name: String, header: String },
    /// API key sent as the `param` query parameter
    ApiKeyQuery { name: String, param: String },
    /// HTTP basic authentication
    BasicAuth { name: String },
}

impl SecurityDefinition {
    /// Classify one `securityDefinitions` entry.
    ///
    /// This is the only place where the `type`/`in` tags are interpreted.
    pub fn from_descriptor(
        name: &str,
        descriptor: &SecuritySchemeDescriptor,
    ) -> Result<Self, ResolveError> {
        match descriptor.scheme_type.as_str() {
            "apiKey" => {
                let location = descriptor.location.as_deref().unwrap_or_default();
                if location != "header" && location != "query" {
                    return Err(ResolveError::UnsupportedSchemeLocation {
                        location: location.to_string(),
                    });
                }
                let wire_name = match descriptor.name.as_deref() {
                    Some(n) if !n.is_empty() => n.to_string(),
                    _ => {
                        return Err(ResolveError::MissingApiKeyName {
                            definition: name.to_string(),
                        })
                    }
                };
                if location == "header" {
                    Ok(SecurityDefinition::ApiKeyHeader {
                        name: name.to_string(),
                        header: wire_name,
                    })
                } else {
                    Ok(SecurityDefinition::ApiKeyQuery {
                        name: name.to_string(),
                        param: wire_name,
                    })
                }
            }
            "basic" => Ok(SecurityDefinition::BasicAuth {
                name: name.to_string(),
            }),
            other => Err(ResolveError::UnsupportedSchemeType {
                scheme_type: other.to_string(),
            }),
        }
    }

    /// Name under which the definition is declared.
    pub fn name(&self) -> &str {
        match self {
            SecurityDefinition::ApiKeyHeader { name, .. }
            | SecurityDefinition::ApiKeyQuery { name, .. }
            | SecurityDefinition::BasicAuth { name } => name,
        }
    }

    /// Header or query parameter name; `None` for basic auth.
    pub fn wire_name(&self) -> Option<&str> {
        match self {
            SecurityDefinition::ApiKeyHeader { header, .. } => Some(header),
            SecurityDefinition::ApiKeyQuery { param, .. } => Some(param),
            SecurityDefinition::BasicAuth { .. } => None,
        }
    }

    /// Short tag used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            SecurityDefinition::ApiKeyHeader { .. } => "apiKey/header",
            SecurityDefinition::ApiKeyQuery { .. } => "apiKey/query",
            SecurityDefinition::BasicAuth { .. } => "basic",
        }
    }

    /// Key the credential is looked up under in the user configuration.
    pub fn config_name(&self) -> String {
        config_name(self.name())
    }
}

/// The security definition catalog of one specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityDefinitions(Vec<SecurityDefinition>);

impl SecurityDefinitions {
    pub fn new(definitions: Vec<SecurityDefinition>) -> Self {
        Self(definitions)
    }

    /// Definition declared under `name` (exact match).
    pub fn find(&self, name: &str) -> Option<&SecurityDefinition> {
        self.0.iter().find(|d| d.name() == name)
    }

    /// Definition whose configuration name is `config_name`.
    pub fn find_by_config_name(&self, config_name: &str) -> Option<&SecurityDefinition> {
        self.0.iter().find(|d| d.config_name() == config_name)
    }

    /// Reject catalogs where two definitions share a configuration name.
    ///
    /// Both would read the same user value and only one authenticator could
    /// be kept for them.
    pub fn ensure_unique_config_names(&self) -> Result<(), ResolveError> {
        let mut seen: HashMap<String, &str> = HashMap::with_capacity(self.0.len());
        for definition in &self.0 {
            let config_name = definition.config_name();
            if let Some(first) = seen.get(&config_name) {
                return Err(ResolveError::DuplicateSecurityConfigName {
                    config_name,
                    first: (*first).to_string(),
                    second: definition.name().to_string(),
                });
            }
            seen.insert(config_name, definition.name());
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SecurityDefinition> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a SecurityDefinitions {
    type Item = &'a SecurityDefinition;
    type IntoIter = std::slice::Iter<'a, SecurityDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<SecurityDefinition> for SecurityDefinitions {
    fn from_iter<I: IntoIterator<Item = SecurityDefinition>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl SpecSecurity {
    /// Build the catalog from every declared security scheme.
    ///
    /// The first unsupported `type` or `in` value aborts the whole build.
    pub fn security_definitions(&self) -> Result<SecurityDefinitions, ResolveError> {
        self.definitions
            .iter()
            .map(|(name, descriptor)| {
                let definition = SecurityDefinition::from_descriptor(name, descriptor)?;
                debug!(
                    definition = %name,
                    kind = definition.kind(),
                    "resolved security definition"
                );
                Ok(definition)
            })
            .collect()
    }
}
