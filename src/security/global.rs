use super::SpecSecurity;
use crate::error::ResolveError;
use crate::naming::config_name;
use tracing::{debug, warn};

/// A security definition selected as a default requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalSecurityScheme {
    /// Declared name of the referenced security definition
    pub name: String,
    /// Scopes listed next to the name in the `security` block
    pub scopes: Vec<String>,
}

/// Default security requirements of a specification, in declaration order.
pub type GlobalSecuritySchemes = Vec<GlobalSecurityScheme>;

impl GlobalSecurityScheme {
    pub fn new(name: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            scopes,
        }
    }

    /// Key the matching authenticator is stored under.
    pub fn config_name(&self) -> String {
        config_name(&self.name)
    }
}

impl SpecSecurity {
    /// Resolve the `security` block against the catalog.
    ///
    /// Fails on the first requirement that names an undeclared definition.
    /// Errors from building the catalog itself are returned as-is.
    pub fn global_security_schemes(&self) -> Result<GlobalSecuritySchemes, ResolveError> {
        let schemes: GlobalSecuritySchemes = self
            .global
            .iter()
            .flat_map(|requirement| requirement.iter())
            .map(|(name, scopes)| GlobalSecurityScheme::new(name.clone(), scopes.clone()))
            .collect();
        if schemes.is_empty() {
            return Ok(schemes);
        }

        let catalog = self.security_definitions()?;
        for scheme in &schemes {
            if catalog.find(&scheme.name).is_none() {
                warn!(scheme = %scheme.name, "global security scheme has no matching definition");
                return Err(ResolveError::UnresolvedGlobalScheme {
                    scheme: scheme.name.clone(),
                });
            }
            debug!(scheme = %scheme.name, scopes = ?scheme.scopes, "resolved global security scheme");
        }
        Ok(schemes)
    }
}
