//! # Security Module
//!
//! Turns the security declarations of a specification into typed values.
//!
//! ## Overview
//!
//! - [`SecurityDefinitions`] - the catalog built from `securityDefinitions`.
//!   Only three mechanisms are modelled: API key in a header, API key in the
//!   query string, and HTTP basic authentication.
//! - [`GlobalSecuritySchemes`] - the default `security` requirements, each one
//!   checked against the catalog.
//! - [`Authenticator`] - a definition bound to a user-supplied credential,
//!   ready to be applied to an outgoing request by the caller.
//!
//! ## Example
//!
//! ```rust
//! use openapi_provider::security::SpecSecurity;
//! use openapi_provider::spec::SecuritySchemeDescriptor;
//! use std::collections::BTreeMap;
//!
//! let mut definitions = BTreeMap::new();
//! definitions.insert(
//!     "apikey_auth".to_string(),
//!     SecuritySchemeDescriptor::api_key_header("Authorization"),
//! );
//! let mut requirement = BTreeMap::new();
//! requirement.insert("apikey_auth".to_string(), Vec::new());
//!
//! let security = SpecSecurity::new(definitions, vec![requirement]);
//! let catalog = security.security_definitions().unwrap();
//! let global = security.global_security_schemes().unwrap();
//! assert_eq!(catalog.len(), 1);
//! assert_eq!(global[0].name, "apikey_auth");
//! ```

mod authenticator;
mod definitions;
mod global;

pub use authenticator::Authenticator;
pub use definitions::{SecurityDefinition, SecurityDefinitions};
pub use global::{GlobalSecurityScheme, GlobalSecuritySchemes};

use crate::spec::SecuritySchemeDescriptor;
use std::collections::BTreeMap;

/// Raw security declarations of one specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecSecurity {
    /// `securityDefinitions`, keyed by declared name
    pub definitions: BTreeMap<String, SecuritySchemeDescriptor>,
    /// `security`, a list of single-entry maps from scheme name to scopes
    pub global: Vec<BTreeMap<String, Vec<String>>>,
}

impl SpecSecurity {
    pub fn new(
        definitions: BTreeMap<String, SecuritySchemeDescriptor>,
        global: Vec<BTreeMap<String, Vec<String>>>,
    ) -> Self {
        Self {
            definitions,
            global,
        }
    }
}
