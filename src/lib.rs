//! # openapi-provider
//!
//! Resolves everything an API client needs to talk to a backend described by
//! a Swagger 2.0 document, without per-API code: how to authenticate, which
//! headers to attach and which endpoint to target.
//!
//! ## Overview
//!
//! The library is organized into the following modules, leaves first:
//!
//! - **[`spec`]** - Decoded specification (security, backend metadata, parameters)
//! - **[`naming`]** - Configuration-name derivation shared by headers and security
//! - **[`security`]** - Security definition catalog, global security resolution, authenticators
//! - **[`backend`]** - Backend host/basePath/schemes resolution
//! - **[`headers`]** - Header parameters and their configuration names
//! - **[`provider_config`]** - Per-consumer configuration built from user values
//! - **[`plugin_config`]** - Versioned plugin configuration (service -> spec location)
//! - **[`error`]** - Error taxonomy shared by all resolvers
//!
//! ### Resolution Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Plugin as plugin_config
//!     participant Spec as spec::load_spec
//!     participant Security as security
//!     participant Backend as backend
//!     participant Provider as provider_config
//!
//!     Caller->>Plugin: load_plugin_config(path)
//!     Plugin-->>Caller: service -> swagger-url
//!     Caller->>Spec: load_spec(swagger-url)
//!     Spec-->>Caller: SwaggerSpec
//!     Caller->>Security: security_definitions() / global_security_schemes()
//!     Caller->>Backend: SpecV2BackendConfiguration::new(spec, url)
//!     Caller->>Provider: ProviderConfiguration::new(headers, catalog, lookup)
//!     Provider-->>Caller: headers + authenticators
//! ```
//!
//! Every step returns fresh, immutable values. Nothing is cached across
//! specification loads, so concurrent consumers each build their own
//! [`ProviderConfiguration`] without locking.
//!
//! ## Quick Start
//!
//! ```no_run
//! use openapi_provider::backend::{BackendConfiguration, SpecV2BackendConfiguration};
//! use openapi_provider::provider_config::{EnvLookup, ProviderConfiguration};
//! use openapi_provider::spec::load_spec;
//!
//! # fn main() -> anyhow::Result<()> {
//! let spec = load_spec("swagger.yaml")?;
//! let security = spec.security();
//! let catalog = security.security_definitions()?;
//! let backend = SpecV2BackendConfiguration::new(&spec, "https://api.example.com/swagger.yaml")?;
//!
//! let config = ProviderConfiguration::new(
//!     &spec.header_parameters(),
//!     Some(&catalog),
//!     &EnvLookup::new("PETSTORE_"),
//! )?;
//! println!("{} {:?}", backend.base_url()?, config.header_config_names());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cli;
pub mod error;
pub mod headers;
pub mod logging;
pub mod naming;
pub mod plugin_config;
pub mod provider_config;
pub mod security;
pub mod spec;

pub use backend::{BackendConfiguration, SpecV2BackendConfiguration, StubBackendConfiguration};
pub use error::ResolveError;
pub use headers::{HeaderParameter, HeaderParameters};
pub use plugin_config::{PluginConfigSchema, PluginConfigSchemaV1, ServiceConfigV1};
pub use provider_config::{ProviderConfiguration, ValueLookup};
pub use security::{
    Authenticator, GlobalSecurityScheme, SecurityDefinition, SecurityDefinitions, SpecSecurity,
};
pub use spec::{load_spec, SwaggerSpec};
