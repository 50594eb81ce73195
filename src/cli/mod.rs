//! # CLI Module
//!
//! Command-line front end for the resolvers.
//!
//! ## Commands
//!
//! ### `validate-config`
//!
//! Locate, load and validate the plugin configuration:
//!
//! ```bash
//! openapi-provider validate-config --config ~/.openapi-provider/plugins/openapi-provider.yaml
//! ```
//!
//! ### `marshal-config`
//!
//! Print the canonical form of a plugin configuration file.
//!
//! ### `resolve`
//!
//! Resolve a specification against user values and print the outcome:
//!
//! ```bash
//! openapi-provider resolve \
//!     --spec swagger.yaml \
//!     --document-url https://api.example.com/swagger.yaml \
//!     --set apikey_auth=secret \
//!     --env-prefix PETSTORE_
//! ```

mod commands;

pub use commands::{run_cli, Cli, Commands};
