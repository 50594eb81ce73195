//! Decoded API specification.
//!
//! Only the Swagger 2.0 fields the resolvers need are modelled: security
//! declarations, backend host/basePath/schemes and parameters.
mod load;
mod types;

pub use load::*;
pub use types::*;
