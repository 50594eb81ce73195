use super::SecurityDefinition;
use crate::error::ResolveError;
use base64::Engine;
use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use std::fmt;
use url::Url;

/// A security definition bound to the credential supplied for it.
///
/// Authenticators only describe what to attach to a request; the caller
/// applies them with [`Authenticator::apply`] before sending it.
#[derive(Clone, PartialEq, Eq)]
pub enum Authenticator {
    /// Adds `header: value`
    ApiKeyHeader {
        header: HeaderName,
        value: HeaderValue,
    },
    /// Appends `param=value` to the query string
    ApiKeyQuery { param: String, value: String },
    /// Adds `Authorization: Basic <base64(user:password)>`
    BasicAuth { credentials: HeaderValue },
}

impl Authenticator {
    /// Bind `value` to `definition`.
    ///
    /// Basic auth expects `value` in `user:password` form.
    pub fn new(definition: &SecurityDefinition, value: &str) -> Result<Self, ResolveError> {
        let invalid = |reason: String| ResolveError::InvalidCredential {
            config_name: definition.config_name(),
            reason,
        };
        match definition {
            SecurityDefinition::ApiKeyHeader { header, .. } => {
                let header = HeaderName::from_bytes(header.as_bytes())
                    .map_err(|_| invalid(format!("'{}' is not a valid header name", header)))?;
                let mut value = HeaderValue::from_str(value)
                    .map_err(|_| invalid("value cannot be sent in an HTTP header".to_string()))?;
                value.set_sensitive(true);
                Ok(Authenticator::ApiKeyHeader { header, value })
            }
            SecurityDefinition::ApiKeyQuery { param, .. } => Ok(Authenticator::ApiKeyQuery {
                param: param.clone(),
                value: value.to_string(),
            }),
            SecurityDefinition::BasicAuth { .. } => {
                if !value.contains(':') {
                    return Err(invalid(
                        "basic auth value must be in 'user:password' form".to_string(),
                    ));
                }
                let encoded = base64::engine::general_purpose::STANDARD.encode(value);
                let mut credentials = HeaderValue::from_str(&format!("Basic {}", encoded))
                    .map_err(|_| invalid("value cannot be sent in an HTTP header".to_string()))?;
                credentials.set_sensitive(true);
                Ok(Authenticator::BasicAuth { credentials })
            }
        }
    }

    /// Attach the credential to a request being prepared.
    pub fn apply(&self, headers: &mut HeaderMap, url: &mut Url) {
        match self {
            Authenticator::ApiKeyHeader { header, value } => {
                headers.insert(header.clone(), value.clone());
            }
            Authenticator::ApiKeyQuery { param, value } => {
                url.query_pairs_mut().append_pair(param, value);
            }
            Authenticator::BasicAuth { credentials } => {
                headers.insert(AUTHORIZATION, credentials.clone());
            }
        }
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authenticator::ApiKeyHeader { header, .. } => f
                .debug_struct("ApiKeyHeader")
                .field("header", header)
                .field("value", &"<redacted>")
                .finish(),
            Authenticator::ApiKeyQuery { param, .. } => f
                .debug_struct("ApiKeyQuery")
                .field("param", param)
                .field("value", &"<redacted>")
                .finish(),
            Authenticator::BasicAuth { .. } => f
                .debug_struct("BasicAuth")
                .field("credentials", &"<redacted>")
                .finish(),
        }
    }
}
