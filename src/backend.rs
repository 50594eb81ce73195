//! # Backend Configuration
//!
//! Resolves where requests for an API are sent: host, base path and the
//! transport schemes the backend accepts.
//!
//! ## Host precedence
//!
//! 1. The `host` declared by the specification, returned unchanged.
//! 2. Otherwise the host of the URL the specification document was fetched
//!    from. A bare `host[:port][/path]` is read as an `http` URL; file
//!    paths (`/tmp/x.yaml`, `./x.yaml`, `specs/x.yaml`) never yield a host.
//!
//! The fallback is evaluated lazily by [`BackendConfiguration::host`], so host
//! resolution can fail after construction succeeded.

use crate::error::ResolveError;
use crate::spec::SwaggerSpec;
use tracing::debug;
use url::Url;

/// The only specification version [`SpecV2BackendConfiguration`] reads.
pub const SUPPORTED_SWAGGER_VERSION: &str = "2.0";

/// Addressing decisions for one API backend.
pub trait BackendConfiguration {
    /// Effective backend host, possibly with a `:port` suffix.
    fn host(&self) -> Result<String, ResolveError>;

    /// Declared base path, verbatim (may be empty).
    fn base_path(&self) -> &str;

    /// Declared transport schemes, verbatim (may be empty).
    fn http_schemes(&self) -> &[String];

    /// `<scheme>://<host><basePath>` using `https` when the backend offers it,
    /// else the first declared scheme, else `https`.
    fn base_url(&self) -> Result<String, ResolveError> {
        let host = self.host()?;
        let schemes = self.http_schemes();
        let scheme = if schemes.iter().any(|s| s.eq_ignore_ascii_case("https")) {
            "https"
        } else {
            schemes.first().map(String::as_str).unwrap_or("https")
        };
        let base_path = self.base_path().trim_end_matches('/');
        Ok(format!("{}://{}{}", scheme, host, base_path))
    }
}

/// Backend configuration derived from a Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecV2BackendConfiguration {
    host: String,
    base_path: String,
    http_schemes: Vec<String>,
    document_url: String,
}

impl SpecV2BackendConfiguration {
    /// Build from a decoded document and the URL it was retrieved from.
    pub fn new(spec: &SwaggerSpec, document_url: &str) -> Result<Self, ResolveError> {
        if spec.swagger != SUPPORTED_SWAGGER_VERSION {
            return Err(ResolveError::UnsupportedSpecVersion {
                version: spec.swagger.clone(),
            });
        }
        Self::from_parts(
            spec.host.clone(),
            spec.base_path.clone(),
            spec.schemes.clone(),
            document_url,
        )
    }

    /// Build from already extracted backend metadata.
    pub fn from_parts(
        host: impl Into<String>,
        base_path: impl Into<String>,
        http_schemes: Vec<String>,
        document_url: &str,
    ) -> Result<Self, ResolveError> {
        if document_url.is_empty() {
            return Err(ResolveError::MissingMandatoryParameter {
                name: "openAPIDocumentURL",
            });
        }
        Ok(Self {
            host: host.into(),
            base_path: base_path.into(),
            http_schemes,
            document_url: document_url.to_string(),
        })
    }

    /// URL used as the host fallback.
    pub fn document_url(&self) -> &str {
        &self.document_url
    }
}

impl BackendConfiguration for SpecV2BackendConfiguration {
    fn host(&self) -> Result<String, ResolveError> {
        if !self.host.is_empty() {
            return Ok(self.host.clone());
        }
        let host = host_from_url(&self.document_url)?;
        debug!(host = %host, document_url = %self.document_url, "backend host derived from document URL");
        Ok(host)
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn http_schemes(&self) -> &[String] {
        &self.http_schemes
    }
}

/// Fixed backend configuration that never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StubBackendConfiguration {
    host: String,
    base_path: String,
    http_schemes: Vec<String>,
}

impl StubBackendConfiguration {
    pub fn new(host: impl Into<String>, base_path: impl Into<String>, http_schemes: Vec<String>) -> Self {
        Self {
            host: host.into(),
            base_path: base_path.into(),
            http_schemes,
        }
    }
}

impl BackendConfiguration for StubBackendConfiguration {
    fn host(&self) -> Result<String, ResolveError> {
        Ok(self.host.clone())
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn http_schemes(&self) -> &[String] {
        &self.http_schemes
    }
}

/// Extract `host[:port]` from a document URL.
pub fn host_from_url(raw: &str) -> Result<String, ResolveError> {
    let invalid = || ResolveError::InvalidHostUrl {
        url: raw.to_string(),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let parsed = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else if looks_like_bare_host(trimmed) {
        Url::parse(&format!("http://{}", trimmed))
    } else {
        return Err(invalid());
    }
    .map_err(|_| invalid())?;

    let host = match parsed.host_str() {
        Some(h) if !h.is_empty() => h,
        _ => return Err(invalid()),
    };
    Ok(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Whether a scheme-less document URL starts with a host rather than a path.
///
/// The leading segment must be `localhost` or carry a `.` or `:` (domain or
/// port), and must not look like a specification file name.
fn looks_like_bare_host(raw: &str) -> bool {
    if raw.starts_with(['/', '.', '~', '\\']) {
        return false;
    }
    let authority = raw.split(['/', '?', '#']).next().unwrap_or_default();
    if authority.is_empty() || authority.contains('\\') {
        return false;
    }
    let lower = authority.to_ascii_lowercase();
    if SPEC_FILE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return false;
    }
    lower == "localhost" || lower.starts_with("localhost:") || lower.contains(['.', ':'])
}

const SPEC_FILE_EXTENSIONS: [&str; 3] = [".yaml", ".yml", ".json"];
