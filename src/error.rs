use std::fmt;

/// The only plugin configuration version this crate understands.
pub const SUPPORTED_PLUGIN_CONFIG_VERSION: &str = "1";

/// Error returned when a specification and the user configuration disagree.
///
/// Every variant names the offending entity so the source document can be
/// corrected without inspecting internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A security descriptor uses a `type` other than `apiKey` or `basic`.
    UnsupportedSchemeType {
        /// The offending `type` value
        scheme_type: String,
    },
    /// An `apiKey` descriptor uses an `in` other than `header` or `query`.
    UnsupportedSchemeLocation {
        /// The offending `in` value
        location: String,
    },
    /// An `apiKey` descriptor has no wire-level parameter name.
    MissingApiKeyName {
        /// Declared name of the security definition
        definition: String,
    },
    /// No user-supplied value for a resolved security definition.
    MissingSecurityValue {
        /// Configuration name of the security definition
        config_name: String,
    },
    /// No user-supplied value for a declared header parameter.
    MissingHeaderValue {
        /// Configuration name of the header parameter
        config_name: String,
    },
    /// Two header parameters normalise to the same configuration name.
    DuplicateHeaderConfigName {
        /// The shared configuration name
        config_name: String,
        /// Source name of the header declared first
        first: String,
        /// Source name of the colliding header
        second: String,
    },
    /// Two security definitions normalise to the same configuration name.
    DuplicateSecurityConfigName {
        /// The shared configuration name
        config_name: String,
        /// Declared name of the first definition
        first: String,
        /// Declared name of the colliding definition
        second: String,
    },
    /// A global security requirement references an undeclared definition.
    UnresolvedGlobalScheme {
        /// Name referenced by the global security block
        scheme: String,
    },
    /// The backend host could not be derived from the document URL.
    InvalidHostUrl {
        /// The document URL that was tried
        url: String,
    },
    /// The specification declares a version the backend resolver cannot read.
    UnsupportedSpecVersion {
        /// The declared `swagger` version
        version: String,
    },
    /// The persisted plugin configuration carries an unknown version.
    UnsupportedConfigVersion {
        /// The version found in the document
        found: String,
    },
    /// A service location is neither a URL nor an existing file.
    InvalidServiceLocation {
        /// Service name
        service: String,
        /// Location that failed validation
        location: String,
    },
    /// The plugin configuration does not declare the requested service.
    ServiceNotFound {
        /// Requested service name
        service: String,
    },
    /// A required constructor argument was empty.
    MissingMandatoryParameter {
        /// Name of the parameter
        name: &'static str,
    },
    /// A credential cannot be turned into a request decision.
    InvalidCredential {
        /// Configuration name of the security definition
        config_name: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnsupportedSchemeType { scheme_type } => write!(
                f,
                "'{}' not supported, only 'apiKey' and 'basic' values are valid",
                scheme_type
            ),
            ResolveError::UnsupportedSchemeLocation { location } => write!(
                f,
                "apiKey In value '{}' not supported, only 'header' and 'query' values are valid",
                location
            ),
            ResolveError::MissingApiKeyName { definition } => write!(
                f,
                "apiKey security definition '{}' is missing the 'name' of the header or query parameter to send",
                definition
            ),
            ResolveError::MissingSecurityValue { config_name } => write!(
                f,
                "security schema definition '{}' is missing the value, please make sure this value is provided in the provider configuration",
                config_name
            ),
            ResolveError::MissingHeaderValue { config_name } => write!(
                f,
                "header parameter '{}' is missing the value, please make sure this value is provided in the provider configuration",
                config_name
            ),
            ResolveError::DuplicateHeaderConfigName {
                config_name,
                first,
                second,
            } => write!(
                f,
                "header parameters '{}' and '{}' both resolve to configuration name '{}', set 'x-config-name' on one of them",
                first, second, config_name
            ),
            ResolveError::DuplicateSecurityConfigName {
                config_name,
                first,
                second,
            } => write!(
                f,
                "security definitions '{}' and '{}' both resolve to configuration name '{}', rename one of them",
                first, second, config_name
            ),
            ResolveError::UnresolvedGlobalScheme { scheme } => write!(
                f,
                "global security scheme '{}' not found or not matching supported 'apiKey' type",
                scheme
            ),
            ResolveError::InvalidHostUrl { url } => {
                write!(f, "could not find valid host from URL provided: '{}'", url)
            }
            ResolveError::UnsupportedSpecVersion { version } => write!(
                f,
                "swagger version '{}' not supported, specV2BackendConfiguration only supports 2.0",
                version
            ),
            ResolveError::UnsupportedConfigVersion { .. } => write!(
                f,
                "provider configuration version not matching current implementation, please use version '{}' of provider configuration specification",
                SUPPORTED_PLUGIN_CONFIG_VERSION
            ),
            ResolveError::InvalidServiceLocation { service, location } => write!(
                f,
                "service '{}' found in the provider configuration does not contain a valid SwaggerURL value ('{}'). \
                URL must be either a valid formed URL or a path to an existing swagger file stored in the disk",
                service, location
            ),
            ResolveError::ServiceNotFound { service } => write!(
                f,
                "service '{}' not found in provider external configuration",
                service
            ),
            ResolveError::MissingMandatoryParameter { name } => {
                write!(f, "missing mandatory parameter {}", name)
            }
            ResolveError::InvalidCredential {
                config_name,
                reason,
            } => write!(
                f,
                "value provided for security schema definition '{}' is not valid: {}",
                config_name, reason
            ),
        }
    }
}

impl std::error::Error for ResolveError {}
