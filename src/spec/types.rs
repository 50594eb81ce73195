use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::headers::{HeaderParameter, HeaderParameters};
use crate::security::SpecSecurity;

/// HTTP verbs whose operations may declare parameters.
const OPERATION_KEYS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Decoded Swagger 2.0 document, restricted to the fields the resolvers read.
///
/// Unknown fields are ignored so full documents deserialize without loss of
/// the parts that matter here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerSpec {
    /// Declared specification version, e.g. `"2.0"`
    #[serde(default)]
    pub swagger: String,
    /// Backend host, possibly empty
    #[serde(default)]
    pub host: String,
    /// Base path prefixed to every operation path
    #[serde(default)]
    pub base_path: String,
    /// Transport schemes supported by the backend
    #[serde(default)]
    pub schemes: Vec<String>,
    /// Named security scheme declarations
    #[serde(default)]
    pub security_definitions: BTreeMap<String, SecuritySchemeDescriptor>,
    /// Default security requirements applied to every operation
    #[serde(default)]
    pub security: Vec<BTreeMap<String, Vec<String>>>,
    /// Reusable parameter declarations
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterDescriptor>,
    /// Path items keyed by path template; kept as raw JSON
    #[serde(default)]
    pub paths: BTreeMap<String, BTreeMap<String, Value>>,
}

/// One entry of `securityDefinitions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySchemeDescriptor {
    /// `apiKey`, `basic`, ...
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// `header` or `query` for `apiKey`
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Wire-level header or query parameter name for `apiKey`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SecuritySchemeDescriptor {
    /// Descriptor for an API key sent in a header.
    pub fn api_key_header(name: impl Into<String>) -> Self {
        Self {
            scheme_type: "apiKey".to_string(),
            location: Some("header".to_string()),
            name: Some(name.into()),
            description: None,
        }
    }

    /// Descriptor for an API key sent as a query parameter.
    pub fn api_key_query(name: impl Into<String>) -> Self {
        Self {
            scheme_type: "apiKey".to_string(),
            location: Some("query".to_string()),
            name: Some(name.into()),
            description: None,
        }
    }

    /// Descriptor for HTTP basic authentication.
    pub fn basic() -> Self {
        Self {
            scheme_type: "basic".to_string(),
            ..Self::default()
        }
    }
}

/// A parameter declaration, top-level or per operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    /// Overrides the configuration name a header value is looked up under
    #[serde(rename = "x-config-name", default, skip_serializing_if = "Option::is_none")]
    pub config_name: Option<String>,
}

impl SwaggerSpec {
    /// Security declarations consumed by the catalog and the global resolver.
    pub fn security(&self) -> SpecSecurity {
        SpecSecurity::new(self.security_definitions.clone(), self.security.clone())
    }

    /// Every header parameter declared anywhere in the document.
    ///
    /// Parameters are collected from the top-level `parameters` block, then
    /// from each path item and each operation, following local
    /// `#/parameters/<name>` references. A header declared in several places
    /// is reported once, at its first occurrence.
    pub fn header_parameters(&self) -> HeaderParameters {
        let mut headers = HeaderParameters::default();
        for param in self.parameters.values() {
            push_header(&mut headers, param);
        }
        for item in self.paths.values() {
            if let Some(params) = item.get("parameters") {
                self.collect_headers(params, &mut headers);
            }
            for key in OPERATION_KEYS {
                if let Some(params) = item.get(key).and_then(|op| op.get("parameters")) {
                    self.collect_headers(params, &mut headers);
                }
            }
        }
        headers
    }

    fn collect_headers(&self, params: &Value, headers: &mut HeaderParameters) {
        let Some(list) = params.as_array() else {
            return;
        };
        for raw in list {
            if let Some(reference) = raw.get("$ref").and_then(Value::as_str) {
                if let Some(param) = reference
                    .strip_prefix("#/parameters/")
                    .and_then(|name| self.parameters.get(name))
                {
                    push_header(headers, param);
                }
                continue;
            }
            if let Ok(param) = serde_json::from_value::<ParameterDescriptor>(raw.clone()) {
                push_header(headers, &param);
            }
        }
    }
}

fn push_header(headers: &mut HeaderParameters, param: &ParameterDescriptor) {
    if !param.location.eq_ignore_ascii_case("header") {
        return;
    }
    if headers.iter().any(|h| h.name.eq_ignore_ascii_case(&param.name)) {
        return;
    }
    headers.push(HeaderParameter {
        name: param.name.clone(),
        config_name_override: param.config_name.clone(),
    });
}
