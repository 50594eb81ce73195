use super::types::SwaggerSpec;
use anyhow::Context;
use std::path::Path;

/// Serialization format of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Yaml,
    Json,
}

impl SpecFormat {
    /// Pick the format from a file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => SpecFormat::Yaml,
            _ => SpecFormat::Json,
        }
    }
}

/// Parse a specification document held in memory.
pub fn parse_spec(content: &str, format: SpecFormat) -> anyhow::Result<SwaggerSpec> {
    let spec = match format {
        SpecFormat::Yaml => serde_yaml::from_str(content)?,
        SpecFormat::Json => serde_json::from_str(content)?,
    };
    Ok(spec)
}

/// Read and parse a specification document from disk.
pub fn load_spec(file_path: impl AsRef<Path>) -> anyhow::Result<SwaggerSpec> {
    let path = file_path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read specification: {}", path.display()))?;
    parse_spec(&content, SpecFormat::from_path(path))
        .with_context(|| format!("Failed to parse specification: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML_SPEC: &str = r#"swagger: "2.0"
host: api.example.com
basePath: /v1
schemes: [https]
securityDefinitions:
  apikey_auth:
    type: apiKey
    in: header
    name: Authorization
security:
  - apikey_auth: []
paths: {}
"#;

    #[test]
    fn test_parse_yaml_spec() {
        let spec = parse_spec(YAML_SPEC, SpecFormat::Yaml).unwrap();
        assert_eq!(spec.swagger, "2.0");
        assert_eq!(spec.host, "api.example.com");
        assert_eq!(spec.base_path, "/v1");
        assert_eq!(spec.schemes, vec!["https".to_string()]);
        assert_eq!(spec.security_definitions.len(), 1);
        assert_eq!(spec.security.len(), 1);
    }

    #[test]
    fn test_parse_json_spec_defaults_missing_fields() {
        let spec = parse_spec(r#"{"swagger": "2.0"}"#, SpecFormat::Json).unwrap();
        assert!(spec.host.is_empty());
        assert!(spec.base_path.is_empty());
        assert!(spec.schemes.is_empty());
        assert!(spec.security_definitions.is_empty());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SpecFormat::from_path(Path::new("a/b.yaml")), SpecFormat::Yaml);
        assert_eq!(SpecFormat::from_path(Path::new("b.yml")), SpecFormat::Yaml);
        assert_eq!(SpecFormat::from_path(Path::new("b.json")), SpecFormat::Json);
    }

    #[test]
    fn test_load_spec_reports_path_on_missing_file() {
        let err = load_spec("/definitely/not/here.yaml").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.yaml"));
    }
}
