#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a fresh temporary file with the given extension.
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn create_temp_file(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("oapi_provider_test_")
            .suffix(&format!(".{}", ext))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_file(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_file(content, "json")
    }
}

pub mod fixtures {
    /// Swagger 2.0 document exercising every supported security mechanism.
    pub const PETSTORE_SPEC: &str = r##"swagger: "2.0"
info:
  title: Pet Store
  version: "1.0.0"
basePath: /v1
schemes:
  - http
  - https
securityDefinitions:
  apikey_auth:
    type: apiKey
    in: header
    name: X-API-Key
  queryKey:
    type: apiKey
    in: query
    name: api_key
  basic_auth:
    type: basic
security:
  - apikey_auth: []
  - basic_auth: []
parameters:
  requestId:
    name: X-Request-ID
    in: header
    x-config-name: request_id
paths:
  /pets:
    get:
      parameters:
        - $ref: "#/parameters/requestId"
        - name: limit
          in: query
          type: integer
      responses:
        "200":
          description: OK
    post:
      parameters:
        - name: X-Tenant
          in: header
          type: string
      responses:
        "201":
          description: Created
"##;
}
