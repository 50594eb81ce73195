#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Plugin configuration: loading, validation and canonical marshaling.

use openapi_provider::plugin_config::{
    load_plugin_config, plugin_config_env_var, resolve_plugin_config_path, PluginConfigSchema,
    PluginConfigSchemaV1, ServiceConfigV1, ServiceConfiguration,
};
use openapi_provider::ResolveError;
use std::collections::BTreeMap;
use std::sync::Mutex;

mod common;
use common::temp_files::{create_temp_json, create_temp_yaml};

static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_marshal_then_parse_round_trips() {
    let spec_file = create_temp_yaml("swagger: \"2.0\"\n");
    let mut services = BTreeMap::new();
    services.insert(
        "cdn".to_string(),
        ServiceConfigV1::new("https://cdn.example.com/swagger.yaml", false),
    );
    services.insert(
        "local".to_string(),
        ServiceConfigV1::new(spec_file.path().to_str().unwrap(), true),
    );
    let original = PluginConfigSchemaV1::new(services);

    let marshaled = original.marshal().unwrap();
    let parsed = PluginConfigSchemaV1::from_yaml(&marshaled).unwrap();
    assert!(parsed.validate().is_ok());
    assert_eq!(parsed.all_service_configurations().len(), 2);
    assert_eq!(parsed, original);
    assert_eq!(parsed.marshal().unwrap(), marshaled);
}

#[test]
fn test_marshal_orders_services_by_name() {
    let mut services = BTreeMap::new();
    services.insert("zoo".to_string(), ServiceConfigV1::new("http://z.example.com/s.yaml", false));
    services.insert("ant".to_string(), ServiceConfigV1::new("http://a.example.com/s.yaml", true));
    let out = PluginConfigSchemaV1::new(services).marshal().unwrap();
    assert_eq!(
        out,
        "version: \"1\"\n\
         services:\n  \
         ant:\n    \
         swagger-url: http://a.example.com/s.yaml\n    \
         insecure_skip_verify: true\n  \
         zoo:\n    \
         swagger-url: http://z.example.com/s.yaml\n    \
         insecure_skip_verify: false\n"
    );
}

#[test]
fn test_load_validates_yaml_file() {
    let file = create_temp_yaml(
        "version: '1'\nservices:\n  petstore:\n    swagger-url: https://petstore.example.com/swagger.yaml\n",
    );
    let schema = load_plugin_config(file.path()).unwrap();
    let petstore = schema.service_config("petstore").unwrap();
    assert_eq!(petstore.swagger_url(), "https://petstore.example.com/swagger.yaml");
    assert!(!petstore.is_insecure_skip_verify_enabled());
}

#[test]
fn test_load_json_file() {
    let file = create_temp_json(
        r#"{"version": "1", "services": {"svc": {"swagger-url": "http://svc.example.com/api.json", "insecure_skip_verify": true}}}"#,
    );
    let schema = load_plugin_config(file.path()).unwrap();
    assert!(schema.service_config("svc").unwrap().is_insecure_skip_verify_enabled());
}

#[test]
fn test_load_rejects_unsupported_version() {
    let file = create_temp_yaml("version: '2'\nservices: {}\n");
    let err = load_plugin_config(file.path()).unwrap_err();
    let cause = err.downcast_ref::<ResolveError>().unwrap();
    assert_eq!(
        cause,
        &ResolveError::UnsupportedConfigVersion {
            found: "2".to_string()
        }
    );
    assert!(format!("{:#}", err).contains("please use version '1'"));
}

#[test]
fn test_load_rejects_missing_local_file() {
    let file = create_temp_yaml(
        "version: \"1\"\nservices:\n  broken:\n    swagger-url: ./does/not/exist.yaml\n",
    );
    let err = load_plugin_config(file.path()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ResolveError>(),
        Some(&ResolveError::InvalidServiceLocation {
            service: "broken".to_string(),
            location: "./does/not/exist.yaml".to_string(),
        })
    );
}

#[test]
fn test_load_reports_unparsable_file() {
    let file = create_temp_yaml("services: [not, a, map]\n");
    let err = load_plugin_config(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse plugin configuration"));
}

#[test]
fn test_env_var_locates_config() {
    let _guard = ENV_LOCK.lock().unwrap();
    let file = create_temp_yaml("version: \"1\"\nservices: {}\n");
    let var = plugin_config_env_var("integration");
    std::env::set_var(&var, file.path());
    let resolved = resolve_plugin_config_path(None, "integration");
    std::env::remove_var(&var);
    assert_eq!(resolved.as_deref(), Some(file.path()));
}
