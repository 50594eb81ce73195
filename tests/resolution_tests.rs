#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end resolution of a specification against user values.

use http::header::{HeaderMap, AUTHORIZATION};
use openapi_provider::backend::{BackendConfiguration, SpecV2BackendConfiguration};
use openapi_provider::provider_config::{EnvLookup, LookupFn, ProviderConfiguration};
use openapi_provider::spec::{load_spec, parse_spec, SpecFormat};
use openapi_provider::{GlobalSecurityScheme, HeaderParameter, ResolveError, SecurityDefinition};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use url::Url;

mod common;
use common::fixtures::PETSTORE_SPEC;
use common::temp_files::create_temp_yaml;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn all_values() -> HashMap<String, String> {
    [
        ("apikey_auth", "header-secret"),
        ("query_key", "query-secret"),
        ("basic_auth", "admin:hunter2"),
        ("request_id", "req-42"),
        ("x_tenant", "acme"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn test_load_and_resolve_full_spec() {
    let file = create_temp_yaml(PETSTORE_SPEC);
    let spec = load_spec(file.path()).unwrap();
    let security = spec.security();

    let catalog = security.security_definitions().unwrap();
    let got: HashSet<SecurityDefinition> = catalog.iter().cloned().collect();
    assert_eq!(got.len(), 3);
    assert!(got.contains(&SecurityDefinition::ApiKeyQuery {
        name: "queryKey".into(),
        param: "api_key".into(),
    }));

    let global = security.global_security_schemes().unwrap();
    let names: Vec<&str> = global.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["apikey_auth", "basic_auth"]);

    let backend =
        SpecV2BackendConfiguration::new(&spec, "https://petstore.example.com/swagger.yaml")
            .unwrap();
    assert_eq!(backend.host().unwrap(), "petstore.example.com");
    assert_eq!(backend.base_url().unwrap(), "https://petstore.example.com/v1");

    let headers = spec.header_parameters();
    let config = ProviderConfiguration::new(&headers, Some(&catalog), &all_values()).unwrap();
    assert_eq!(
        config.header_value_for(&HeaderParameter::new("X-Request-ID").with_config_name("request_id")),
        Some("req-42")
    );
    assert_eq!(config.header_value_for(&HeaderParameter::new("X-Tenant")), Some("acme"));
}

#[test]
fn test_authenticators_prepare_request() {
    let spec = parse_spec(PETSTORE_SPEC, SpecFormat::Yaml).unwrap();
    let catalog = spec.security().security_definitions().unwrap();
    let config =
        ProviderConfiguration::new(&spec.header_parameters(), Some(&catalog), &all_values())
            .unwrap();

    let mut headers = HeaderMap::new();
    let mut url = Url::parse("https://petstore.example.com/v1/pets").unwrap();
    for definition in &catalog {
        config
            .authenticator_for_definition(definition)
            .unwrap()
            .apply(&mut headers, &mut url);
    }
    assert_eq!(headers.get("x-api-key").unwrap(), "header-secret");
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Basic YWRtaW46aHVudGVyMg==");
    assert_eq!(url.query(), Some("api_key=query-secret"));
}

#[test]
fn test_build_is_all_or_nothing() {
    let spec = parse_spec(PETSTORE_SPEC, SpecFormat::Yaml).unwrap();
    let catalog = spec.security().security_definitions().unwrap();
    let mut values = all_values();
    values.remove("x_tenant");

    let result = ProviderConfiguration::new(&spec.header_parameters(), Some(&catalog), &values);
    assert_eq!(
        result.unwrap_err(),
        ResolveError::MissingHeaderValue {
            config_name: "x_tenant".to_string()
        }
    );
}

#[test]
fn test_missing_security_value_stops_before_headers() {
    let spec = parse_spec(PETSTORE_SPEC, SpecFormat::Yaml).unwrap();
    let catalog = spec.security().security_definitions().unwrap();
    let queried = Mutex::new(Vec::new());
    let lookup = LookupFn(|name: &str| {
        queried.lock().unwrap().push(name.to_string());
        if name == "basic_auth" {
            None
        } else {
            all_values().get(name).cloned()
        }
    });

    let err = ProviderConfiguration::new(&spec.header_parameters(), Some(&catalog), &lookup)
        .unwrap_err();
    assert!(matches!(err, ResolveError::MissingSecurityValue { .. }));
    let queried = queried.lock().unwrap();
    assert!(!queried.iter().any(|n| n == "request_id" || n == "x_tenant"));
}

#[test]
fn test_global_scheme_requery_matches_build() {
    let spec = parse_spec(PETSTORE_SPEC, SpecFormat::Yaml).unwrap();
    let security = spec.security();
    let catalog = security.security_definitions().unwrap();
    let config = ProviderConfiguration::new(&[], Some(&catalog), &all_values()).unwrap();
    for scheme in security.global_security_schemes().unwrap() {
        assert!(config.authenticator_for(&scheme).is_some());
    }
    assert!(config
        .authenticator_for(&GlobalSecurityScheme::new("undeclared", Vec::new()))
        .is_none());
}

#[test]
fn test_env_lookup_supplies_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("OAPI_TEST_X_TENANT", "from-env");
    let headers = vec![HeaderParameter::new("X-Tenant")];
    let config =
        ProviderConfiguration::new(&headers, None, &EnvLookup::new("OAPI_TEST_")).unwrap();
    std::env::remove_var("OAPI_TEST_X_TENANT");
    assert_eq!(config.header_value_for(&headers[0]), Some("from-env"));
}

#[test]
fn test_declared_host_is_used_verbatim() {
    let yaml = PETSTORE_SPEC.replace("basePath: /v1", "host: api.internal:9000\nbasePath: /v1");
    let spec = parse_spec(&yaml, SpecFormat::Yaml).unwrap();
    let backend = SpecV2BackendConfiguration::new(&spec, "https://elsewhere.example.com/spec").unwrap();
    assert_eq!(backend.host().unwrap(), "api.internal:9000");
}

#[test]
fn test_fresh_configurations_per_consumer() {
    let spec = parse_spec(PETSTORE_SPEC, SpecFormat::Yaml).unwrap();
    let catalog = spec.security().security_definitions().unwrap();
    let headers = spec.header_parameters();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let catalog = catalog.clone();
            let headers = headers.clone();
            std::thread::spawn(move || {
                let mut values = all_values();
                values.insert("x_tenant".to_string(), format!("tenant-{}", i));
                ProviderConfiguration::new(&headers, Some(&catalog), &values).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let config = handle.join().unwrap();
        assert_eq!(
            config.header_value_for(&HeaderParameter::new("X-Tenant")),
            Some(format!("tenant-{}", i).as_str())
        );
    }
}
