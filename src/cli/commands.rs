use crate::backend::{BackendConfiguration, SpecV2BackendConfiguration};
use crate::plugin_config::{
    load_plugin_config, resolve_plugin_config_path, PluginConfigSchema, ServiceConfiguration,
};
use crate::provider_config::{ChainedLookup, EnvLookup, ProviderConfiguration, ValueLookup};
use crate::spec::load_spec;
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

/// Command-line interface for openapi-provider
#[derive(Parser)]
#[command(name = "openapi-provider")]
#[command(about = "Resolve OpenAPI security, headers and backend configuration", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate the plugin configuration
    ValidateConfig {
        /// Path to the plugin configuration file
        /// If not provided, falls back to the provider's environment variable, then the default path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Provider name used to derive the environment variable
        #[arg(short, long, default_value = "openapi")]
        provider: String,
    },
    /// Print the canonical YAML form of a plugin configuration file
    MarshalConfig {
        /// Path to the plugin configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Resolve a specification against user-supplied values
    Resolve {
        /// Path to the Swagger 2.0 specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// URL the specification was retrieved from (host fallback)
        #[arg(long)]
        document_url: String,

        /// Configuration value as name=value (repeatable)
        #[arg(long = "set", value_parser = parse_key_val)]
        values: Vec<(String, String)>,

        /// Also read values from <PREFIX><CONFIG_NAME> environment variables
        #[arg(long)]
        env_prefix: Option<String>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid name=value pair: no '=' found in '{}'", s))?;
    if key.is_empty() {
        return Err(format!("invalid name=value pair: empty name in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Execute the parsed command.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::ValidateConfig { config, provider } => {
            let path = resolve_plugin_config_path(config.as_deref(), &provider).ok_or_else(|| {
                anyhow!(
                    "no plugin configuration found for provider '{}'; pass --config or set {}",
                    provider,
                    crate::plugin_config::plugin_config_env_var(&provider)
                )
            })?;
            let schema = load_plugin_config(&path)?;
            info!(path = %path.display(), "plugin configuration is valid");
            println!("version: {}", schema.version());
            for (name, service) in schema.all_service_configurations() {
                println!(
                    "{}\t{}\tinsecure_skip_verify={}",
                    name,
                    service.swagger_url(),
                    service.is_insecure_skip_verify_enabled()
                );
            }
            Ok(())
        }
        Commands::MarshalConfig { config } => {
            let schema = load_plugin_config(&config)?;
            print!("{}", schema.marshal()?);
            Ok(())
        }
        Commands::Resolve {
            spec,
            document_url,
            values,
            env_prefix,
        } => {
            let document = load_spec(&spec)?;

            let security = document.security();
            let catalog = security.security_definitions()?;
            let global = security.global_security_schemes()?;
            let backend = SpecV2BackendConfiguration::new(&document, &document_url)?;
            let headers = document.header_parameters();

            let supplied: HashMap<String, String> = values.into_iter().collect();
            let env = env_prefix.map(EnvLookup::new);
            let mut sources: Vec<&dyn ValueLookup> = vec![&supplied];
            if let Some(env) = &env {
                sources.push(env);
            }
            let lookup = ChainedLookup::new(sources);
            let provider = ProviderConfiguration::new(&headers, Some(&catalog), &lookup)
                .with_context(|| format!("Failed to configure provider for {}", spec.display()))?;

            println!("host: {}", backend.host()?);
            println!("base_path: {}", backend.base_path());
            println!("schemes: {}", backend.http_schemes().join(","));
            println!("base_url: {}", backend.base_url()?);
            for definition in &catalog {
                println!(
                    "security_definition: {} ({}) -> {}",
                    definition.name(),
                    definition.kind(),
                    definition.config_name()
                );
            }
            for scheme in &global {
                let configured = provider.authenticator_for(scheme).is_some();
                println!("global_security: {} configured={}", scheme.name, configured);
            }
            for name in provider.header_config_names() {
                println!("header: {}", name);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("apikey_auth=a=b").unwrap(),
            ("apikey_auth".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_resolve_requires_document_url() {
        assert!(Cli::try_parse_from(["openapi-provider", "resolve", "--spec", "swagger.yaml"]).is_err());
    }

    #[test]
    fn test_cli_parses_resolve() {
        let cli = Cli::try_parse_from([
            "openapi-provider",
            "resolve",
            "--spec",
            "swagger.yaml",
            "--document-url",
            "https://api.example.com/swagger.yaml",
            "--set",
            "apikey_auth=secret",
            "--set",
            "x_request_id=1",
        ])
        .unwrap();
        match cli.command {
            Commands::Resolve {
                spec,
                document_url,
                values,
                ..
            } => {
                assert_eq!(spec, PathBuf::from("swagger.yaml"));
                assert_eq!(document_url, "https://api.example.com/swagger.yaml");
                assert_eq!(values.len(), 2);
            }
            _ => panic!("expected resolve command"),
        }
    }
}
