use clap::Parser;
use openapi_provider::cli::{run_cli, Cli};
use openapi_provider::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging_with_config(&LogConfig::from_env())?;
    run_cli(Cli::parse())
}
