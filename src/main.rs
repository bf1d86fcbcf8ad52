#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use startup_validator::{config::Config, gateway, util::mask_secret};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// AI startup validator and FAQ builder backend.
#[derive(Parser, Debug)]
#[command(name = "startup-validator")]
#[command(version)]
#[command(about = "Startup assessments and FAQ sections from a hosted LLM.", long_about = None)]
struct Cli {
    /// Config file (default: ~/.startup-validator/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway
    Gateway {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Show the resolved configuration
    Status,

    /// Print the config file JSON Schema
    ConfigSchema,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "startup-validator", &mut std::io::stdout());
            Ok(())
        }

        Commands::ConfigSchema => {
            println!("{}", Config::schema_json()?);
            Ok(())
        }

        Commands::Status => {
            let config = Config::load(cli.config.as_deref())?;
            print_status(&config);
            Ok(())
        }

        Commands::Gateway { port, host } => {
            let config = Config::load(cli.config.as_deref())?;
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            let port = port.unwrap_or(config.gateway.port);
            if port == 0 {
                info!("Starting gateway on {host} (random port)");
            } else {
                info!("Starting gateway on {host}:{port}");
            }
            gateway::run_gateway(&host, port, config).await
        }
    }
}

fn print_status(config: &Config) {
    println!("Startup Validator Status");
    println!();
    println!("Version:     {}", env!("CARGO_PKG_VERSION"));
    println!("Config:      {}", config.config_path().display());
    println!();
    println!("Provider:    {}", config.provider.name);
    println!("  Endpoint:  {}", config.provider.api_url);
    println!("  Model:     {}", config.provider.model);
    println!("  Timeout:   {}s", config.provider.timeout_secs);
    println!(
        "  API key:   {}",
        config
            .provider
            .api_key
            .as_deref()
            .map_or_else(|| "not set".to_string(), mask_secret)
    );
    println!();
    println!(
        "Gateway:     {}:{}",
        config.gateway.host, config.gateway.port
    );
    println!("  Max body:  {} bytes", config.gateway.max_body_bytes);
    println!("  Timeout:   {}s", config.gateway.request_timeout_secs);
    println!("Observability: {}", config.observability.backend);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_has_no_flag_conflicts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn gateway_flags_parse() {
        let cli = Cli::try_parse_from([
            "startup-validator",
            "--config",
            "/tmp/c.toml",
            "gateway",
            "--port",
            "0",
            "--host",
            "0.0.0.0",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.toml"));
        match cli.command {
            Commands::Gateway { port, host } => {
                assert_eq!(port, Some(0));
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
