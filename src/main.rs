//! vidbrief CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidbrief::cli::{commands, Cli, Commands};
use vidbrief::config::{ApiKeys, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging; -v flags win over the configured level
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("vidbrief={},tower_http={}", log_level, log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let keys = ApiKeys {
        twelvelabs: cli.twelvelabs_api_key.clone(),
        kindo: cli.kindo_api_key.clone(),
    };

    match &cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings, &keys).await?;
        }

        Commands::Index { name } => {
            commands::run_index(name, settings, &keys).await?;
        }

        Commands::Report { name, kind } => {
            commands::run_report(name, kind, settings, &keys).await?;
        }

        Commands::Query { name, prompt } => {
            commands::run_query(name, prompt, settings, &keys).await?;
        }

        Commands::Ask { name, prompt } => {
            commands::run_ask(name, prompt, settings, &keys).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &keys)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings, cli.config.as_deref())?;
        }
    }

    Ok(())
}
