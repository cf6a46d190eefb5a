//! cfptime CLI entry point.

use std::process::ExitCode;

use cfptime_core::{OutputFormat, TracingConfig, init_tracing};
use clap::Parser;

use cfptime_client::cli::{Cli, Command, ConfigAction};
use cfptime_client::commands;
use cfptime_client::config::ClientConfig;
use cfptime_client::error::{ClientError, ClientResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let mut config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().unwrap_or_default()
    };
    config.apply_cli(&cli);
    config.adapt_to_terminal();

    let format = cli.output_format();
    let tracing_config = if config.debug {
        TracingConfig::cli_debug()
    } else if matches!(cli.command, Some(Command::Watch { .. })) && format == OutputFormat::Json {
        TracingConfig::watcher()
    } else {
        TracingConfig::cli_quiet()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match cli.command {
        None | Some(Command::List) => commands::list::run(&config, format).await,
        Some(Command::Watch { interval }) => {
            if let Some(secs) = interval {
                config.refresh.interval = secs;
            }
            commands::watch::run(&config, format).await
        }
        Some(Command::Labels) => commands::labels::run(&config, format).await,
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
