use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use cli::output::render;
use screenctl::app::App;
use screenctl::client::HttpRemoteClient;
use screenctl::config::GlobalConfig;
use screenctl::domain::Outcome;

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("screenctl")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("screenctl.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &GlobalConfig) -> Result<Outcome> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{} {}", "Server:".yellow(), config.server.url);
    }

    let client = HttpRemoteClient::new(config.http_config()).context("Failed to create remote client")?;
    let app = App::new(Arc::new(client), config.site_builder());

    let outcome = match &cli.command {
        Commands::Tool(cmd) => app.tool(cmd.to_input(cli.output)).await.context("Tool command failed")?,
        Commands::Site(cmd) => app.site(&cmd.to_input()).await,
        Commands::View(cmd) => app.view(&cmd.to_input()).await,
        Commands::Projects => app.projects().await,
    };
    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();

    let config = GlobalConfig::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    let outcome = run_application(&cli, &config).await.context("Application failed")?;

    println!("{}", render(&outcome, cli.output));

    if outcome.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        if let Some(err) = outcome.error() {
            info!("Command failed with {}: {}", err.code, err.message);
        }
        Ok(ExitCode::FAILURE)
    }
}
