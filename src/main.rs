use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use toolchat::app;
use toolchat::config::Config;
use toolchat::server;

mod cli;

use cli::Cli;
use cli::commands::Commands;

fn setup_logging(verbose: bool, default_filter: &str) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        None => handle_serve_command(None, config).await,
        Some(Commands::Serve { bind }) => handle_serve_command(bind.as_deref(), config).await,
        Some(Commands::Ask { message }) => handle_ask_command(message, config).await,
    }
}

async fn handle_serve_command(bind: Option<&str>, config: &Config) -> Result<()> {
    let bind = bind.unwrap_or(&config.server.bind);
    info!("Starting server on {}", bind);

    let llm = app::anthropic_client(config).context("Failed to create LLM client")?;
    let state = app::app_state(config, llm).context("Failed to build application state")?;

    println!("{} {}", "Listening:".green(), bind);
    server::serve(bind, state).await.context("Server failed")?;
    Ok(())
}

async fn handle_ask_command(message: &str, config: &Config) -> Result<()> {
    info!("Asking: {}", message);

    let llm = app::anthropic_client(config).context("Failed to create LLM client")?;
    let orchestrator = app::orchestrator(config, llm).context("Failed to build orchestrator")?;

    let outcome = orchestrator.respond(message).await.context("Chat request failed")?;
    if let Some(tool) = &outcome.tool {
        let status = if tool.is_error { "failed".red() } else { "ok".green() };
        println!("{} {} ({})", "Tool:".cyan(), tool.name, status);
    }
    println!("{}", outcome.reply);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration; log_level seeds the default log filter
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.is_verbose(), config.log_filter());

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
