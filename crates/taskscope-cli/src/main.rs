mod client;
mod commands;
mod config;
mod format;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use client::HttpTaskSource;
use commands::Commands;
use config::ClientConfig;
use taskscope_core::{LineSink, TaskSource, WriterSink};

#[derive(Parser)]
#[command(name = "taskscope")]
#[command(about = "Taskscope - inspect the tasks of a workflow attempt", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control plane base URL (overrides TASKSCOPE_ENDPOINT and the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// YAML client configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Tests may initialize tracing multiple times; it's fine once a global
        // subscriber is already installed.
        return Ok(());
    }
    Ok(())
}

async fn dispatch_command(
    command: Commands,
    source: Arc<dyn TaskSource>,
    config: &ClientConfig,
    sink: &mut dyn LineSink,
) -> Result<()> {
    match command {
        Commands::Tasks(cmd) => cmd.execute(source, config.time_zone, sink).await?,
    }
    Ok(())
}

async fn run_cli(cli: Cli) -> Result<()> {
    let Cli {
        command,
        endpoint,
        config,
    } = cli;

    let mut config = ClientConfig::load(config.as_deref())?;
    config.resolve_endpoint(endpoint);

    let source = Arc::new(
        HttpTaskSource::new(&config)
            .with_context(|| format!("Failed to create client for {}", config.endpoint))?,
    );
    let mut sink = WriterSink::new(std::io::stdout().lock());
    dispatch_command(command, source, &config, &mut sink).await
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;
    run_cli(Cli::parse()).await
}
