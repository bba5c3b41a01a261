//! Mathpipe CLI
//!
//! Entry point for the `mathpipe` binary. Assembles the engine
//! configuration from process arguments, initializes the engine, and runs
//! the line loop over stdio until stdin ends.
//!
//! stdout carries protocol lines only; all diagnostics go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::io::BufReader;

use mathpipe::engine::{CommandEngine, Engine, MockEngine};
use mathpipe::{config, serve};
use mathpipe_protocol::Generation;

#[derive(Parser)]
#[command(name = "mathpipe")]
#[command(about = "Line-oriented JSON bridge to a math typesetting engine", version)]
struct Cli {
    /// Protocol generation to serve (1, 3, or 4)
    #[arg(long, default_value_t = mathpipe_protocol::PROTOCOL_CURRENT)]
    protocol: u32,

    /// Use the built-in mock engine instead of an external converter
    #[arg(long)]
    mock: bool,

    /// External converter command invoked per conversion
    #[arg(long, default_value = "mathjax-convert")]
    engine_command: PathBuf,

    /// Configuration overrides, one JSON object each (generation 4 only)
    #[arg(value_name = "OVERRIDE")]
    overrides: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(generation) = Generation::from_number(cli.protocol) else {
        bail!("unsupported protocol generation {} (known: 1, 3, 4)", cli.protocol);
    };
    tracing::info!("serving protocol generation {}", generation.number());

    let config = if generation == Generation::V4 {
        config::assemble(&cli.overrides)
    } else {
        if !cli.overrides.is_empty() {
            tracing::warn!(
                "configuration overrides require protocol generation 4; ignoring {} argument(s)",
                cli.overrides.len()
            );
        }
        config::engine_defaults()
    };
    tracing::info!(
        "engine configuration\n{}",
        serde_json::to_string_pretty(&config).context("serializing configuration")?
    );

    let engine: Arc<dyn Engine> = if cli.mock {
        Arc::new(MockEngine::new())
    } else {
        Arc::new(
            CommandEngine::new(cli.engine_command, &config)
                .context("initializing converter engine")?,
        )
    };

    let stdin = BufReader::new(tokio::io::stdin());
    serve(engine, generation, stdin, tokio::io::stdout())
        .await
        .context("serve loop failed")?;
    Ok(())
}
