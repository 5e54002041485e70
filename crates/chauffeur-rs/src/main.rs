use anyhow::Context;
use chauffeur_rs::config::ChauffeurConfig;
use chauffeur_rs::{init_logging, server};
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Booking backend for the chauffeur widget.
#[derive(Parser, Debug)]
#[command(name = "chauffeur", author, version, about)]
struct Cli {
    /// JSON5 config file; environment variables override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overriding config and CHAUFFEUR_BIND.
    #[arg(long)]
    bind: Option<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<ChauffeurConfig> {
    let mut config = ChauffeurConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(bind) = &cli.bind {
        config.server.bind = bind.clone();
        config.validate().context("validating --bind")?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(
        "starting chauffeur (bind={}, table={})",
        config.server.bind, config.store.table
    );
    server::serve(&config).await.context("running server")?;
    Ok(())
}
