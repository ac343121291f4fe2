use anyhow::{Context, Result};
use clap::Parser;
use reco_harness::{Config, DialogflowService, LogCache, RunDispatcher, TracingSink};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Regression harness for audio intent detection.
#[derive(Debug, Parser)]
#[command(name = "reco-harness", version)]
struct Args {
    /// Configuration file (any format the config crate understands)
    #[arg(long)]
    config: Option<String>,

    /// Override the sample directory from configuration
    #[arg(long)]
    sample_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(sample_dir) = args.sample_dir {
        cfg.sample_dir = sample_dir;
    }

    info!("reco-harness v{}", env!("CARGO_PKG_VERSION"));
    info!("Connecting with credentials from {}", cfg.credentials);
    info!("Testing audio files in {}", cfg.sample_dir);

    let service = Arc::new(DialogflowService::new(
        cfg.project_id.clone(),
        cfg.access_token.clone(),
    ));
    let config = Arc::new(cfg);

    let dispatcher = RunDispatcher::new(service, Arc::clone(&config));
    let cache = Arc::new(LogCache::new());

    let report = dispatcher.run(Arc::clone(&cache)).await?;

    let cache = Arc::into_inner(cache).context("log cache still in use after run")?;
    cache.flush(&mut TracingSink);

    info!(
        "Run complete: {}/{} samples succeeded ({} failed) in {:.1}s",
        report.succeeded,
        report.total,
        report.failed,
        report.duration.as_secs_f64()
    );

    Ok(())
}
