//! Handhold Testbed
//!
//! Plays a scripted grab session headlessly and logs what a renderer would
//! draw. Use `--config <path>` to load a TOML config file.

use anyhow::{Context, Result};
use clap::Parser;
use handhold_interaction::devices::FileProfileSource;
use handhold_interaction::HandholdConfig;
use std::path::PathBuf;
use std::sync::Arc;
use testbed::script::default_script;
use testbed::sink::LogSink;
use testbed::Testbed;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "crates/apps/testbed/config.toml";

/// Handhold Testbed
///
/// Runs a scripted controller session: hover, grab, pull, lift, release.
#[derive(Parser, Debug)]
#[command(name = "testbed")]
#[command(about = "Headless scripted grab session", long_about = None)]
struct Args {
    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding profilesList.json, overrides the config
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Log body poses every N frames
    #[arg(long, default_value = "60")]
    log_every: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    tracing::info!("Handhold Testbed v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(args.config.as_ref())?;
    if let Some(profiles) = args.profiles {
        config.input.profiles_path = profiles;
    }
    tracing::info!("Input profiles from {}", config.input.profiles_path.display());

    let profiles = Arc::new(FileProfileSource::new(config.input.profiles_path.clone()));
    let mut testbed = Testbed::new(config, profiles);
    let mut sink = LogSink::new(args.log_every);

    let report = testbed.run(&default_script(), args.frames, &mut sink).await;

    match report.profile {
        Some(profile) => tracing::info!("Controller used input profile {}", profile),
        None => tracing::warn!("Controller input profile never resolved"),
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<HandholdConfig> {
    if let Some(path) = path {
        return HandholdConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let default_config = PathBuf::from(DEFAULT_CONFIG);
    if default_config.exists() {
        tracing::info!("Loading default config: {}", default_config.display());
        HandholdConfig::load(&default_config)
            .with_context(|| format!("Failed to load config {}", default_config.display()))
    } else {
        Ok(HandholdConfig::default())
    }
}
