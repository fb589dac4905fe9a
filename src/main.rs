use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use jcaster::config::Settings;
use jcaster::engine::EngineBuilder;

/// First-person grid raycaster.
#[derive(Parser, Debug)]
#[command(name = "jcaster")]
#[command(about = "First-person grid raycaster", long_about = None)]
#[command(version)]
struct Args {
    /// Settings JSON file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Level layout file (defaults to the built-in level)
    #[arg(long, value_name = "FILE")]
    level: Option<PathBuf>,

    /// Resource directory holding textures/, sprites/ and sound/
    #[arg(long, value_name = "DIR")]
    resources: Option<PathBuf>,

    /// RNG seed for spawns and hit rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if args.level.is_some() {
        settings.level = args.level;
    }
    if args.resources.is_some() {
        settings.resources = args.resources;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    EngineBuilder::default().with_settings(settings).run()?;
    Ok(())
}
