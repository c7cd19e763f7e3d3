use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use log::info;
use pursuit::{init_logging, ArenaPlugin, ArenaSettings, PresentationPlugin};

/// A top-down arena survival game
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file overriding the default arena settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match &args.config {
        Some(path) => ArenaSettings::load(path)
            .with_context(|| format!("loading arena settings from {}", path.display()))?,
        None => ArenaSettings::default(),
    };
    info!("starting arena with {} enemies", settings.enemies.len());

    let exit = App::new()
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_plugins((ArenaPlugin::new(settings), PresentationPlugin))
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("game exited with error code {code}"),
    }
}
