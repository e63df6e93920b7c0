// SPDX-License-Identifier: MIT OR Apache-2.0
//! CueFlow - command line cue sequencer.
//!
//! Reads a cue script, resolves relative sync anchors into an absolute
//! timeline, and plays it back in real time:
//! - Script loading and tokenizing
//! - Catalog lookup (built-in show or a RON file)
//! - Timeline resolution via `cueflow_timeline`
//! - Realtime execution with rodio audio and a pluggable actuator

mod actuator;
mod audio;
mod script;

use actuator::{GpioActuator, NullActuator};
use anyhow::{Context, Result};
use audio::{AudioEngine, SilentEngine};
use clap::{Parser, ValueEnum};
use cueflow_timeline::{
    execute, resolve, Actuator, AssetLoader, AudioOutput, CancelToken, Command, CommandCatalog,
    ExecuteError,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "cueflow")]
#[command(version, about = "Resolve a cue script and play it in real time", long_about = None)]
struct Cli {
    /// Path to the cue script
    script: PathBuf,

    /// Directory containing sound assets
    #[arg(long, default_value = "sounds")]
    sounds_dir: PathBuf,

    /// RON catalog file overriding the built-in show catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Physical actuator implementation
    #[arg(long, value_enum, default_value_t = ActuatorKind::Null)]
    actuator: ActuatorKind,

    /// GPIO pin driven when --actuator gpio is selected
    #[arg(long, default_value_t = 17)]
    gpio_pin: u32,

    /// Validate and walk the schedule without opening an audio device
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ActuatorKind {
    /// Log-only stand-in
    Null,
    /// Sysfs GPIO pin
    Gpio,
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("cueflow_app=info".parse().unwrap())
        .add_directive("cueflow_timeline=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        tracing::error!("cueflow failed: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let commands = script::load_script(&cli.script)?;
    tracing::info!(
        cues = commands.len(),
        script = %cli.script.display(),
        "script loaded"
    );

    let catalog = load_catalog(cli.catalog.as_deref())?;

    let mut actuator: Box<dyn Actuator> = match cli.actuator {
        ActuatorKind::Null => Box::new(NullActuator),
        ActuatorKind::Gpio => Box::new(GpioActuator::new(cli.gpio_pin)),
    };

    if cli.dry_run {
        let mut engine = SilentEngine::new(&cli.sounds_dir);
        run_show(&commands, &catalog, &mut engine, actuator.as_mut())
    } else {
        let mut engine = AudioEngine::new(&cli.sounds_dir)?;
        run_show(&commands, &catalog, &mut engine, actuator.as_mut())
    }
}

fn load_catalog(path: Option<&Path>) -> Result<CommandCatalog> {
    let Some(path) = path else {
        return Ok(CommandCatalog::default_show());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog: CommandCatalog = ron::from_str(&text)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;
    tracing::info!(cues = catalog.len(), catalog = %path.display(), "catalog loaded");
    Ok(catalog)
}

fn run_show<E: AssetLoader + AudioOutput>(
    commands: &[Command],
    catalog: &CommandCatalog,
    engine: &mut E,
    actuator: &mut dyn Actuator,
) -> Result<()> {
    let timeline = resolve(commands, catalog, engine);
    if !timeline.skipped.is_empty() {
        tracing::warn!(dropped = timeline.skipped.len(), "some cues were dropped");
    }

    match execute(&timeline.events, actuator, engine, &CancelToken::new()) {
        Ok(()) => Ok(()),
        Err(ExecuteError::EmptyTimeline) => {
            tracing::warn!("no cues survived resolution, nothing to do");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
