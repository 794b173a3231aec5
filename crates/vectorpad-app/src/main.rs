//! Main application entry point.

use clap::Parser;
use std::path::PathBuf;
use vectorpad_app::{ReplayError, Script, ShortcutRegistry, load_config, replay, report};
use vectorpad_core::{Editor, EditorConfig};

/// Replay scripted pointer and keyboard input through the VectorPad editor
#[derive(Parser, Debug)]
#[command(name = "vectorpad")]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to replay
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Editor config (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the keyboard shortcuts and exit
    #[arg(long)]
    shortcuts: bool,
}

fn run(args: Args) -> Result<(), ReplayError> {
    if args.shortcuts {
        ShortcutRegistry::print_all();
        return Ok(());
    }
    let Some(path) = args.script else {
        log::warn!("No script given, nothing to replay");
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EditorConfig::default(),
    };
    let script = Script::load(&path)?;
    let mut editor = Editor::new(config)?;
    log::info!("Replaying {} steps from {}", script.steps.len(), path.display());

    let ticks = replay(&mut editor, &script)?;
    print!("{}", report(&editor, &ticks));
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting VectorPad");

    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
