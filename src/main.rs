use anyhow::Context;
use clap::{ArgAction, Parser};
use scene_input::replay;
use scene_input::{Config, RouterSettings};
use std::io::{self, Write};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SCENE_INPUT_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "scene-input")]
#[command(version, long_version = LONG_VERSION, about = "Replay input traces against a scene graph")]
struct Cli {
    /// Trace file describing the scene and the input frames to replay
    #[arg(long, short = 't', value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Print dispatched events as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Configuration file (defaults to $SCENE_INPUT_CONFIG or ~/.config/scene-input/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the default configuration to $SCENE_INPUT_CONFIG or ~/.config/scene-input/config.toml and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Created default config at {}", path.display());
        return Ok(());
    }

    let Some(trace_path) = cli.trace else {
        // No trace: show usage
        println!("scene-input: Replay input traces against a scene graph");
        println!();
        println!("Usage:");
        println!("  scene-input --trace FILE           Replay a trace, one event per line");
        println!("  scene-input --trace FILE --json    Replay a trace, JSON lines");
        println!("  scene-input --init-config          Write the default config file");
        println!("  scene-input --help                 Show help");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let settings = RouterSettings::from(&config);
    log::debug!("Router settings: {settings:?}");

    let trace = replay::load(&trace_path)?;
    let outcome = replay::run(&trace, settings)
        .with_context(|| format!("Failed to replay {}", trace_path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in &outcome.events {
        if cli.json {
            writeln!(out, "{}", serde_json::to_string(event)?)?;
        } else {
            writeln!(out, "{event}")?;
        }
    }

    if !cli.json {
        match &outcome.focused {
            Some(name) => writeln!(out, "focused: {name}")?,
            None => writeln!(out, "focused: none")?,
        }
    }

    log::info!("Replayed {} events", outcome.events.len());
    Ok(())
}
