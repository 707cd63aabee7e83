use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use smooth_snake::game::{LevelDefinition, SessionConfig};
use smooth_snake::modes::{HeadlessConfig, HeadlessMode, RealtimeConfig, RealtimeMode};

#[derive(Parser)]
#[command(name = "smooth_snake")]
#[command(version, about = "Continuous-motion snake engine")]
struct Cli {
    /// How to drive the session
    #[arg(long, value_enum, default_value = "headless")]
    mode: Mode,

    /// Session configuration JSON (defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Level file applied on top of the session configuration
    #[arg(long)]
    level: Option<PathBuf>,

    /// Games to play in headless mode
    #[arg(long, default_value = "10")]
    games: usize,

    /// Tick limit per game
    #[arg(long, default_value = "10000")]
    max_ticks: usize,

    /// Seed for food and obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks per second in realtime mode
    #[arg(long, default_value = "60")]
    tick_hz: f64,

    /// Log filter, e.g. "info" or "smooth_snake=debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Autopilot games at a fixed time step, as fast as possible
    Headless,
    /// One autopilot game against the wall clock
    Realtime,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_level.as_str())
        .init();

    let mut session = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(path) = &cli.level {
        let level = LevelDefinition::load(path)?;
        session = level.apply(session);
    }

    match cli.mode {
        Mode::Headless => {
            let config = HeadlessConfig {
                max_ticks: cli.max_ticks,
                seed: cli.seed,
                ..HeadlessConfig::new(cli.games, session)
            };
            let mut headless = HeadlessMode::new(config)?;
            let summary = headless.run().context("Headless run failed")?;
            println!("{}", summary);
        }
        Mode::Realtime => {
            let config = RealtimeConfig {
                tick_hz: cli.tick_hz,
                max_ticks: Some(cli.max_ticks),
                seed: cli.seed,
                ..RealtimeConfig::new(session)
            };
            let mut realtime = RealtimeMode::new(config)?;
            realtime.run().await?;
        }
    }

    Ok(())
}
