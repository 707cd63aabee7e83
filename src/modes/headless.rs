//! Headless mode
//!
//! Plays a batch of games as fast as possible with the [`Autopilot`] at a
//! fixed time step and folds every event into [`SessionMetrics`]. Useful for
//! soak-testing configurations and level files.

use anyhow::{Context, Result};

use super::autopilot::Autopilot;
use crate::game::{GameSession, SessionConfig, SessionState};
use crate::metrics::SessionMetrics;

/// Configuration for headless mode
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Number of games to play
    pub games: usize,

    /// Ticks after which a game still running is abandoned
    pub max_ticks: usize,

    /// Simulated seconds per tick
    pub dt: f64,

    /// Seed for food and obstacle placement; entropy when `None`
    pub seed: Option<u64>,

    /// Log a progress line every N games
    pub log_frequency: usize,

    pub session: SessionConfig,
}

impl HeadlessConfig {
    pub fn new(games: usize, session: SessionConfig) -> Self {
        Self {
            games,
            max_ticks: 10_000,
            dt: 1.0 / 60.0,
            seed: None,
            log_frequency: 10,
            session,
        }
    }
}

/// How a single headless game ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOutcome {
    pub score: i64,
    pub ticks: usize,
    pub state: SessionState,
}

pub struct HeadlessMode {
    session: GameSession,
    autopilot: Autopilot,
    metrics: SessionMetrics,
    config: HeadlessConfig,
}

impl HeadlessMode {
    pub fn new(config: HeadlessConfig) -> Result<Self> {
        let session = match config.seed {
            Some(seed) => GameSession::with_seed(config.session.clone(), seed),
            None => GameSession::new(config.session.clone()),
        }
        .context("Failed to create headless session")?;

        Ok(Self {
            session,
            autopilot: Autopilot::default(),
            metrics: SessionMetrics::new(),
            config,
        })
    }

    /// Play every configured game and return the final metrics summary
    pub fn run(&mut self) -> Result<String> {
        tracing::info!(
            "Headless run: {} games, max {} ticks, dt {:.4}s",
            self.config.games,
            self.config.max_ticks,
            self.config.dt
        );

        for game in 0..self.config.games {
            let outcome = self.run_game();
            tracing::debug!(
                "Game {} ended {:?} with score {} after {} ticks",
                game + 1,
                outcome.state,
                outcome.score,
                outcome.ticks
            );

            if (game + 1) % self.config.log_frequency.max(1) == 0 {
                self.metrics.update();
                tracing::info!(
                    "[Game {}/{}] {}",
                    game + 1,
                    self.config.games,
                    self.metrics.format_summary()
                );
            }
        }

        self.metrics.update();
        Ok(self.metrics.format_summary())
    }

    /// Play one game from a fresh start
    fn run_game(&mut self) -> GameOutcome {
        self.session.restart();
        let mut ticks = 0;

        while ticks < self.config.max_ticks {
            let input = self.autopilot.steer(&self.session);
            let result = self.session.tick(&input, self.config.dt);
            ticks += 1;

            for event in &result.events {
                self.metrics.record(event);
            }
            if result.state.is_terminal() {
                break;
            }
        }

        if !self.session.state().is_terminal() {
            self.metrics.on_game_abandoned(self.session.score());
        }

        GameOutcome {
            score: self.session.score(),
            ticks,
            state: self.session.state(),
        }
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }
}
