use anyhow::{Context, Result};
use std::time::Duration;
use tokio::time::interval;

use super::autopilot::Autopilot;
use crate::game::{FrameClock, GameSession, Pausable, SessionConfig};
use crate::metrics::SessionMetrics;

#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    /// Simulation ticks per second
    pub tick_hz: f64,
    /// Stop after this many ticks even if the game is still running
    pub max_ticks: Option<usize>,
    /// Steer with the autopilot; otherwise keep the spawn heading
    pub autopilot: bool,
    pub seed: Option<u64>,
    pub session: SessionConfig,
}

impl RealtimeConfig {
    pub fn new(session: SessionConfig) -> Self {
        Self {
            tick_hz: 60.0,
            max_ticks: None,
            autopilot: true,
            seed: None,
            session,
        }
    }
}

/// Drives one session against the wall clock until it ends or Ctrl+C
pub struct RealtimeMode {
    session: GameSession,
    clock: FrameClock,
    metrics: SessionMetrics,
    autopilot: Option<Autopilot>,
    config: RealtimeConfig,
    ticks: usize,
    should_quit: bool,
}

impl RealtimeMode {
    pub fn new(config: RealtimeConfig) -> Result<Self> {
        if !(config.tick_hz.is_finite() && config.tick_hz > 0.0) {
            anyhow::bail!("tick_hz must be positive, got {}", config.tick_hz);
        }

        let session = match config.seed {
            Some(seed) => GameSession::with_seed(config.session.clone(), seed),
            None => GameSession::new(config.session.clone()),
        }
        .context("Failed to create realtime session")?;

        Ok(Self {
            clock: FrameClock::new(config.session.max_frame_dt),
            session,
            metrics: SessionMetrics::new(),
            autopilot: config.autopilot.then(Autopilot::default),
            config,
            ticks: 0,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tick_timer = interval(Duration::from_secs_f64(1.0 / self.config.tick_hz));
        let mut report_timer = interval(Duration::from_secs(1));
        self.metrics.on_game_start();

        loop {
            tokio::select! {
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = report_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.session.snapshot();
                    tracing::info!(
                        "[{}] {:?} score {} head ({:.0}, {:.0}) length {}",
                        self.metrics.format_time(),
                        snapshot.state,
                        snapshot.score,
                        snapshot.head.x,
                        snapshot.head.y,
                        snapshot.segments.len() + 1
                    );
                }

                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.metrics.update();
        tracing::info!("Realtime run finished: {}", self.metrics.format_summary());
        Ok(())
    }

    fn update_game(&mut self) {
        let dt = self.clock.tick();
        let input = match &self.autopilot {
            Some(autopilot) => autopilot.steer(&self.session),
            None => Autopilot::cruise(&self.session),
        };

        let result = self.session.tick(&input, dt);
        self.ticks += 1;
        for event in &result.events {
            self.metrics.record(event);
        }

        if result.state.is_terminal() {
            self.should_quit = true;
        }
        if let Some(max_ticks) = self.config.max_ticks
            && self.ticks >= max_ticks
        {
            if !result.state.is_terminal() {
                self.metrics.on_game_abandoned(self.session.score());
            }
            self.should_quit = true;
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }
}

/// Pausing freezes the session and stops the clock together
impl Pausable for RealtimeMode {
    fn pause(&mut self) {
        self.session.pause();
        self.clock.pause();
    }

    fn resume(&mut self) {
        self.session.resume();
        self.clock.resume();
    }

    fn is_paused(&self) -> bool {
        self.session.is_paused()
    }
}
