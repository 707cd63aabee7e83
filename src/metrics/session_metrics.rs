use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::game::{GameEvent, GameOverCause};

/// Running totals across the games played in one process
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub high_score: i64,
    pub total_score: i64,
    pub foods_eaten: u32,
    pub levels_completed: u32,
    pub deaths: HashMap<GameOverCause, u32>,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            high_score: 0,
            total_score: 0,
            foods_eaten: 0,
            levels_completed: 0,
            deaths: HashMap::new(),
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Fold one session event into the totals
    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started => {}
            GameEvent::FoodConsumed { .. } => self.foods_eaten += 1,
            GameEvent::GameOver { cause, score } => {
                *self.deaths.entry(*cause).or_insert(0) += 1;
                self.on_game_finished(*score);
            }
            GameEvent::LevelCompleted { score } => {
                self.levels_completed += 1;
                self.on_game_finished(*score);
            }
        }
    }

    /// Count a game that ended without a terminal event, e.g. a tick limit
    pub fn on_game_abandoned(&mut self, final_score: i64) {
        self.on_game_finished(final_score);
    }

    fn on_game_finished(&mut self, final_score: i64) {
        self.games_played += 1;
        self.total_score += final_score;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn deaths_by(&self, cause: GameOverCause) -> u32 {
        self.deaths.get(&cause).copied().unwrap_or(0)
    }

    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games_played as f64
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    pub fn format_summary(&self) -> String {
        format!(
            "games {} | high {} | avg {:.1} | food {} | levels {} | deaths self/wall/boundary {}/{}/{} | time {}",
            self.games_played,
            self.high_score,
            self.average_score(),
            self.foods_eaten,
            self.levels_completed,
            self.deaths_by(GameOverCause::SelfCollision),
            self.deaths_by(GameOverCause::Wall),
            self.deaths_by(GameOverCause::Boundary),
            self.format_time()
        )
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
