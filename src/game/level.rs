//! Grid-map level files.
//!
//! A level describes its walls as rows of `0`/`1` cells, 30 px each, centred
//! in the arena. Everything else in the file overrides a base
//! [`SessionConfig`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::config::SessionConfig;
use super::geometry::Point;
use super::walls::WallSet;

/// Pixel size of one map cell
pub const CELL_SIZE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    /// Spawn cell as `[column, row]`
    pub initial_position: [usize; 2],
    /// Cells per second
    pub speed: f64,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            initial_position: [8, 10],
            speed: 4.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodSettings {
    /// Probability that a spawned item is one of the non-basic food types
    pub special_food_chance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub score_multiplier: f64,
    pub walls_kill: bool,
    pub self_collision: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            score_multiplier: 1.0,
            walls_kill: true,
            self_collision: true,
        }
    }
}

/// A level or difficulty file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Required whenever `map` is not empty
    #[serde(default)]
    pub grid_size: Option<GridSize>,
    #[serde(default)]
    pub map: Vec<Vec<u8>>,
    #[serde(default)]
    pub snake: SnakeSettings,
    #[serde(default)]
    pub food: FoodSettings,
    #[serde(default)]
    pub game_settings: GameSettings,
    #[serde(default)]
    pub target_score: Option<i64>,
}

impl LevelDefinition {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read level from {:?}", path))?;
        let level = Self::from_json(&json)
            .with_context(|| format!("Failed to load level {:?}", path))?;
        tracing::info!("Loaded level '{}' from {:?}", level.name, path);
        Ok(level)
    }

    /// Parse and validate a level from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let level: LevelDefinition =
            serde_json::from_str(json).context("Failed to parse level JSON")?;
        level
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid level '{}': {}", level.name, e))?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.grid_size {
            Some(size) => {
                if self.map.len() != size.height {
                    return Err(format!(
                        "map has {} rows but grid_size.height is {}",
                        self.map.len(),
                        size.height
                    ));
                }
                if let Some((row, cells)) = self
                    .map
                    .iter()
                    .enumerate()
                    .find(|(_, cells)| cells.len() != size.width)
                {
                    return Err(format!(
                        "map row {} has {} cells but grid_size.width is {}",
                        row,
                        cells.len(),
                        size.width
                    ));
                }
                let [col, row] = self.snake.initial_position;
                if col >= size.width || row >= size.height {
                    return Err(format!(
                        "snake.initial_position [{}, {}] lies outside the {}x{} grid",
                        col, row, size.width, size.height
                    ));
                }
            }
            None if !self.map.is_empty() => {
                return Err("grid_size is required when a map is given".to_string());
            }
            None => {}
        }

        if let Some((row, col)) = self.map.iter().enumerate().find_map(|(r, cells)| {
            cells.iter().position(|&c| c > 1).map(|c| (r, c))
        }) {
            return Err(format!("map cell [{}, {}] must be 0 or 1", col, row));
        }

        if !(self.snake.speed.is_finite() && self.snake.speed > 0.0) {
            return Err(format!(
                "snake.speed must be positive, got {}",
                self.snake.speed
            ));
        }

        if let Some(chance) = self.food.special_food_chance
            && !(chance > 0.0 && chance < 1.0)
        {
            return Err(format!(
                "food.special_food_chance must be in (0, 1), got {}",
                chance
            ));
        }

        if !(self.game_settings.score_multiplier.is_finite()
            && self.game_settings.score_multiplier >= 0.0)
        {
            return Err(format!(
                "game_settings.score_multiplier must be non-negative, got {}",
                self.game_settings.score_multiplier
            ));
        }

        if let Some(target) = self.target_score
            && target <= 0
        {
            return Err(format!("target_score must be positive, got {}", target));
        }

        Ok(())
    }

    /// Top-left pixel of the grid once centred in the arena of `base`
    fn grid_origin(&self, base: &SessionConfig) -> Point {
        match self.grid_size {
            Some(size) => Point::new(
                (base.arena_width - size.width as f64 * CELL_SIZE) / 2.0,
                (base.arena_height - size.height as f64 * CELL_SIZE) / 2.0,
            ),
            None => Point::new(0.0, 0.0),
        }
    }

    /// Override `base` with this level's walls, spawn, speed and rules
    pub fn apply(&self, base: SessionConfig) -> SessionConfig {
        let mut config = base;
        let origin = self.grid_origin(&config);

        let walls = WallSet::from_grid(&self.map, CELL_SIZE, config.arena(), config.wall_radius);
        config.wall_positions = walls.positions().to_vec();

        let [col, row] = self.snake.initial_position;
        config.spawn_position = origin.moved_by(
            (col as f64 + 0.5) * CELL_SIZE,
            (row as f64 + 0.5) * CELL_SIZE,
        );
        config.move_speed = self.snake.speed * CELL_SIZE;

        if let Some(chance) = self.food.special_food_chance
            && config.food_types.len() > 1
        {
            let specials = (config.food_types.len() - 1) as f64;
            for (i, food_type) in config.food_types.iter_mut().enumerate() {
                food_type.weight = if i == 0 { 1.0 - chance } else { chance / specials };
            }
        }

        config.rules.score_multiplier = self.game_settings.score_multiplier;
        config.rules.walls_kill = self.game_settings.walls_kill;
        config.rules.self_collision = self.game_settings.self_collision;
        config.rules.target_score = self.target_score;
        config
    }
}
