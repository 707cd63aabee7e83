use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::geometry::{Point, Rect};

/// One kind of food: how much it is worth, how big it is and how often it spawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodType {
    pub name: String,
    pub score_value: i32,
    pub radius: f64,
    /// Relative spawn weight
    pub weight: f64,
}

impl FoodType {
    pub fn new(name: &str, score_value: i32, radius: f64, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            score_value,
            radius,
            weight,
        }
    }
}

/// Tunables for the rejection-sampling placement of food and obstacles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Distance kept clear along every arena edge
    pub margin: f64,
    /// Extra clearance added on top of the two radii
    pub buffer: f64,
    pub max_attempts: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            margin: 50.0,
            buffer: 5.0,
            max_attempts: 100,
        }
    }
}

/// Which collisions end the game and how the score is computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub walls_kill: bool,
    pub self_collision: bool,
    pub score_multiplier: f64,
    /// Reaching this score completes the level
    pub target_score: Option<i64>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            walls_kill: true,
            self_collision: true,
            score_multiplier: 1.0,
            target_score: None,
        }
    }
}

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Head speed in pixels per second
    pub move_speed: f64,
    /// Base turn rate in degrees per second
    pub turn_speed: f64,
    /// Heading gaps at or below this many degrees resolve instantly
    pub snap_threshold_deg: f64,
    pub boost_multiplier: f64,

    /// Arc length between consecutive body segments
    pub segment_distance: f64,
    pub initial_segment_count: usize,
    /// Head collision radius
    pub collision_radius: f64,
    /// Body segment radius used for self-collision
    pub segment_radius: f64,
    /// Segments nearest the head ignored by the self-collision check
    pub self_collision_skip: usize,
    /// Snakes with fewer segments than this cannot collide with themselves
    pub min_self_collision_segments: usize,
    /// Minimum head travel before a new path sample is recorded
    pub min_sample_distance: f64,

    pub arena_width: f64,
    pub arena_height: f64,
    pub spawn_position: Point,
    pub initial_heading_deg: f64,

    pub wall_positions: Vec<Point>,
    pub wall_radius: f64,
    /// Extra obstacles scattered at random on every (re)start
    pub random_obstacle_count: usize,

    pub food_types: Vec<FoodType>,
    pub max_food_count: usize,
    pub placement: PlacementConfig,

    pub rules: RuleSet,

    /// Upper bound for a single tick's delta time, in seconds
    pub max_frame_dt: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            move_speed: 120.0,
            turn_speed: 360.0,
            snap_threshold_deg: 15.0,
            boost_multiplier: 2.0,
            segment_distance: 15.0,
            initial_segment_count: 3,
            collision_radius: 12.0,
            segment_radius: 4.0,
            self_collision_skip: 3,
            min_self_collision_segments: 4,
            min_sample_distance: 0.5,
            arena_width: 800.0,
            arena_height: 600.0,
            spawn_position: Point::new(400.0, 300.0),
            initial_heading_deg: 0.0,
            wall_positions: Vec::new(),
            wall_radius: 12.0,
            random_obstacle_count: 0,
            food_types: vec![
                FoodType::new("apple", 10, 12.5, 0.7),
                FoodType::new("watermelon", 20, 15.0, 0.3),
            ],
            max_food_count: 1,
            placement: PlacementConfig::default(),
            rules: RuleSet::default(),
            max_frame_dt: 0.1,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with a custom arena size, spawning in its centre
    pub fn with_arena(width: f64, height: f64) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            spawn_position: Point::new(width / 2.0, height / 2.0),
            ..Default::default()
        }
    }

    /// Default arena enclosed by a ring of wall blocks
    pub fn bordered() -> Self {
        let mut config = Self::default();
        let mut walls = super::walls::WallSet::new(config.wall_radius);
        walls.add_border(30.0, config.arena());
        config.wall_positions = walls.positions().to_vec();
        config
    }

    /// Default arena with a centre cross and four corner boxes.
    /// The cross covers the centre, so the snake spawns above it.
    pub fn maze() -> Self {
        let mut config = Self {
            spawn_position: Point::new(400.0, 120.0),
            ..Default::default()
        };
        let mut walls = super::walls::WallSet::new(config.wall_radius);
        walls.add_maze(config.arena());
        config.wall_positions = walls.positions().to_vec();
        config
    }

    pub fn arena(&self) -> Rect {
        Rect::arena(self.arena_width, self.arena_height)
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session config from {:?}", path))?;
        let config: SessionConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse session config {:?}", path))?;
        tracing::info!("Loaded session config from {:?}", path);
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize session config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write session config to {:?}", path))?;
        Ok(())
    }

    /// Validate configuration parameters
    ///
    /// Returns the first violated rule as a message. A session refuses to
    /// start with an invalid configuration.
    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            ("move_speed", self.move_speed),
            ("turn_speed", self.turn_speed),
            ("snap_threshold_deg", self.snap_threshold_deg),
            ("boost_multiplier", self.boost_multiplier),
            ("segment_distance", self.segment_distance),
            ("collision_radius", self.collision_radius),
            ("segment_radius", self.segment_radius),
            ("min_sample_distance", self.min_sample_distance),
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("initial_heading_deg", self.initial_heading_deg),
            ("wall_radius", self.wall_radius),
            ("max_frame_dt", self.max_frame_dt),
            ("placement.margin", self.placement.margin),
            ("placement.buffer", self.placement.buffer),
            ("rules.score_multiplier", self.rules.score_multiplier),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got {}", name, value));
            }
        }

        if self.move_speed <= 0.0 {
            return Err(format!(
                "move_speed must be positive, got {}",
                self.move_speed
            ));
        }

        if self.turn_speed <= 0.0 {
            return Err(format!(
                "turn_speed must be positive, got {}",
                self.turn_speed
            ));
        }

        if !(0.0..180.0).contains(&self.snap_threshold_deg) {
            return Err(format!(
                "snap_threshold_deg must be in [0, 180), got {}",
                self.snap_threshold_deg
            ));
        }

        if self.boost_multiplier < 1.0 {
            return Err(format!(
                "boost_multiplier must be at least 1, got {}",
                self.boost_multiplier
            ));
        }

        if self.segment_distance <= 0.0 {
            return Err(format!(
                "segment_distance must be positive, got {}",
                self.segment_distance
            ));
        }

        if self.collision_radius <= 0.0 {
            return Err(format!(
                "collision_radius must be positive, got {}",
                self.collision_radius
            ));
        }

        if self.segment_radius <= 0.0 {
            return Err(format!(
                "segment_radius must be positive, got {}",
                self.segment_radius
            ));
        }

        if self.min_sample_distance < 0.0 || self.min_sample_distance >= self.segment_distance {
            return Err(format!(
                "min_sample_distance must be in [0, segment_distance), got {}",
                self.min_sample_distance
            ));
        }

        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return Err(format!(
                "arena must have a positive size, got {}x{}",
                self.arena_width, self.arena_height
            ));
        }

        if !self.spawn_position.is_finite() || !self.arena().contains(self.spawn_position) {
            return Err(format!(
                "spawn_position {:?} lies outside the arena",
                self.spawn_position
            ));
        }

        if self.wall_radius <= 0.0 {
            return Err(format!(
                "wall_radius must be positive, got {}",
                self.wall_radius
            ));
        }

        if let Some(wall) = self.wall_positions.iter().find(|w| !w.is_finite()) {
            return Err(format!("wall position {:?} is not finite", wall));
        }

        if self.food_types.is_empty() {
            return Err("at least one food type is required".to_string());
        }

        for food in &self.food_types {
            if !(food.radius.is_finite() && food.radius > 0.0) {
                return Err(format!(
                    "food type '{}' must have a positive radius, got {}",
                    food.name, food.radius
                ));
            }
            if !(food.weight.is_finite() && food.weight > 0.0) {
                return Err(format!(
                    "food type '{}' must have a positive weight, got {}",
                    food.name, food.weight
                ));
            }
        }

        if self.max_food_count == 0 {
            return Err("max_food_count must be at least 1".to_string());
        }

        if self.placement.max_attempts == 0 {
            return Err("placement.max_attempts must be at least 1".to_string());
        }

        if self.placement.margin < 0.0 || self.placement.buffer < 0.0 {
            return Err(format!(
                "placement margin and buffer must be non-negative, got {} and {}",
                self.placement.margin, self.placement.buffer
            ));
        }

        if self.rules.score_multiplier < 0.0 {
            return Err(format!(
                "rules.score_multiplier must be non-negative, got {}",
                self.rules.score_multiplier
            ));
        }

        if let Some(target) = self.rules.target_score
            && target <= 0
        {
            return Err(format!(
                "rules.target_score must be positive, got {}",
                target
            ));
        }

        if self.max_frame_dt <= 0.0 {
            return Err(format!(
                "max_frame_dt must be positive, got {}",
                self.max_frame_dt
            ));
        }

        Ok(())
    }
}
