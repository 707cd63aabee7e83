//! Core game logic for the continuous-motion snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers feed it a [`TickInput`] and an elapsed time per frame and read back a
//! [`Snapshot`] plus the tick's events.

pub mod action;
pub mod clock;
pub mod collision;
pub mod config;
pub mod engine;
pub mod food;
pub mod geometry;
pub mod kinematics;
pub mod level;
pub mod path;
pub mod placement;
pub mod segments;
pub mod snake;
pub mod state;
pub mod walls;

// Re-export commonly used types
pub use action::{Direction, TickInput};
pub use clock::{FrameClock, Pausable};
pub use config::{FoodType, PlacementConfig, RuleSet, SessionConfig};
pub use engine::GameSession;
pub use food::{Food, FoodManager};
pub use geometry::{Point, Rect};
pub use kinematics::KinematicBody;
pub use level::LevelDefinition;
pub use path::PathTracker;
pub use placement::{Occupant, Placement, PlacementStrategy, place};
pub use segments::SegmentChain;
pub use snake::Snake;
pub use state::{GameEvent, GameOverCause, SessionState, Snapshot, TickResult};
pub use walls::WallSet;
