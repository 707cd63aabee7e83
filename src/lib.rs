//! Smooth Snake - a continuous-motion snake engine
//!
//! This library provides:
//! - Core game logic: steering, path-following body, collisions, placement (game module)
//! - Aggregate statistics across games (metrics module)
//! - Headless and real-time drivers (modes module)

pub mod game;
pub mod metrics;
pub mod modes;
