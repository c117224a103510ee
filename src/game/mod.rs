//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Timing lives in [`crate::scheduler`]; the engine only reports when the tick
//! period changed.

pub mod action;
pub mod config;
pub mod engine;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{ConfigError, FoodPlacement, GameConfig};
pub use engine::{Advance, GameEngine, GameOver, StepInfo, StepResult};
pub use state::{CollisionType, GameState, Position, Scoreboard, Snake, format_score};
