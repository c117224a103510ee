//! Terminal Snake
//!
//! This library provides:
//! - Core game logic: movement, collisions, food, speed ramp, scores (game module)
//! - A cancellable, re-periodable tick timer (scheduler module)
//! - The controller that owns the game state and the timer (controller module)
//! - Key mapping and TUI rendering (input and render modules)
//! - The interactive terminal loop (modes module)

pub mod controller;
pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod render;
pub mod scheduler;
