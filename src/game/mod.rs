//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it, and tests drive it tick by tick.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod rules;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{CollisionType, GameLoop, GameOverEvent, LoopState, Snapshot, TickOutcome};
pub use food::Food;
pub use rules::GameRules;
pub use speed::TickSpeed;
pub use state::{Position, Snake};
