//! LA Snake - a grid snake game
//!
//! This library provides:
//! - Core game logic: snake, food, rules and the tick-driven game loop (game module)
//! - High score storage behind a small trait (score module)
//! - Buffered keyboard input (input module)
//! - TUI rendering and the interactive terminal mode (render, modes modules)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod score;
