use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,

    // Speed
    /// Tick interval at round start, in milliseconds
    pub base_tick_ms: u64,
    /// Fastest allowed tick interval, in milliseconds
    pub min_tick_ms: u64,
    /// How much the tick interval shrinks per food eaten, in milliseconds
    pub speed_step_ms: u64,

    /// Candidate cells drawn before food gives up avoiding the snake
    pub food_placement_attempts: usize,
    /// Seed for food placement; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            base_tick_ms: 150,
            min_tick_ms: 90,
            speed_step_ms: 3,
            food_placement_attempts: 100,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file
    ///
    /// Fields missing from the file keep their default values.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            i32::try_from(self.grid_width).is_ok() && i32::try_from(self.grid_height).is_ok(),
            "grid dimensions must fit in i32"
        );
        ensure!(
            self.min_tick_ms > 0 && self.min_tick_ms <= self.base_tick_ms,
            "min_tick_ms ({}) must be in 1..=base_tick_ms ({})",
            self.min_tick_ms,
            self.base_tick_ms
        );
        ensure!(
            self.food_placement_attempts > 0,
            "food_placement_attempts must be positive"
        );
        Ok(())
    }
}
