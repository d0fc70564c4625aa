use std::time::Duration;

use super::config::GameConfig;

/// Milliseconds per tick, shrinking linearly with food eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSpeed {
    base_ms: u64,
    min_ms: u64,
    step_ms: u64,
    current_ms: u64,
}

impl TickSpeed {
    pub fn new(base_ms: u64, min_ms: u64, step_ms: u64) -> Self {
        Self {
            base_ms,
            min_ms,
            step_ms,
            current_ms: base_ms,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.base_tick_ms, config.min_tick_ms, config.speed_step_ms)
    }

    /// Shorten the interval by one step, never below the floor
    pub fn speed_up(&mut self) {
        self.current_ms = self.current_ms.saturating_sub(self.step_ms).max(self.min_ms);
    }

    pub fn reset(&mut self) {
        self.current_ms = self.base_ms;
    }

    pub fn current_ms(&self) -> u64 {
        self.current_ms
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.current_ms)
    }
}
