use std::time::{Duration, Instant};

use crate::game::GameOverEvent;

/// Per-session counters shown next to the board
pub struct SessionMetrics {
    pub round_started: Instant,
    pub elapsed_time: Duration,
    pub rounds_played: u32,
    pub food_eaten: u32,
    /// Best score since the program started, independent of the score store
    pub session_best: u32,
    last_score: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            round_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_played: 0,
            food_eaten: 0,
            session_best: 0,
            last_score: 0,
        }
    }

    /// Refresh the round clock; frozen once the round is over
    pub fn update(&mut self, round_running: bool) {
        if round_running {
            self.elapsed_time = self.round_started.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.round_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.last_score = 0;
    }

    /// Count food from the live score carried by each snapshot
    pub fn on_score(&mut self, score: u32) {
        if score > self.last_score {
            self.food_eaten += score - self.last_score;
        }
        self.last_score = score;
    }

    pub fn on_game_over(&mut self, event: &GameOverEvent) {
        self.on_score(event.score);
        self.rounds_played += 1;
        if event.score > self.session_best {
            self.session_best = event.score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
