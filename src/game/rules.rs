use super::state::Position;

/// Wall bounds and the score counter for one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    grid_width: i32,
    grid_height: i32,
    score: u32,
}

impl GameRules {
    pub fn new(grid_width: usize, grid_height: usize) -> Self {
        Self {
            grid_width: grid_width as i32,
            grid_height: grid_height as i32,
            score: 0,
        }
    }

    /// True if the position lies outside `[0, width) x [0, height)`
    pub fn check_wall_collision(&self, pos: Position) -> bool {
        pos.x < 0 || pos.x >= self.grid_width || pos.y < 0 || pos.y >= self.grid_height
    }

    /// One point per food, regardless of speed or streak
    pub fn increment_score(&mut self) {
        self.score += 1;
    }

    /// Zero the score; grid dimensions are kept
    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width as usize
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height as usize
    }
}
