use super::ScoreStore;

/// Best score kept in memory only
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryScoreStore {
    best: u32,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self) -> u32 {
        self.best
    }

    fn save(&mut self, candidate: u32) -> bool {
        if candidate > self.best {
            self.best = candidate;
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.best = 0;
    }
}
