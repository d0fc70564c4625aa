//! High score storage
//!
//! The game loop only needs to read the best score and offer a new candidate
//! at game over, so storage sits behind the small [`ScoreStore`] trait. The
//! terminal front end uses [`FileScoreStore`]; tests use [`MemoryScoreStore`].

pub mod file;
pub mod memory;

pub use file::FileScoreStore;
pub use memory::MemoryScoreStore;

/// Persistent best-score capability
///
/// Implementations are treated as synchronous and always available; they
/// handle their own I/O failures.
pub trait ScoreStore: Send {
    /// Current best score, 0 if none recorded
    fn get(&self) -> u32;

    /// Record `candidate` if it beats the stored best
    ///
    /// Returns true iff it was a new record.
    fn save(&mut self, candidate: u32) -> bool;

    /// Forget the stored best
    fn clear(&mut self);
}
