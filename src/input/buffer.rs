use std::sync::Mutex;

use crate::game::Direction;

/// Something the game loop can pull the player's latest turn from
pub trait InputSource: Send + Sync {
    /// Latest buffered direction, clearing the buffer
    fn take_buffered(&self) -> Option<Direction>;
}

/// Single-slot input buffer
///
/// Key presses between two ticks overwrite each other; the tick sees only the
/// last one. Reading empties the slot under the same lock.
#[derive(Debug, Default)]
pub struct InputBuffer {
    slot: Mutex<Option<Direction>>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a direction, replacing whatever was pending
    pub fn push(&self, direction: Direction) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(direction);
    }

    /// Drop any pending direction
    pub fn clear(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    pub fn peek(&self) -> Option<Direction> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl InputSource for InputBuffer {
    fn take_buffered(&self) -> Option<Direction> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}
