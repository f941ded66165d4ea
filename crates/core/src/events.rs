//! Gameplay events for audio cues, analytics and persistence.
//!
//! The session queues events as they happen; callers drain them once per
//! frame, either directly or through an [`EventSink`].

use crate::progression::ScoreState;
use crate::types::PieceKind;

/// Queue capacity. One lock produces at most four events.
pub const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// A piece was committed to the board.
    PieceLocked { kind: PieceKind },
    /// Rows were detected and scored; `level` is the level they scored at.
    LinesCleared { rows: u32, points: u32, level: u32 },
    LevelUp { level: u32 },
    /// A spawn collided; `final_state` is the score to persist.
    GameOver { final_state: ScoreState },
}

/// Receiver for drained events.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}
