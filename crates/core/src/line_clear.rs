//! Line clear engine - detection, scoring and the clear animation phases
//!
//! ```text
//! Idle -> Detected -> Highlight -> Dissolve -> Collapse -> Idle
//! ```
//!
//! Detection and scoring happen immediately on lock. The remaining phases are
//! frame-counted timing gates for the renderer; the board is compacted on the
//! last Collapse frame. Gameplay is frozen while the phase is not `Idle`.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::progression::{ClearScore, Progression};
use crate::types::{COLLAPSE_FRAMES, DISSOLVE_FRAMES, HIGHLIGHT_FRAMES, MAX_CLEAR_ROWS};

/// Rows completed by a lock, ascending
pub type PendingRows = ArrayVec<usize, MAX_CLEAR_ROWS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClearPhase {
    #[default]
    Idle,
    Detected,
    Highlight,
    Dissolve,
    Collapse,
}

/// Frame budget of each timed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    pub highlight: u32,
    pub dissolve: u32,
    pub collapse: u32,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            highlight: HIGHLIGHT_FRAMES,
            dissolve: DISSOLVE_FRAMES,
            collapse: COLLAPSE_FRAMES,
        }
    }
}

/// Result of scanning the board after a lock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Detection {
    pub rows: PendingRows,
    pub score: ClearScore,
}

/// Result of advancing the engine by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseStep {
    pub phase: ClearPhase,
    pub progress: f32,
    /// The board was compacted on this frame and the engine is idle again.
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineClearEngine {
    phase: ClearPhase,
    pending: PendingRows,
    frame: u32,
    durations: PhaseDurations,
}

impl LineClearEngine {
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            phase: ClearPhase::Idle,
            pending: PendingRows::new(),
            frame: 0,
            durations,
        }
    }

    pub fn phase(&self) -> ClearPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == ClearPhase::Idle
    }

    /// Rows awaiting removal (empty while idle).
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    /// Progress through the current timed phase in `[0, 1)`.
    pub fn progress(&self) -> f32 {
        let total = match self.phase {
            ClearPhase::Highlight => self.durations.highlight,
            ClearPhase::Dissolve => self.durations.dissolve,
            ClearPhase::Collapse => self.durations.collapse,
            ClearPhase::Idle | ClearPhase::Detected => return 0.0,
        };
        if total == 0 {
            return 0.0;
        }
        self.frame as f32 / total as f32
    }

    /// Scan for full rows after a lock and score them.
    ///
    /// With no full rows the engine stays idle. Must only be called while idle.
    pub fn detect(&mut self, board: &Board, progression: &mut Progression) -> Detection {
        debug_assert!(self.is_idle(), "detect called during a clear");
        if !self.is_idle() {
            return Detection::default();
        }

        let rows = board.full_rows();
        if rows.is_empty() {
            return Detection::default();
        }

        let score = progression.apply_clear(rows.len());
        self.pending = rows.clone();
        self.phase = ClearPhase::Detected;
        self.frame = 0;

        Detection { rows, score }
    }

    /// Advance one frame.
    pub fn advance(&mut self, board: &mut Board) -> PhaseStep {
        let mut completed = false;
        match self.phase {
            ClearPhase::Idle => {}
            ClearPhase::Detected => self.enter(ClearPhase::Highlight),
            ClearPhase::Highlight => {
                self.frame += 1;
                if self.frame >= self.durations.highlight {
                    self.enter(ClearPhase::Dissolve);
                }
            }
            ClearPhase::Dissolve => {
                self.frame += 1;
                if self.frame >= self.durations.dissolve {
                    self.enter(ClearPhase::Collapse);
                }
            }
            ClearPhase::Collapse => {
                self.frame += 1;
                if self.frame >= self.durations.collapse {
                    self.collapse(board);
                    completed = true;
                }
            }
        }

        PhaseStep {
            phase: self.phase,
            progress: self.progress(),
            completed,
        }
    }

    /// Abort any clear in flight (new game).
    pub fn reset(&mut self) {
        self.phase = ClearPhase::Idle;
        self.pending.clear();
        self.frame = 0;
    }

    fn enter(&mut self, phase: ClearPhase) {
        self.phase = phase;
        self.frame = 0;
    }

    fn collapse(&mut self, board: &mut Board) {
        // Ascending: a shift only moves rows above `row`, so the later
        // (lower) pending rows are still where detection found them.
        for &row in &self.pending {
            board.shift_rows_down(row, 1);
        }
        self.pending.clear();
        self.enter(ClearPhase::Idle);
    }
}

impl Default for LineClearEngine {
    fn default() -> Self {
        Self::new(PhaseDurations::default())
    }
}
