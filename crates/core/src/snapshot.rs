use arrayvec::ArrayVec;

use crate::active::{ActivePiece, PiecePhase};
use crate::line_clear::ClearPhase;
use crate::progression::ScoreState;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, MAX_CLEAR_ROWS};

/// Encoded board rows: 0 = empty, `kind.index() + 1` = filled.
pub type GridSnapshot = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub phase: PiecePhase,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            phase: value.phase,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub board: GridSnapshot,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next: PieceKind,
    pub can_hold: bool,
    pub paused: bool,
    pub game_over: bool,
    pub phase: ClearPhase,
    pub phase_progress: f32,
    pub pending_rows: ArrayVec<usize, MAX_CLEAR_ROWS>,
    pub score: ScoreState,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && self.phase == ClearPhase::Idle
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next: PieceKind::I,
            can_hold: true,
            paused: false,
            game_over: false,
            phase: ClearPhase::Idle,
            phase_progress: 0.0,
            pending_rows: ArrayVec::new(),
            score: ScoreState::default(),
            drop_interval_ms: 0,
        }
    }
}
