//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no required dependencies, so they can be used
//! by the gameplay core, input mapping and any renderer alike. Enable the
//! `serde` feature to derive `Serialize`/`Deserialize`.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn position**: (3, 0), centering a 4x4 shape mask
//!
//! # Timing Constants
//!
//! Two timing domains drive the game:
//!
//! | Constant | Value | Domain | Description |
//! |----------|-------|--------|-------------|
//! | `TICK_MS` | 16 | wall clock | Nominal frame interval for drivers (~60 FPS) |
//! | `DROP_INTERVALS` | 1000..65 | wall clock | Gravity per level (ms per row) |
//! | `HIGHLIGHT_FRAMES` | 12 | frames | Line-clear highlight phase |
//! | `DISSOLVE_FRAMES` | 12 | frames | Line-clear dissolve phase |
//! | `COLLAPSE_FRAMES` | 6 | frames | Line-clear collapse phase |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(PieceKind::from_index(piece.index()), Some(piece));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of the square shape mask every piece rotation is stored in.
pub const MASK_SIZE: usize = 4;

/// Default spawn column (centers a 4-wide mask on a 10-wide board).
pub const SPAWN_X: i8 = (BOARD_WIDTH as i8 - MASK_SIZE as i8) / 2;

/// Default spawn row (top of the visible field).
pub const SPAWN_Y: i8 = 0;

/// Nominal frame interval for tick drivers in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Lowest level a match can start at.
pub const MIN_LEVEL: u32 = 1;

/// Highest reachable level. Level-ups past this are ignored.
pub const MAX_LEVEL: u32 = 20;

/// Gravity by level (milliseconds per row).
///
/// Index 0 = level 1. Levels above `MAX_LEVEL` use the last entry.
pub const DROP_INTERVALS: [u32; MAX_LEVEL as usize] = [
    1000, 800, 650, 500, 400, 320, 250, 200, 160, 140, 120, 110, 100, 95, 90, 85, 80, 75, 70, 65,
];

/// Frames spent highlighting completed rows.
pub const HIGHLIGHT_FRAMES: u32 = 12;

/// Frames spent dissolving completed rows.
pub const DISSOLVE_FRAMES: u32 = 12;

/// Frames spent collapsing the stack; compaction happens on the last one.
pub const COLLAPSE_FRAMES: u32 = 6;

/// Line clear scoring table.
///
/// Base points for clearing N rows at once, multiplied by the current level:
/// - 1 row: 100
/// - 2 rows: 300
/// - 3 rows: 500
/// - 4 rows: 800 (Tetris)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Most rows a single lock can complete (height of the tallest piece).
pub const MAX_CLEAR_ROWS: usize = 4;

/// Wall kick offsets tried in order when a rotation collides in place.
pub const KICK_OFFSETS: [(i8, i8); 5] = [(1, 0), (-1, 0), (0, -1), (2, 0), (-2, 0)];


/// The seven tetromino piece kinds
///
/// The declaration order is the stable color index used by renderers and
/// snapshots: I=0, J=1, L=2, O=3, S=4, Z=5, T=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 7;

    /// All kinds in index order.
    pub const ALL: [PieceKind; Self::COUNT] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Stable index in `[0, 7)`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`PieceKind::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }
}

/// Rotation states, cycling clockwise North → East → South → West → North.
///
/// `North` is the spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation state as `0..4`.
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`], wrapping modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Direction of a single movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// One column left
    Left,
    /// One column right
    Right,
    /// One row down
    Down,
    /// Straight to the lowest valid row, then lock
    Drop,
}

impl Direction {
    /// Origin offset of one step in this direction.
    ///
    /// `Drop` repeats the `Down` step until it fails.
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down | Direction::Drop => (0, 1),
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Input dispatchers translate raw input into these; the session maps each
/// one onto a move, rotate, hold or lifecycle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise (with wall kicks)
    Rotate,
    /// Swap the active piece with the hold slot (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
    /// Start a new game
    Restart,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;
