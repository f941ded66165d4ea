//! Active piece - the single falling tetromino and its movement rules
//!
//! Movement and rotation are validated against a [`Board`] and either commit
//! fully or leave the piece untouched.

use crate::board::Board;
use crate::pieces::{self, MinoOffset, ShapeMask};
use crate::types::{Direction, PieceKind, Rotation, BOARD_HEIGHT};

/// Lifecycle of an active piece.
///
/// `Spawned` and `Falling` behave the same. When a gravity step fails the
/// session moves the piece to `Locking`; if it still cannot fall on the next
/// tick it locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PiecePhase {
    Spawned,
    Falling,
    Locking,
    Locked,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub phase: PiecePhase,
}

impl ActivePiece {
    /// Place a new piece in its spawn rotation at (`x`, `y`).
    ///
    /// Returns `None` when the spawn cells collide: the game-over condition.
    pub fn spawn(kind: PieceKind, board: &Board, x: i8, y: i8) -> Option<Self> {
        let piece = Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
            phase: PiecePhase::Spawned,
        };
        piece.is_valid(board).then_some(piece)
    }

    /// Current shape mask
    pub fn mask(&self) -> &'static ShapeMask {
        pieces::shape(self.kind, self.rotation)
    }

    /// Mino offsets for current rotation
    pub fn shape(&self) -> [MinoOffset; 4] {
        self.mask().minos()
    }

    /// Absolute board coordinates of the four minos
    pub fn minos(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Check if the piece fits where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_position(self.mask(), self.x, self.y)
    }

    /// Check if the piece is resting on the floor or the stack
    pub fn is_grounded(&self, board: &Board) -> bool {
        !board.is_valid_position(self.mask(), self.x, self.y + 1)
    }

    /// Rows the piece can fall before landing
    pub fn drop_distance(&self, board: &Board) -> i8 {
        let mask = self.mask();
        let mut distance: i8 = 0;
        // Bounded by the board height; a piece cannot fall further than that.
        while distance < BOARD_HEIGHT as i8 + 4
            && board.is_valid_position(mask, self.x, self.y + distance + 1)
        {
            distance += 1;
        }
        distance
    }

    /// Row the piece would land on (ghost piece origin)
    pub fn ghost_y(&self, board: &Board) -> i8 {
        self.y + self.drop_distance(board)
    }

    /// Try a single move (or a hard drop) in `direction`.
    ///
    /// Left/Right/Down commit only if the shifted mask is valid; a rejected
    /// move leaves the piece untouched. `Drop` always succeeds: the piece
    /// falls to its lowest valid row and is marked `Locked` for the caller
    /// to commit.
    pub fn try_move(&mut self, board: &Board, direction: Direction) -> bool {
        if direction == Direction::Drop {
            self.y += self.drop_distance(board);
            self.phase = PiecePhase::Locked;
            return true;
        }

        let (dx, dy) = direction.offset();
        if board.is_valid_position(self.mask(), self.x + dx, self.y + dy) {
            self.x += dx;
            self.y += dy;
            if dy != 0 || self.phase == PiecePhase::Spawned {
                self.phase = PiecePhase::Falling;
            }
            return true;
        }

        false
    }

    /// Rotate clockwise with wall kicks.
    ///
    /// On failure neither rotation nor origin changes.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let result = pieces::try_rotate(self.kind, self.rotation, self.x, self.y, |mask, x, y| {
            board.is_valid_position(mask, x, y)
        });

        match result {
            Some(rotated) => {
                self.rotation = rotated.rotation;
                self.x += rotated.kick.0;
                self.y += rotated.kick.1;
                true
            }
            None => false,
        }
    }

    /// Commit the piece's cells into the board and mark it `Locked`.
    ///
    /// Returns how many cells were above the visible field and dropped.
    pub fn lock(&mut self, board: &mut Board) -> usize {
        self.phase = PiecePhase::Locked;
        board.write_cells(self.mask(), self.x, self.y, self.kind)
    }
}
