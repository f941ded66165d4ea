//! Pieces module - Tetromino shape masks and the rotation/kick policy
//!
//! Every piece kind has four rotation states, each stored as a fixed 4x4
//! mask of filled/empty flags. Rotation is clockwise only. When the rotated
//! mask collides in place, a small fixed list of kick offsets is tried in
//! order (see [`KICK_OFFSETS`]); this is not the SRS kick table.

use crate::types::{PieceKind, Rotation, KICK_OFFSETS, MASK_SIZE};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// A 4x4 grid of filled/empty flags, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMask {
    rows: [[u8; MASK_SIZE]; MASK_SIZE],
}

impl ShapeMask {
    const fn new(rows: [[u8; MASK_SIZE]; MASK_SIZE]) -> Self {
        Self { rows }
    }

    /// Iterate filled cells as `(col, row)` offsets, row-major.
    pub fn cells(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, flag)| **flag != 0)
                .map(move |(col, _)| (col as i8, row as i8))
        })
    }

    /// The four mino offsets of this mask.
    pub fn minos(&self) -> [MinoOffset; 4] {
        let mut out = [(0, 0); 4];
        let mut n = 0usize;
        for cell in self.cells() {
            debug_assert!(n < 4, "shape mask has more than four cells");
            if n < 4 {
                out[n] = cell;
            }
            n += 1;
        }
        debug_assert_eq!(n, 4, "shape mask must have exactly four cells");
        out
    }

    /// Number of filled cells.
    pub fn count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&flag| flag != 0).count()
    }
}

/// Shape table indexed by `[kind.index()][rotation.index()]`.
static SHAPES: [[ShapeMask; 4]; PieceKind::COUNT] = [
    // I
    [
        ShapeMask::new([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
        ShapeMask::new([[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
    ],
    // J
    [
        ShapeMask::new([[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
    ],
    // L
    [
        ShapeMask::new([[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    ],
    // O (same for all rotations)
    [
        ShapeMask::new([[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    ],
    // S
    [
        ShapeMask::new([[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    ],
    // Z
    [
        ShapeMask::new([[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]]),
    ],
    // T
    [
        ShapeMask::new([[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
        ShapeMask::new([[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    ],
];

/// Get the mask for a piece kind and rotation
pub fn shape(kind: PieceKind, rotation: Rotation) -> &'static ShapeMask {
    &SHAPES[kind.index()][rotation.index()]
}

/// Get the mino offsets for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> [MinoOffset; 4] {
    shape(kind, rotation).minos()
}

/// Get initial mask for a new piece at spawn position
pub fn spawn_shape(kind: PieceKind) -> &'static ShapeMask {
    shape(kind, Rotation::North)
}

/// Result of a successful rotation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationResult {
    pub rotation: Rotation,
    /// Origin shift that made the rotation fit; `(0, 0)` when no kick was needed.
    pub kick: (i8, i8),
}

/// Try to rotate a piece clockwise, falling back to wall kicks.
///
/// `is_valid(mask, x, y)` decides whether the mask fits at an origin.
/// The in-place position is tried first, then each of [`KICK_OFFSETS`] in
/// order. Returns `None` if nothing fits.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    is_valid: impl Fn(&ShapeMask, i8, i8) -> bool,
) -> Option<RotationResult> {
    let new_rotation = rotation.rotate_cw();
    let new_shape = shape(kind, new_rotation);

    let candidates = std::iter::once((0, 0)).chain(KICK_OFFSETS.iter().copied());
    for (dx, dy) in candidates {
        if is_valid(new_shape, x + dx, y + dy) {
            return Some(RotationResult {
                rotation: new_rotation,
                kick: (dx, dy),
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mask_has_four_cells() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let mask = shape(kind, Rotation::from_index(r));
                assert_eq!(mask.count(), 4, "{:?} rotation {}", kind, r);
            }
        }
    }

    #[test]
    fn minos_follow_row_major_order() {
        assert_eq!(
            get_shape(PieceKind::T, Rotation::North),
            [(1, 0), (0, 1), (1, 1), (2, 1)]
        );
        assert_eq!(
            get_shape(PieceKind::I, Rotation::East),
            [(2, 0), (2, 1), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn rotate_prefers_in_place() {
        let result = try_rotate(PieceKind::T, Rotation::North, 3, 5, |_, _, _| true).unwrap();
        assert_eq!(result.rotation, Rotation::East);
        assert_eq!(result.kick, (0, 0));
    }

    #[test]
    fn rotate_walks_kicks_in_order() {
        // Only the (+2, 0) kick is accepted.
        let result =
            try_rotate(PieceKind::J, Rotation::East, 0, 5, |_, x, y| x == 2 && y == 5).unwrap();
        assert_eq!(result.kick, (2, 0));
        assert_eq!(result.rotation, Rotation::South);
    }

    #[test]
    fn rotate_fails_when_nothing_fits() {
        assert!(try_rotate(PieceKind::L, Rotation::North, 3, 5, |_, _, _| false).is_none());
    }
}
