//! RNG module - next-piece suppliers
//!
//! The session draws pieces through the [`PieceSupplier`] trait. Three
//! deterministic implementations are provided:
//!
//! - [`BagSupplier`]: the "7-bag", one of each kind per shuffled bag
//! - [`HistorySupplier`]: weighted random that rerolls recent repeats
//! - [`SequenceSupplier`]: cycles a fixed list (scripted play and tests)
//!
//! Randomness comes from a simple LCG so identical seeds replay identically.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Source of upcoming pieces.
pub trait PieceSupplier {
    /// Take the next piece.
    fn next_piece(&mut self) -> PieceKind;

    /// The piece the next `next_piece` call will return.
    fn peek(&self) -> PieceKind;

    /// Rewind to the initial state (new game).
    fn reset(&mut self);
}

impl<S: PieceSupplier + ?Sized> PieceSupplier for Box<S> {
    fn next_piece(&mut self) -> PieceKind {
        (**self).next_piece()
    }

    fn peek(&self) -> PieceKind {
        (**self).peek()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagSupplier {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
    seed: u32,
}

impl BagSupplier {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
            seed,
        };
        queue.refill_bag();
        queue
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }
}

impl PieceSupplier for BagSupplier {
    fn next_piece(&mut self) -> PieceKind {
        // Ensure bag has pieces
        if self.bag_index >= 7 {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    fn peek(&self) -> PieceKind {
        if self.bag_index < 7 {
            return self.bag[self.bag_index];
        }

        // Preview the next bag with a copy of the RNG so the real draw matches.
        let mut preview_rng = self.rng.clone();
        let mut next_bag = PieceKind::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    fn reset(&mut self) {
        *self = Self::new(self.seed);
    }
}

/// Depth of the anti-repeat history.
pub const HISTORY_DEPTH: usize = 4;

/// Rerolls allowed before accepting a piece that is already in the history.
pub const HISTORY_REROLLS: u32 = 4;

/// Weighted random generator with recent-history anti-repeat.
///
/// Each draw rolls a kind by weight; if the kind is among the last
/// [`HISTORY_DEPTH`] pieces it rerolls, up to [`HISTORY_REROLLS`] times.
/// The next piece is rolled ahead of time so `peek` is exact.
#[derive(Debug, Clone)]
pub struct HistorySupplier {
    weights: [u32; PieceKind::COUNT],
    history: [Option<PieceKind>; HISTORY_DEPTH],
    upcoming: PieceKind,
    rng: SimpleRng,
    seed: u32,
}

impl HistorySupplier {
    /// Uniform weights.
    pub fn new(seed: u32) -> Self {
        Self::with_weights(seed, [1; PieceKind::COUNT])
    }

    /// Custom weights indexed by [`PieceKind::index`]. All-zero weights fall back to uniform.
    pub fn with_weights(seed: u32, weights: [u32; PieceKind::COUNT]) -> Self {
        let weights = if weights.iter().all(|&w| w == 0) {
            [1; PieceKind::COUNT]
        } else {
            weights
        };
        let mut supplier = Self {
            weights,
            history: [None; HISTORY_DEPTH],
            upcoming: PieceKind::I,
            rng: SimpleRng::new(seed),
            seed,
        };
        supplier.upcoming = supplier.roll();
        supplier
    }

    fn roll_once(&mut self) -> PieceKind {
        let total: u32 = self.weights.iter().sum();
        let mut pick = self.rng.next_range(total);
        for (idx, &weight) in self.weights.iter().enumerate() {
            if pick < weight {
                return PieceKind::ALL[idx];
            }
            pick -= weight;
        }
        PieceKind::ALL[PieceKind::COUNT - 1]
    }

    fn roll(&mut self) -> PieceKind {
        let mut kind = self.roll_once();
        for _ in 0..HISTORY_REROLLS {
            if !self.history.contains(&Some(kind)) {
                break;
            }
            kind = self.roll_once();
        }
        kind
    }

    fn remember(&mut self, kind: PieceKind) {
        self.history.rotate_right(1);
        self.history[0] = Some(kind);
    }
}

impl PieceSupplier for HistorySupplier {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.upcoming;
        self.remember(kind);
        self.upcoming = self.roll();
        kind
    }

    fn peek(&self) -> PieceKind {
        self.upcoming
    }

    fn reset(&mut self) {
        *self = Self::with_weights(self.seed, self.weights);
    }
}

/// Cycles through a fixed list of pieces.
///
/// An empty list yields `I` forever.
#[derive(Debug, Clone)]
pub struct SequenceSupplier {
    pieces: Vec<PieceKind>,
    index: usize,
}

impl SequenceSupplier {
    pub fn new(pieces: impl IntoIterator<Item = PieceKind>) -> Self {
        Self {
            pieces: pieces.into_iter().collect(),
            index: 0,
        }
    }

    /// Same kind forever
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSupplier for SequenceSupplier {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.peek();
        if !self.pieces.is_empty() {
            self.index = (self.index + 1) % self.pieces.len();
        }
        kind
    }

    fn peek(&self) -> PieceKind {
        self.pieces.get(self.index).copied().unwrap_or(PieceKind::I)
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}
