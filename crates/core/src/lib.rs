//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every gameplay rule of a falling-block puzzle match. It
//! has **no dependencies** on terminals, rendering or I/O:
//!
//! - **Deterministic**: time and randomness are injected, so a seed and a
//!   tick sequence replay the same match
//! - **Testable**: every rule is reachable through plain method calls
//! - **Allocation-free hot paths**: ticks, moves, locks and snapshots use
//!   fixed-size storage only
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 playfield with collision checks and row shifting
//! - [`pieces`]: 4x4 shape masks and clockwise rotation with wall kicks
//! - [`active`]: the falling piece and its movement rules
//! - [`line_clear`]: row detection and the clear animation phases
//! - [`progression`]: score, lines, level goals and gravity speed
//! - [`rng`]: seeded piece suppliers (7-bag, history, fixed sequence)
//! - [`session`]: one match, tying everything together
//! - [`events`], [`snapshot`]: what callers observe
//! - [`clock`], [`config`]: injected time and validated settings
//!
//! # Game Rules
//!
//! - **Rotation**: clockwise only; kicks are tried in the fixed order
//!   `(+1,0) (-1,0) (0,-1) (+2,0) (-2,0)`
//! - **Lock**: a piece whose gravity step fails gets one tick of grace
//! - **Line clears**: `100/300/500/800 x level`, then a frame-counted
//!   Highlight / Dissolve / Collapse sequence that freezes play
//! - **Levels**: 1 to 20; each level-up raises the goal by `10 x new level`
//! - **Hold**: one swap per spawned piece
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameSession, SequenceSupplier};
//! use blockfall_core::types::{Direction, PieceKind};
//!
//! let mut game = GameSession::new(GameConfig::default(), SequenceSupplier::repeat(PieceKind::O))?;
//! game.start();
//!
//! assert!(game.attempt_move(Direction::Left));
//! assert!(game.attempt_move(Direction::Drop));
//!
//! assert_eq!(game.board().get(3, 19), Some(Some(PieceKind::O)));
//! assert_eq!(game.score_state().score, 0);
//! # Ok::<(), blockfall_core::ConfigError>(())
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`] once per frame (about every 16ms) with the
//! current time in milliseconds, or [`GameSession::tick_with`] and a
//! [`Clock`]. Gravity follows the level's drop interval (1000ms at level 1
//! down to 65ms at level 20); clear phases advance one frame per tick.

pub mod active;
pub mod board;
pub mod clock;
pub mod config;
pub mod events;
pub mod line_clear;
pub mod pieces;
pub mod progression;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

pub use active::{ActivePiece, PiecePhase};
pub use board::Board;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{ConfigError, GameConfig};
pub use events::{EventSink, GameEvent};
pub use line_clear::{ClearPhase, LineClearEngine, PendingRows};
pub use pieces::{shape, try_rotate, ShapeMask};
pub use progression::{Progression, ScoreState};
pub use rng::{BagSupplier, HistorySupplier, PieceSupplier, SequenceSupplier, SimpleRng};
pub use session::{GameOverSignal, GameSession, LockOutcome, SpawnOutcome, TickReport};
pub use snapshot::{ActiveSnapshot, GameSnapshot, GridSnapshot};
