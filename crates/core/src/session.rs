//! Game session - owns one match and drives it tick by tick
//!
//! A [`GameSession`] holds the board, the active piece, the hold slot, the
//! piece supplier, the line clear engine and the score progression. Every
//! gameplay operation is a method on it; renderers read [`GameSnapshot`]s.

use arrayvec::ArrayVec;

use crate::active::{ActivePiece, PiecePhase};
use crate::board::Board;
use crate::clock::Clock;
use crate::config::{ConfigError, GameConfig};
use crate::events::{EventSink, GameEvent, EVENT_CAPACITY};
use crate::line_clear::{ClearPhase, LineClearEngine, PendingRows};
use crate::progression::{Progression, ScoreState};
use crate::rng::{BagSupplier, PieceSupplier};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, GridSnapshot};
use crate::types::{Direction, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Final state handed to persistence when a spawn collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSignal {
    pub final_state: ScoreState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(ActivePiece),
    /// A piece is already active, a clear is running, or the session is
    /// paused or over.
    Rejected,
    GameOver(GameOverSignal),
}

impl SpawnOutcome {
    pub fn is_spawned(&self) -> bool {
        matches!(self, SpawnOutcome::Spawned(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Rows completed by this lock, ascending. Empty if nothing was locked.
    pub rows_now_full: PendingRows,
    /// Set when the follow-up spawn collided and ended the match.
    pub game_over: Option<GameOverSignal>,
}

/// What a single [`GameSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub phase: ClearPhase,
    pub phase_progress: f32,
    /// Gravity moved the active piece down one row.
    pub auto_move_applied: bool,
    /// The active piece locked on this tick.
    pub locked: bool,
}

impl TickReport {
    fn idle(phase: ClearPhase, phase_progress: f32) -> Self {
        Self {
            phase,
            phase_progress,
            auto_move_applied: false,
            locked: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession<S: PieceSupplier = BagSupplier> {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    supplier: S,
    clear: LineClearEngine,
    progression: Progression,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
    // Wall-clock anchor; `None` until the first tick and after a resume.
    last_tick_ms: Option<u64>,
    drop_timer_ms: u64,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameSession<BagSupplier> {
    /// Default rules with a seeded 7-bag.
    pub fn seeded(seed: u32) -> Self {
        Self::build(GameConfig::default(), BagSupplier::new(seed))
    }
}

impl<S: PieceSupplier> GameSession<S> {
    pub fn new(config: GameConfig, supplier: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, supplier))
    }

    fn build(config: GameConfig, supplier: S) -> Self {
        Self {
            config,
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            supplier,
            clear: LineClearEngine::new(config.phase_durations()),
            progression: Progression::new(config.start_level),
            events: ArrayVec::new(),
            last_tick_ms: None,
            drop_timer_ms: 0,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start the match and spawn the first piece from the supplier.
    ///
    /// Rejected while paused; the session stays unstarted until a spawn
    /// actually happens.
    pub fn start(&mut self) -> SpawnOutcome {
        if self.started {
            return SpawnOutcome::Rejected;
        }
        self.spawn_from_supplier()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions in tests and replays.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn score_state(&self) -> ScoreState {
        self.progression.score_state()
    }

    pub fn phase(&self) -> ClearPhase {
        self.clear.phase()
    }

    pub fn phase_progress(&self) -> f32 {
        self.clear.progress()
    }

    pub fn pending_rows(&self) -> &[usize] {
        self.clear.pending()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progression.drop_interval_ms()
    }

    /// Next piece the supplier will hand out
    pub fn preview(&self) -> PieceKind {
        self.supplier.peek()
    }

    /// Landing row of the active piece
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|piece| piece.ghost_y(&self.board))
    }

    pub fn grid_snapshot(&self) -> GridSnapshot {
        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.board.write_u8_grid(&mut grid);
        grid
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.next = self.supplier.peek();
        out.can_hold = self.can_hold;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.phase = self.clear.phase();
        out.phase_progress = self.clear.progress();
        out.pending_rows.clear();
        out.pending_rows.extend(self.clear.pending().iter().copied());
        out.score = self.progression.score_state();
        out.drop_interval_ms = self.progression.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    /// Whether gameplay input is accepted right now.
    fn accepts_input(&self) -> bool {
        !self.paused && !self.game_over && self.clear.is_idle()
    }

    /// Place `kind` at the spawn position.
    ///
    /// A collision ends the game and queues [`GameEvent::GameOver`].
    pub fn spawn_next(&mut self, kind: PieceKind) -> SpawnOutcome {
        if !self.accepts_input() || self.active.is_some() {
            return SpawnOutcome::Rejected;
        }
        self.started = true;

        match ActivePiece::spawn(kind, &self.board, self.config.spawn_x, self.config.spawn_y) {
            Some(piece) => {
                self.active = Some(piece);
                self.can_hold = true;
                self.drop_timer_ms = 0;
                SpawnOutcome::Spawned(piece)
            }
            None => SpawnOutcome::GameOver(self.end_game()),
        }
    }

    fn spawn_from_supplier(&mut self) -> SpawnOutcome {
        if !self.accepts_input() || self.active.is_some() {
            return SpawnOutcome::Rejected;
        }
        let kind = self.supplier.next_piece();
        self.spawn_next(kind)
    }

    fn end_game(&mut self) -> GameOverSignal {
        self.game_over = true;
        self.active = None;
        let final_state = self.progression.score_state();
        self.push_event(GameEvent::GameOver { final_state });
        GameOverSignal { final_state }
    }

    /// Move the active piece. `Drop` falls to the floor and locks at once.
    ///
    /// A rejected move leaves the session exactly as it was.
    pub fn attempt_move(&mut self, direction: Direction) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        let moved = piece.try_move(&self.board, direction);
        if moved {
            self.active = Some(piece);
            if direction == Direction::Drop {
                self.lock_piece();
            }
        }
        moved
    }

    pub fn attempt_rotate(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        let rotated = piece.try_rotate(&self.board);
        if rotated {
            self.active = Some(piece);
        }
        rotated
    }

    /// Swap the active piece with the hold slot, once per spawned piece.
    pub fn hold(&mut self) -> bool {
        if !self.accepts_input() || !self.can_hold {
            return false;
        }
        let Some(piece) = self.active.take() else {
            return false;
        };

        let outcome = match self.hold.replace(piece.kind) {
            Some(held) => self.spawn_next(held),
            None => self.spawn_from_supplier(),
        };
        // Swapped-in piece may not hold again until the next lock.
        self.can_hold = false;
        outcome.is_spawned()
    }

    /// Commit the active piece to the board and scan for full rows.
    ///
    /// Full rows start the clear sequence; otherwise the next piece spawns
    /// immediately.
    pub fn lock_piece(&mut self) -> LockOutcome {
        if self.paused || self.game_over || !self.clear.is_idle() {
            return LockOutcome::default();
        }
        let Some(mut piece) = self.active.take() else {
            return LockOutcome::default();
        };

        piece.lock(&mut self.board);
        self.drop_timer_ms = 0;
        self.push_event(GameEvent::PieceLocked { kind: piece.kind });

        let scored_level = self.progression.level();
        let detection = self.clear.detect(&self.board, &mut self.progression);
        let score = detection.score;

        let mut game_over = None;
        if detection.rows.is_empty() {
            if let SpawnOutcome::GameOver(signal) = self.spawn_from_supplier() {
                game_over = Some(signal);
            }
        } else {
            self.push_event(GameEvent::LinesCleared {
                rows: score.rows,
                points: score.points,
                level: scored_level,
            });
            if let Some(level) = score.level_up {
                self.push_event(GameEvent::LevelUp { level });
            }
        }

        LockOutcome {
            rows_now_full: detection.rows,
            game_over,
        }
    }

    /// Advance the session to `now_ms`.
    ///
    /// Each unpaused tick advances a running clear by one frame. Otherwise
    /// gravity accumulates elapsed time and takes at most one step down.
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        if self.paused || self.game_over || !self.started {
            return TickReport::idle(self.clear.phase(), self.clear.progress());
        }

        let elapsed = self
            .last_tick_ms
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_tick_ms = Some(now_ms);

        if !self.clear.is_idle() {
            let step = self.clear.advance(&mut self.board);
            if step.completed {
                self.spawn_from_supplier();
            }
            return TickReport::idle(step.phase, step.progress);
        }

        let Some(mut piece) = self.active else {
            return TickReport::idle(self.clear.phase(), self.clear.progress());
        };

        if piece.phase == PiecePhase::Locking {
            if piece.is_grounded(&self.board) {
                self.lock_piece();
                return TickReport {
                    locked: true,
                    ..TickReport::idle(self.clear.phase(), self.clear.progress())
                };
            }
            piece.phase = PiecePhase::Falling;
        }

        let mut auto_move_applied = false;
        self.drop_timer_ms += elapsed;
        if self.drop_timer_ms >= u64::from(self.progression.drop_interval_ms()) {
            self.drop_timer_ms = 0;
            auto_move_applied = piece.try_move(&self.board, Direction::Down);
            if !auto_move_applied {
                piece.phase = PiecePhase::Locking;
            }
        }
        self.active = Some(piece);

        TickReport {
            auto_move_applied,
            ..TickReport::idle(self.clear.phase(), self.clear.progress())
        }
    }

    pub fn tick_with(&mut self, clock: &impl Clock) -> TickReport {
        self.tick(clock.now_ms())
    }

    pub fn pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = true;
        self.last_tick_ms = None;
    }

    /// Resume play. Time spent paused is never counted.
    pub fn resume(&mut self) {
        self.paused = false;
        self.last_tick_ms = None;
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Clear everything for a new game. Call [`start`](Self::start) to play.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.supplier.reset();
        self.clear.reset();
        self.progression.reset();
        self.events.clear();
        self.last_tick_ms = None;
        self.drop_timer_ms = 0;
        self.paused = false;
        self.game_over = false;
        self.started = false;
    }

    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.attempt_move(Direction::Left),
            GameAction::MoveRight => self.attempt_move(Direction::Right),
            GameAction::SoftDrop => self.attempt_move(Direction::Down),
            GameAction::HardDrop => self.attempt_move(Direction::Drop),
            GameAction::Rotate => self.attempt_rotate(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => {
                if self.game_over {
                    return false;
                }
                self.toggle_pause();
                true
            }
            GameAction::Restart => {
                self.reset();
                self.start();
                true
            }
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        // Full queue: evict the oldest.
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Queued events since the last drain, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn dispatch_events(&mut self, sink: &mut impl EventSink) {
        for event in self.events.drain(..) {
            sink.on_event(&event);
        }
    }
}
