//! Session tests - full gameplay flows through the public API

use blockfall::core::{
    ClearPhase, GameConfig, GameEvent, GameSession, HistorySupplier, ManualClock, PiecePhase,
    PieceSupplier, ScoreState, SequenceSupplier, SpawnOutcome,
};
use blockfall::types::{Direction, GameAction, PieceKind, Rotation, BOARD_WIDTH};

fn session_with(config: GameConfig, pieces: &[PieceKind]) -> GameSession<SequenceSupplier> {
    GameSession::new(config, SequenceSupplier::new(pieces.iter().copied())).unwrap()
}

fn session(pieces: &[PieceKind]) -> GameSession<SequenceSupplier> {
    session_with(GameConfig::default(), pieces)
}

/// Tick at 16ms steps until the clear sequence has finished.
fn finish_clear<S: PieceSupplier>(game: &mut GameSession<S>, now: &mut u64) -> usize {
    let mut ticks = 0;
    while game.phase() != ClearPhase::Idle {
        *now += 16;
        game.tick(*now);
        ticks += 1;
        assert!(ticks < 1000, "clear never finished");
    }
    ticks
}

fn shift<S: PieceSupplier>(game: &mut GameSession<S>, dx: i8) {
    let direction = if dx < 0 { Direction::Left } else { Direction::Right };
    for _ in 0..dx.abs() {
        assert!(game.attempt_move(direction));
    }
}

#[test]
fn test_five_o_pieces_fill_bottom_rows() {
    let mut game = session(&[PieceKind::O]);
    game.start();
    let mut now = 0;
    game.tick(now);

    // O occupies mask columns 1..=2, so origins -1, 1, 3, 5, 7 tile the width.
    for dx in [-4i8, -2, 0, 2, 4] {
        assert_eq!(game.phase(), ClearPhase::Idle);
        shift(&mut game, dx);
        assert!(game.attempt_move(Direction::Drop));
    }

    assert_eq!(game.phase(), ClearPhase::Detected);
    assert_eq!(game.pending_rows(), &[18, 19]);
    game.board_mut().set(0, 17, Some(PieceKind::T));
    assert_eq!(game.score_state(), ScoreState { score: 300, lines: 2, level: 1 });
    assert!(game.active().is_none());
    // Cells stay in place until the collapse frame.
    assert!(game.board().is_row_full(19));

    finish_clear(&mut game, &mut now);
    assert_eq!(game.board().get(0, 19), Some(Some(PieceKind::T)));
    assert!(!game.board().is_row_full(19));
    assert_eq!(game.active().unwrap().kind, PieceKind::O);
}

#[test]
fn test_single_row_clear_drops_row_above() {
    let mut game = session(&[PieceKind::O]);
    for x in 0..8 {
        game.board_mut().set(x, 19, Some(PieceKind::I));
    }
    game.start();
    let mut now = 0;
    game.tick(now);

    shift(&mut game, 4);
    while game.attempt_move(Direction::Down) {}
    let outcome = game.lock_piece();
    assert_eq!(outcome.rows_now_full.as_slice(), &[19]);
    assert_eq!(game.score_state(), ScoreState { score: 100, lines: 1, level: 1 });

    finish_clear(&mut game, &mut now);
    // Former row 18 held the top half of the O.
    let grid = game.grid_snapshot();
    assert_eq!(grid[19][8], PieceKind::O.index() as u8 + 1);
    assert_eq!(grid[19][9], PieceKind::O.index() as u8 + 1);
    assert!(grid[19][..8].iter().all(|&c| c == 0));
    assert!(grid[18].iter().all(|&c| c == 0));
}

#[test]
fn test_lock_writes_mask_cells() {
    let mut game = session(&[PieceKind::T, PieceKind::I]);
    game.start();
    game.attempt_rotate();
    shift(&mut game, -2);
    for _ in 0..5 {
        assert!(game.attempt_move(Direction::Down));
    }
    let piece = game.active().unwrap();

    let outcome = game.lock_piece();
    assert!(outcome.rows_now_full.is_empty());
    for (x, y) in piece.minos() {
        assert_eq!(game.board().get(x, y), Some(Some(PieceKind::T)));
    }
    assert_eq!(game.board().cells().iter().filter(|c| c.is_some()).count(), 4);
    assert_eq!(game.active().unwrap().kind, PieceKind::I);
}

#[test]
fn test_tetris_at_level_three() {
    let config = GameConfig::default().with_start_level(3);
    let mut game = session_with(config, &[PieceKind::I]);
    for y in 16..20 {
        for x in 0..BOARD_WIDTH as i8 - 1 {
            game.board_mut().set(x, y, Some(PieceKind::L));
        }
    }
    game.start();
    assert!(game.attempt_rotate());
    assert_eq!(game.active().unwrap().rotation, Rotation::East);
    shift(&mut game, 4);
    assert!(game.attempt_move(Direction::Drop));

    assert_eq!(game.pending_rows(), &[16, 17, 18, 19]);
    assert_eq!(game.score_state().score, 2400);

    let events: Vec<_> = game.drain_events().collect();
    assert_eq!(
        events,
        [
            GameEvent::PieceLocked { kind: PieceKind::I },
            GameEvent::LinesCleared { rows: 4, points: 2400, level: 3 }
        ]
    );

    let mut now = 0;
    finish_clear(&mut game, &mut now);
    assert!(game.board().cells().iter().all(Option::is_none));
}

#[test]
fn test_level_up_event() {
    let mut game = session(&[PieceKind::I]);
    game.start();
    let mut now = 0;
    game.tick(now);
    let mut level_ups = Vec::new();

    // Ten single clears at level 1 reach the first goal.
    for _ in 0..10 {
        for x in 0..6 {
            game.board_mut().set(x, 19, Some(PieceKind::Z));
        }
        // I North covers columns 3..=6 of mask row 1; shift to cover 6..=9.
        shift(&mut game, 3);
        assert!(game.attempt_move(Direction::Drop));
        finish_clear(&mut game, &mut now);
        for event in game.drain_events() {
            if let GameEvent::LevelUp { level } = event {
                level_ups.push(level);
            }
        }
    }

    assert_eq!(level_ups, [2]);
    assert_eq!(game.score_state(), ScoreState { score: 1000, lines: 10, level: 2 });
    assert_eq!(game.drop_interval_ms(), 800);
}

#[test]
fn test_blocked_spawn_is_game_over() {
    let mut game = session(&[PieceKind::T]);
    game.board_mut().set(4, 0, Some(PieceKind::S));
    let outcome = game.start();
    let SpawnOutcome::GameOver(signal) = outcome else {
        panic!("expected game over, got {outcome:?}");
    };
    assert_eq!(signal.final_state, ScoreState { score: 0, lines: 0, level: 1 });
    assert!(game.is_game_over());
    assert_eq!(game.spawn_next(PieceKind::I), SpawnOutcome::Rejected);

    let mut seen = Vec::new();
    game.dispatch_events(&mut |event: &GameEvent| seen.push(*event));
    assert_eq!(seen, [GameEvent::GameOver { final_state: signal.final_state }]);
}

#[test]
fn test_stack_to_the_top_ends_game() {
    let mut game = session(&[PieceKind::O]);
    game.start();
    let mut drops = 0;
    while !game.is_game_over() {
        assert!(game.attempt_move(Direction::Drop));
        drops += 1;
        assert!(drops <= 10, "column should overflow after ten O pieces");
    }
    assert_eq!(drops, 10);
    assert!(game.active().is_none());
    assert!(!game.apply_action(GameAction::Rotate));
}

#[test]
fn test_invalid_moves_are_idempotent() {
    let mut game = session(&[PieceKind::J]);
    game.start();
    while game.attempt_move(Direction::Left) {}

    let snapshot = game.snapshot();
    for _ in 0..10 {
        assert!(!game.attempt_move(Direction::Left));
    }
    assert_eq!(game.snapshot(), snapshot);

    while game.attempt_move(Direction::Down) {}
    let snapshot = game.snapshot();
    for _ in 0..10 {
        assert!(!game.attempt_move(Direction::Down));
    }
    assert_eq!(game.snapshot(), snapshot);
}

#[test]
fn test_o_rotates_in_place() {
    let mut game = session(&[PieceKind::O]);
    game.start();
    let start = game.active().unwrap();
    for _ in 0..4 {
        assert!(game.attempt_rotate());
        let piece = game.active().unwrap();
        assert_eq!((piece.x, piece.y), (start.x, start.y));
        assert_eq!(piece.minos(), start.minos());
    }
    assert_eq!(game.active().unwrap().rotation, start.rotation);
}

#[test]
fn test_input_gated_during_clear() {
    let mut game = session(&[PieceKind::O, PieceKind::T]);
    for x in 0..8 {
        game.board_mut().set(x, 19, Some(PieceKind::I));
    }
    game.start();
    shift(&mut game, 4);
    game.attempt_move(Direction::Drop);
    assert_eq!(game.phase(), ClearPhase::Detected);

    assert!(!game.attempt_move(Direction::Left));
    assert!(!game.attempt_rotate());
    assert!(!game.hold());
    assert_eq!(game.spawn_next(PieceKind::I), SpawnOutcome::Rejected);
    assert!(game.lock_piece().rows_now_full.is_empty());
    assert_eq!(game.pending_rows(), &[19]);
}

#[test]
fn test_tick_report_tracks_phases() {
    let config = GameConfig {
        highlight_frames: 2,
        dissolve_frames: 2,
        collapse_frames: 2,
        ..GameConfig::default()
    };
    let mut game = session_with(config, &[PieceKind::O, PieceKind::T]);
    for x in 0..8 {
        game.board_mut().set(x, 19, Some(PieceKind::I));
    }
    game.start();
    shift(&mut game, 4);
    game.attempt_move(Direction::Drop);

    let clock = ManualClock::new(0);
    let mut phases = Vec::new();
    for _ in 0..7 {
        clock.advance(16);
        let report = game.tick_with(&clock);
        assert!(!report.auto_move_applied);
        phases.push((report.phase, report.phase_progress));
    }
    assert_eq!(
        phases,
        [
            (ClearPhase::Highlight, 0.0),
            (ClearPhase::Highlight, 0.5),
            (ClearPhase::Dissolve, 0.0),
            (ClearPhase::Dissolve, 0.5),
            (ClearPhase::Collapse, 0.0),
            (ClearPhase::Collapse, 0.5),
            (ClearPhase::Idle, 0.0),
        ]
    );
    assert_eq!(game.active().unwrap().kind, PieceKind::T);
}

#[test]
fn test_pause_freezes_clear_and_gravity() {
    let mut game = session(&[PieceKind::O, PieceKind::T]);
    for x in 0..8 {
        game.board_mut().set(x, 19, Some(PieceKind::I));
    }
    game.start();
    shift(&mut game, 4);
    game.attempt_move(Direction::Drop);
    let mut now = 0;
    game.tick(now);
    let progress = game.phase_progress();

    assert!(game.apply_action(GameAction::Pause));
    assert!(game.is_paused());
    for _ in 0..100 {
        now += 16;
        game.tick(now);
    }
    assert_eq!(game.phase(), ClearPhase::Highlight);
    assert_eq!(game.phase_progress(), progress);

    game.apply_action(GameAction::Pause);
    finish_clear(&mut game, &mut now);
    assert_eq!(game.active().unwrap().kind, PieceKind::T);
    assert_eq!(game.active().unwrap().phase, PiecePhase::Spawned);
}

#[test]
fn test_gravity_lands_and_locks() {
    let mut game = session(&[PieceKind::O, PieceKind::T]);
    game.start();
    let mut now = 0;
    game.tick(now);
    let interval = u64::from(game.drop_interval_ms());

    let mut locked = false;
    for _ in 0..40 {
        now += interval;
        if game.tick(now).locked {
            locked = true;
            break;
        }
    }
    assert!(locked);
    assert_eq!(game.board().get(4, 19), Some(Some(PieceKind::O)));
    assert_eq!(game.board().get(5, 18), Some(Some(PieceKind::O)));
    assert_eq!(game.active().unwrap().kind, PieceKind::T);
}

#[test]
fn test_snapshot_reflects_session() {
    let mut game = session(&[PieceKind::T, PieceKind::S]);
    game.start();
    game.hold();
    let snapshot = game.snapshot();
    assert_eq!(snapshot.hold, Some(PieceKind::T));
    assert_eq!(snapshot.active.unwrap().kind, PieceKind::S);
    assert_eq!(snapshot.next, PieceKind::T);
    assert!(!snapshot.can_hold);
    assert_eq!(snapshot.ghost_y, game.ghost_y());
    assert_eq!(snapshot.board, game.grid_snapshot());
    assert_eq!(snapshot.drop_interval_ms, 1000);
    assert!(snapshot.playable());
}

#[test]
fn test_history_supplier_replays_with_seed() {
    let play = || {
        let mut game = GameSession::new(GameConfig::default(), HistorySupplier::new(42)).unwrap();
        game.start();
        let mut kinds = Vec::new();
        for _ in 0..8 {
            kinds.push(game.active().unwrap().kind);
            game.attempt_move(Direction::Drop);
            if game.is_game_over() {
                break;
            }
        }
        kinds
    };
    assert_eq!(play(), play());
}

#[test]
fn test_seeded_bag_deals_every_kind() {
    let mut game = GameSession::seeded(7);
    game.start();
    let mut kinds = Vec::new();
    for _ in 0..7 {
        kinds.push(game.active().unwrap().kind);
        game.board_mut().clear();
        game.attempt_move(Direction::Drop);
        game.board_mut().clear();
    }
    kinds.sort();
    assert_eq!(kinds, PieceKind::ALL);
}

#[test]
fn test_restart_replays_same_sequence() {
    let mut game = GameSession::seeded(99);
    game.start();
    let first = game.active().unwrap().kind;
    let preview = game.preview();
    game.attempt_move(Direction::Drop);

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.active().unwrap().kind, first);
    assert_eq!(game.preview(), preview);
    assert_eq!(game.score_state(), ScoreState { score: 0, lines: 0, level: 1 });
}
