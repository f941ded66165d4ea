use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use blockfall::core::{GameSession, GameSnapshot};
use blockfall::types::GameAction;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn core_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut game = GameSession::seeded(1);
    game.start();
    let mut snapshot = GameSnapshot::default();
    let mut now = 0u64;

    // Warm-up.
    game.tick(now);
    game.apply_action(GameAction::MoveLeft);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            now += 16;
            game.tick(now);
        }

        for _ in 0..50 {
            game.apply_action(GameAction::MoveLeft);
            game.apply_action(GameAction::MoveRight);
            game.apply_action(GameAction::Rotate);
            game.apply_action(GameAction::SoftDrop);
        }

        // Hard drops drive lock, line clear, spawn and game over.
        for _ in 0..60 {
            game.apply_action(GameAction::HardDrop);
            for _ in 0..40 {
                now += 16;
                game.tick(now);
            }
            game.snapshot_into(&mut snapshot);
            game.drain_events().for_each(drop);
            if game.is_game_over() {
                game.apply_action(GameAction::Restart);
            }
        }
    });

    assert_eq!(allocs, 0);
}
