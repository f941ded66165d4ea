//! Terminal blockfall runner (default binary).
//!
//! Drives a [`GameSession`] from crossterm key events and a monotonic clock,
//! drawing a plain-text view every frame.
//!
//! ```text
//! blockfall [--level N] [--seed N] [--supplier bag|history]
//! ```

mod cli;
mod terminal;
mod view;

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::core::{GameSession, GameSnapshot, MonotonicClock, PieceSupplier};
use blockfall::input::{map_key, KeyCommand};
use blockfall::types::TICK_MS;

use crate::terminal::Terminal;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = cli::parse_args(&args)?;
    let mut game = GameSession::new(options.config(), options.supplier.build(options.seed))?;

    let mut term = Terminal::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut Terminal, game: &mut GameSession<Box<dyn PieceSupplier>>) -> Result<()> {
    game.start();

    let clock = MonotonicClock::new();
    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();
    let mut snapshot = GameSnapshot::default();
    let mut lines = Vec::with_capacity(32);

    loop {
        game.snapshot_into(&mut snapshot);
        view::render_lines(&snapshot, &mut lines);
        term.draw(&lines)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    Some(KeyCommand::Quit) => return Ok(()),
                    Some(KeyCommand::Game(action)) => {
                        game.apply_action(action);
                    }
                    None => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick_with(&clock);
            // No audio sink in the terminal runner.
            game.drain_events().for_each(drop);
        }
    }
}
