//! Terminal blockfall runner (default binary).
//!
//! Single logical thread of control: render, poll input until the next tick
//! boundary, then step the simulation. Board state is only ever touched
//! between renders, so frames always see settled state.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::Board;
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    // Interactive games vary by wall clock; tests pass fixed seeds instead.
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut board = Board::new(seed);

    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = blockfall::term::FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&board, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, with a timeout that lands on the next tick boundary.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = input.handle_key_press(key.code) {
                            board.apply_action(action);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat is ignored; the input handler
                        // produces repeats itself.
                    }
                    KeyEventKind::Release => {
                        input.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for action in input.update(TICK_MS) {
                board.apply_action(action);
            }
            board.update(TICK_MS);
        }
    }
}
