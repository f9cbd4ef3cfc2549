//! Terminal Blockfall runner (default binary).
//!
//! Configuration comes from `BLOCKFALL_*` environment variables (see
//! `blockfall::config`). Input is read with crossterm and frames are drawn
//! through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event as TermEvent, KeyEvent, KeyEventKind};
use tracing::info;

use blockfall::config::Config;
use blockfall::core::{GameSnapshot, GameState, Randomizer};
use blockfall::engine::{Driver, Event, Gravity};
use blockfall::input::{handle_key_event, is_soft_drop_key, should_quit, SoftDropLatch};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::init(&config)?;
    info!(
        seed = config.seed,
        randomizer = config.randomizer.as_str(),
        preview = config.preview,
        fall_ms = config.fall_ms,
        "starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let source = Randomizer::new(config.randomizer, config.seed);
    let game = GameState::with_options(source, config.game_options());
    let mut driver = Driver::new(game, Gravity::new(config.fall_ms, config.soft_drop_ms));

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = GameSnapshot::default();
    let mut latch = SoftDropLatch::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    while !driver.finished() {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        driver.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                TermEvent::Key(key) => handle_key(&mut driver, &mut latch, key),
                TermEvent::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;

            if latch.update(elapsed_ms) {
                driver.handle(Event::SoftDrop(false));
            }
            driver.handle(Event::Tick(elapsed_ms));
        }
    }

    info!(
        score = driver.game().score(),
        lines = driver.game().lines(),
        "quit"
    );
    Ok(())
}

fn handle_key(driver: &mut Driver<Randomizer>, latch: &mut SoftDropLatch, key: KeyEvent) {
    match key.kind {
        KeyEventKind::Press => {
            if should_quit(key) {
                driver.handle(Event::Quit);
                return;
            }

            if is_soft_drop_key(key.code) {
                if latch.press() {
                    driver.handle(Event::SoftDrop(true));
                }
                return;
            }

            if let Some(action) = handle_key_event(key) {
                if action == GameAction::Restart {
                    latch.reset();
                    driver.handle(Event::SoftDrop(false));
                }
                driver.handle(Event::Action(action));
            }
        }
        KeyEventKind::Repeat => {
            // Auto-repeat keeps the soft drop hold alive and repeats sideways moves.
            if is_soft_drop_key(key.code) {
                latch.press();
                return;
            }
            if let Some(action @ (GameAction::MoveLeft | GameAction::MoveRight)) =
                handle_key_event(key)
            {
                driver.handle(Event::Action(action));
            }
        }
        KeyEventKind::Release => {
            if is_soft_drop_key(key.code) && latch.release() {
                driver.handle(Event::SoftDrop(false));
            }
        }
    }
}
