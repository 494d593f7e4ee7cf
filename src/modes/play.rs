//! Interactive play mode
//!
//! Runs the fixed-tick loop in the terminal: key events are collected into a
//! [`KeyboardInput`], each timer tick advances the session exactly once, and a
//! frame is drawn after every tick.
//!
//! # Controls
//!
//! - Arrows/WASD: steer
//! - B: toggle debug mode (slower ticks, next-head overlay)
//! - R: restart
//! - Q/Esc/Ctrl+C: quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::{GameSession, TickResult};
use crate::input::{InputSource, KeyAction, KeyboardInput};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Run one scheduler step against any input source.
///
/// Returns `None` when the input asked to quit; the session is not touched
/// in that case.
pub fn drive_tick<I: InputSource>(session: &mut GameSession, input: &mut I) -> Option<TickResult> {
    if input.poll_quit() {
        return None;
    }
    let direction = input.poll_direction();
    Some(session.tick(direction))
}

fn new_tick_timer(session: &GameSession) -> Interval {
    let period = session.tick_interval();
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

pub struct PlayMode {
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input: KeyboardInput,
}

impl PlayMode {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input: KeyboardInput::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!("Play mode started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "Play mode finished: {} games, best score {}",
            self.metrics.games_played, self.metrics.high_score
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = new_tick_timer(&self.session);

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event, &mut tick_timer) {
                                self.draw(terminal)?;
                            }
                        }
                        Some(Err(err)) => {
                            return Err(anyhow::Error::from(err).context("Failed to read terminal event"));
                        }
                        None => break,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let Some(result) = drive_tick(&mut self.session, &mut self.input) else {
                        break;
                    };
                    self.on_tick(&result);
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => break,
            }

            // Quit applies immediately, game over or not
            if self.input.poll_quit() {
                break;
            }
        }

        Ok(())
    }

    /// Returns true if the screen needs redrawing
    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> bool {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return false;
                }

                match self.input.record(key) {
                    KeyAction::Restart => {
                        self.reset_game();
                        true
                    }
                    KeyAction::ToggleDebug => {
                        self.session.toggle_debug();
                        *tick_timer = new_tick_timer(&self.session);
                        info!("Debug mode {}", if self.session.is_debug() { "on" } else { "off" });
                        true
                    }
                    KeyAction::Move(_) | KeyAction::Quit | KeyAction::None => false,
                }
            }
            Event::Resize(_, _) => true,
            _ => false,
        }
    }

    fn on_tick(&mut self, result: &TickResult) {
        if result.end_cause.is_some() {
            self.metrics
                .on_game_over(self.session.score(), self.session.snake().len());
        }
        self.metrics.update();
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let snapshot = self.session.snapshot();
        terminal
            .draw(|frame| self.renderer.render(frame, &snapshot, &self.metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn reset_game(&mut self) {
        self.session.reset();
        self.metrics.on_game_start();
        // Drop directions pressed before the restart
        self.input.poll_direction();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
