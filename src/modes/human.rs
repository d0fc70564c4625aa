use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, interval, sleep};
use tracing::{debug, info};

use crate::game::{GameConfig, GameLoop, GameOverEvent, LoopState, Snapshot, TickOutcome};
use crate::input::{InputBuffer, InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::{Renderer, Scene};
use crate::score::ScoreStore;

/// Keyboard-driven play in the terminal
pub struct HumanMode {
    game: GameLoop,
    input: Arc<InputBuffer>,
    snapshot: Snapshot,
    game_over: Option<GameOverEvent>,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, scores: Box<dyn ScoreStore>) -> Self {
        let input = Arc::new(InputBuffer::new());
        let game = GameLoop::new(config, input.clone(), scores);
        let snapshot = game.snapshot();

        Self {
            game,
            input,
            snapshot,
            game_over: None,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The one pending tick. Re-armed after every tick with the current
        // interval, which shrinks as the snake eats.
        let tick_timer = sleep(self.game.tick_interval());
        tokio::pin!(tick_timer);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event) {
                            // A fresh round gets a full first interval
                            tick_timer.as_mut().reset(Instant::now() + self.game.tick_interval());
                        }
                    }
                }

                // Game logic tick
                _ = &mut tick_timer, if self.game.is_running() => {
                    self.update_game();
                    tick_timer.as_mut().reset(Instant::now() + self.game.tick_interval());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update(self.game.is_running());
                    let scene = Scene {
                        snapshot: &self.snapshot,
                        grid_width: self.game.config().grid_width,
                        grid_height: self.game.config().grid_height,
                        loop_state: self.game.state(),
                        high_score: self.game.high_score(),
                        tick_ms: self.game.tick_interval().as_millis() as u64,
                        game_over: self.game_over.as_ref(),
                        metrics: &self.metrics,
                    };
                    let renderer = &self.renderer;
                    terminal.draw(|frame| {
                        renderer.render(frame, &scene);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }

    /// Returns true when a new round was started
    fn handle_event(&mut self, event: Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                if self.game.is_running() {
                    self.input.push(direction);
                }
                false
            }
            KeyAction::Restart => self.restart(),
            KeyAction::Quit => {
                self.should_quit = true;
                false
            }
            KeyAction::None => false,
        }
    }

    fn update_game(&mut self) {
        match self.game.tick() {
            TickOutcome::Update(snapshot) => {
                self.metrics.on_score(snapshot.score);
                self.snapshot = snapshot;
            }
            TickOutcome::GameOver(event) => {
                self.metrics.on_game_over(&event);
                self.game_over = Some(event);
            }
            TickOutcome::Skipped => {}
        }
    }

    /// Start from the title screen, or reset and start after game over
    fn restart(&mut self) -> bool {
        match self.game.state() {
            LoopState::Running => return false,
            LoopState::GameOver => self.game.reset(),
            LoopState::Idle => {}
        }

        if !self.game.start() {
            return false;
        }

        debug!("New round from the terminal");
        self.snapshot = self.game.snapshot();
        self.game_over = None;
        self.metrics.on_round_start();
        true
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use crate::score::MemoryScoreStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode() -> HumanMode {
        HumanMode::new(
            GameConfig::default().with_seed(11),
            Box::new(MemoryScoreStore::new()),
        )
    }

    #[test]
    fn test_starts_on_title_screen() {
        let mode = mode();
        assert_eq!(mode.game.state(), LoopState::Idle);
        assert_eq!(mode.snapshot.segments, vec![Position::new(10, 10)]);
        assert!(mode.game_over.is_none());
    }

    #[test]
    fn test_space_starts_round() {
        let mut mode = mode();
        assert!(mode.handle_event(key(KeyCode::Char(' '))));
        assert!(mode.game.is_running());

        // Already running: nothing to restart
        assert!(!mode.handle_event(key(KeyCode::Char(' '))));
    }

    #[test]
    fn test_turn_keys_go_through_buffer() {
        let mut mode = mode();

        // Ignored before the round starts
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.input.peek(), None);

        mode.handle_event(key(KeyCode::Char(' ')));
        mode.handle_event(key(KeyCode::Up));
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.input.peek(), Some(crate::game::Direction::Left));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char(' ')));
        mode.handle_event(key(KeyCode::Up));

        while mode.game_over.is_none() {
            mode.update_game();
        }
        assert_eq!(mode.game.state(), LoopState::GameOver);
        assert_eq!(mode.metrics.rounds_played, 1);

        assert!(mode.handle_event(key(KeyCode::Char('r'))));
        assert!(mode.game.is_running());
        assert!(mode.game_over.is_none());
        assert_eq!(mode.snapshot.score, 0);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
