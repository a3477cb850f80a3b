//! The controller: owns the game state, drives the engine off a fixed tick
//! timer, and wires the renderer, input, sound and high-score collaborators
//! together. Everything runs on one cooperative event loop; input lands
//! between ticks and a tick always runs to completion.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::audio::AudioCues;
use crate::game::{Action, Direction, GameConfig, GameEnd, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::{Renderer, UiView};
use crate::score::HighScoreStore;

/// How long the game-over overlay stays up before the start screen returns.
const GAME_OVER_LINGER: Duration = Duration::from_secs(2);

/// Render at 30 FPS; the simulation ticks much slower.
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Which surface is on screen. `Start` is the idle state between games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Start,
    Game,
}

pub struct App {
    engine: GameEngine,
    state: GameState,
    screen: Screen,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    scores: HighScoreStore,
    audio: AudioCues,
    pending_direction: Option<Direction>,
    last_end: Option<GameEnd>,
    game_over_at: Option<Instant>,
    last_game_beat_best: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, scores: HighScoreStore, audio: AudioCues) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            screen: Screen::Start,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            scores,
            audio,
            pending_direction: None,
            last_end: None,
            game_over_at: None,
            last_game_beat_best: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_event_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(Duration::from_millis(self.engine.config().tick_ms));
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // The tick arm only advances a live game; once the session
                // is over the timer fires into a no-op until a restart.
                _ = tick_timer.tick() => {
                    if self.screen == Screen::Game && !self.state.game_over {
                        self.advance_tick();
                    }
                }

                _ = render_timer.tick() => {
                    self.on_render_timer();
                    let view = self.view();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Key press only; ignore release/repeat events.
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    if self.screen == Screen::Game && !self.state.game_over {
                        self.pending_direction = Some(direction);
                    }
                }
                KeyAction::Start => match self.screen {
                    Screen::Start => self.start_game(),
                    // On the game-over overlay Enter restarts right away.
                    Screen::Game if self.state.game_over => self.start_game(),
                    Screen::Game => {}
                },
                KeyAction::Restart => {
                    if self.screen == Screen::Game {
                        self.start_game();
                    }
                }
                KeyAction::ToggleSound => self.audio.toggle(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// One simulation tick: apply the buffered steering request, step the
    /// engine, and fan the outcome out to sound and the high-score store.
    fn advance_tick(&mut self) {
        let action = self
            .pending_direction
            .take()
            .map(Action::Steer)
            .unwrap_or(Action::Continue);

        let result = self.engine.step(&mut self.state, action);

        if result.ate_food {
            self.audio.on_food();
        }

        if let Some(end) = result.end {
            self.stats.on_game_over();
            self.last_end = Some(end);
            self.game_over_at = Some(Instant::now());

            if end.is_win() {
                self.audio.on_win();
            } else {
                self.audio.on_game_over();
            }

            self.last_game_beat_best = match self.scores.record(self.state.score) {
                Ok(beat) => beat,
                // The in-memory best is already raised; a failed write only
                // loses persistence for this run.
                Err(_) => true,
            };
        }
    }

    fn on_render_timer(&mut self) {
        self.stats.update();

        // The overlay falls back to the start screen after a short linger.
        if let Some(at) = self.game_over_at {
            if at.elapsed() >= GAME_OVER_LINGER {
                self.show_start_screen();
            }
        }
    }

    fn start_game(&mut self) {
        self.state = self.engine.reset();
        self.screen = Screen::Game;
        self.stats.on_game_start();
        self.pending_direction = None;
        self.last_end = None;
        self.game_over_at = None;
        self.last_game_beat_best = false;
    }

    fn show_start_screen(&mut self) {
        self.screen = Screen::Start;
        self.last_end = None;
        self.game_over_at = None;
    }

    fn view(&self) -> UiView<'_> {
        match self.screen {
            Screen::Start => UiView::Start {
                best: self.scores.best(),
                sound_on: self.audio.is_enabled(),
            },
            Screen::Game => UiView::Game {
                state: &self.state,
                stats: &self.stats,
                best: self.scores.best(),
                sound_on: self.audio.is_enabled(),
                end: self.last_end,
                new_best: self.last_game_beat_best,
            },
        }
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
    use crate::game::{Position, Snake};
    use tempfile::TempDir;

    fn test_app(dir: &TempDir) -> App {
        let scores = HighScoreStore::load(dir.path().join("highscore.json")).unwrap();
        App::new(GameConfig::default(), scores, AudioCues::new(false))
    }

    #[test]
    fn boots_onto_the_start_screen() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        assert_eq!(app.screen, Screen::Start);
        assert!(matches!(app.view(), UiView::Start { best: 0, .. }));
    }

    #[test]
    fn start_game_resets_the_session() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.state.score = 9;
        app.state.game_over = true;

        app.start_game();

        assert_eq!(app.screen, Screen::Game);
        assert_eq!(app.state.score, 0);
        assert!(!app.state.game_over);
        assert_eq!(app.state.snake.len(), 1);
        assert_eq!(app.pending_direction, None);
    }

    #[test]
    fn crash_records_the_high_score_and_arms_the_linger() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.start_game();

        // Park the snake on the edge, heading out.
        app.state.snake = Snake::new(Position::new(0, 0), Direction::Left, 1);
        app.state.score = 7;
        app.state.food = Position::new(5, 5);

        app.advance_tick();

        assert!(app.state.game_over);
        assert_eq!(app.last_end, Some(GameEnd::Wall));
        assert!(app.game_over_at.is_some());
        assert!(app.last_game_beat_best);
        assert_eq!(app.scores.best(), 7);
        assert_eq!(app.stats.games_played, 1);
    }

    #[test]
    fn scoreless_crash_leaves_the_best_alone() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.start_game();
        app.state.snake = Snake::new(Position::new(0, 0), Direction::Left, 1);
        app.state.food = Position::new(5, 5);

        app.advance_tick();

        assert!(!app.last_game_beat_best);
        assert_eq!(app.scores.best(), 0);
    }

    #[test]
    fn best_is_monotone_across_restarts() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        for score in [5u32, 3, 8, 2] {
            app.start_game();
            app.state.snake = Snake::new(Position::new(0, 0), Direction::Left, 1);
            app.state.score = score;
            app.state.food = Position::new(5, 5);
            app.advance_tick();
        }

        assert_eq!(app.scores.best(), 8);
    }

    #[test]
    fn back_on_the_start_screen_after_the_linger() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.start_game();
        app.state.game_over = true;
        app.game_over_at = Some(Instant::now() - GAME_OVER_LINGER);

        app.on_render_timer();

        assert_eq!(app.screen, Screen::Start);
        assert_eq!(app.game_over_at, None);
    }
}
