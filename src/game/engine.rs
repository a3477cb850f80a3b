use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{GameState, Position, Snake},
};
use rand::seq::SliceRandom;

/// Why a session reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// The head left the playing field.
    Wall,
    /// The head landed on the body.
    SelfCollision,
    /// The snake covers the whole board and there is nowhere left to put
    /// food. Treated as a win rather than spinning forever looking for a
    /// free cell.
    BoardFull,
}

impl GameEnd {
    pub fn is_win(&self) -> bool {
        matches!(self, GameEnd::BoardFull)
    }
}

/// What one tick did, for the controller and its collaborators (renderer,
/// sound cues, high-score store).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// The head landed on the food this tick.
    pub ate_food: bool,
    /// Set exactly once, on the tick that ends the session.
    pub end: Option<GameEnd>,
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        self.end.is_some()
    }
}

/// The simulation engine. Pure state transitions plus the one source of
/// randomness (food placement); no I/O and nothing here can fail.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A fresh session: snake at the grid center heading right, score zero,
    /// food somewhere off the snake.
    pub fn reset(&mut self) -> GameState {
        let center = self.config.grid_size / 2;
        let snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            self.config.initial_snake_length,
        );

        // Food starts off-board until placed; a board the starting snake
        // already fills ends before the first tick.
        let mut state = GameState::new(snake, Position::new(-1, -1), self.config.grid_size);
        match self.place_food(&state) {
            Some(food) => state.food = food,
            None => state.game_over = true,
        }
        state
    }

    /// Advance the simulation by one tick. Steering is applied first under
    /// the no-reversal rule, then the snake moves (growing over food), and
    /// finally the terminal conditions are checked: wall first, then the
    /// body behind the head. Once the session is over this is a no-op.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if state.game_over {
            return StepResult {
                ate_food: false,
                end: None,
            };
        }

        if let Action::Steer(direction) = action {
            state.snake.steer(direction);
        }

        let ate_food = state.snake.head().step(state.snake.direction) == state.food;
        if ate_food {
            state.score += 1;
        }

        // The tail cell is vacated before the head lands (unless growing),
        // so chasing the tail is safe.
        let new_head = state.snake.advance(ate_food);

        if !state.in_bounds(new_head) {
            state.game_over = true;
            return StepResult {
                ate_food,
                end: Some(GameEnd::Wall),
            };
        }
        if state.snake.hits_body(new_head) {
            state.game_over = true;
            return StepResult {
                ate_food,
                end: Some(GameEnd::SelfCollision),
            };
        }

        if ate_food {
            match self.place_food(state) {
                Some(food) => state.food = food,
                None => {
                    state.game_over = true;
                    return StepResult {
                        ate_food,
                        end: Some(GameEnd::BoardFull),
                    };
                }
            }
        }

        StepResult {
            ate_food,
            end: None,
        }
    }

    /// Pick food uniformly among the free cells. `None` when the board is
    /// full; never loops.
    fn place_food(&mut self, state: &GameState) -> Option<Position> {
        state.free_cells().choose(&mut self.rng).copied()
    }
}
