use super::action::Direction;

/// A single cell of the playing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step away in `direction`.
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The snake: an ordered body with the head at index 0, plus its current
/// heading. The body never becomes empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub body: Vec<Position>,
    pub direction: Direction,
}

impl Snake {
    /// A snake of `length` cells, head at `head`, trailing away from the
    /// direction of travel.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| Position::new(head.x - dx * i, head.y - dy * i))
            .collect();
        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Apply a steering request. Reversals onto the neck are silently
    /// dropped; anything else takes effect on the next tick.
    pub fn steer(&mut self, requested: Direction) {
        if !self.direction.is_opposite(requested) {
            self.direction = requested;
        }
    }

    /// Move one cell in the current direction. Unless the snake is growing
    /// the tail is vacated before the new head lands, so stepping into the
    /// cell the tail just left is legal.
    pub fn advance(&mut self, grow: bool) -> Position {
        let new_head = self.head().step(self.direction);
        if !grow {
            self.body.pop();
        }
        self.body.insert(0, new_head);
        new_head
    }

    /// Does `pos` hit the body behind the head?
    pub fn hits_body(&self, pos: Position) -> bool {
        self.body[1..].contains(&pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }
}

/// The full simulation state for one session. Owned by the controller and
/// handed to the engine by reference; nothing here is global.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_size: i32,
    pub score: u32,
    pub game_over: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, grid_size: i32) -> Self {
        Self {
            snake,
            food,
            grid_size,
            score: 0,
            game_over: false,
        }
    }

    /// Is `pos` inside the [0, N) x [0, N) field?
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.grid_size && pos.y >= 0 && pos.y < self.grid_size
    }

    /// Every cell not currently covered by the snake. Finite, so food
    /// placement can pick from it without ever looping.
    pub fn free_cells(&self) -> Vec<Position> {
        let total = (self.grid_size * self.grid_size) as usize;
        let mut cells = Vec::with_capacity(total.saturating_sub(self.snake.len()));
        for y in 0..self.grid_size {
            for x in 0..self.grid_size {
                let pos = Position::new(x, y);
                if !self.snake.occupies(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_steps_by_one_cell() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.step(Direction::Right), Position::new(6, 5));
        assert_eq!(pos.step(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.step(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.step(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn snake_trails_away_from_heading() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.body[2], Position::new(3, 5));
    }

    #[test]
    fn snake_length_is_at_least_one() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 0);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn advance_conserves_length_unless_growing() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));

        snake.advance(true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
    }

    #[test]
    fn steering_ignores_reversals() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 2);

        snake.steer(Direction::Left);
        assert_eq!(snake.direction, Direction::Right);

        snake.steer(Direction::Down);
        assert_eq!(snake.direction, Direction::Down);

        snake.steer(Direction::Up);
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn body_hit_excludes_the_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.hits_body(Position::new(5, 5)));
        assert!(snake.hits_body(Position::new(4, 5)));
        assert!(!snake.hits_body(Position::new(10, 10)));
    }

    #[test]
    fn bounds_cover_the_half_open_square() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 1),
            Position::new(10, 10),
            20,
        );

        assert!(state.in_bounds(Position::new(0, 0)));
        assert!(state.in_bounds(Position::new(19, 19)));
        assert!(!state.in_bounds(Position::new(-1, 0)));
        assert!(!state.in_bounds(Position::new(20, 0)));
        assert!(!state.in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn free_cells_exclude_the_snake() {
        let state = GameState::new(
            Snake::new(Position::new(1, 1), Direction::Right, 2),
            Position::new(0, 0),
            3,
        );

        let free = state.free_cells();
        assert_eq!(free.len(), 7);
        assert!(!free.contains(&Position::new(1, 1)));
        assert!(!free.contains(&Position::new(0, 1)));
    }
}
