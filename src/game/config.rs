use serde::{Deserialize, Serialize};

/// Per-session game settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid, in cells.
    pub grid_size: i32,
    /// How many cells the snake starts with.
    pub initial_snake_length: usize,
    /// Milliseconds between simulation ticks.
    pub tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 1,
            tick_ms: 100,
        }
    }
}

impl GameConfig {
    pub fn new(grid_size: i32) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// A small grid, handy in tests.
    #[cfg(test)]
    pub fn small() -> Self {
        Self::new(10)
    }
}
