//! The simulation core: grid, snake, food and the per-tick transition.
//!
//! Nothing in here touches a terminal, a file or a clock; the controller
//! owns the state and drives the engine, collaborators read snapshots.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEnd, GameEngine, StepResult};
pub use state::{GameState, Position, Snake};
