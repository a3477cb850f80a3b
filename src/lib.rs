//! Classic single-screen snake for the terminal.
//!
//! The crate splits along the seams the game naturally has:
//! - [`game`] — the pure simulation core (grid, snake, food, per-tick step)
//! - [`app`] — the controller that owns the state and the event loop
//! - [`render`] / [`input`] — ratatui drawing and key translation
//! - [`score`] — the one persisted value, the best score across runs
//! - [`audio`] / [`metrics`] — best-effort sound cues and session stats

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
pub mod score;
