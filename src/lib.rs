//! Concurrent Conway's Game of Life (B3/S23) on a fixed, border-padded grid.

pub mod engine;
pub mod error;
pub mod grid;
pub mod pattern;
pub mod platform;

pub use engine::{BorderLife, BorderLifeConfig};
pub use error::LifeError;
pub use grid::Grid;
