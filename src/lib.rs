pub mod agent;
pub mod algorithms;
pub mod comparison;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod navigation;
pub mod simulation;
pub mod statistics;

pub use algorithms::SearchMode;
pub use error::{GridError, NavError};
pub use grid::{Cell, Direction, Grid, Position};
pub use navigation::{compute_path, compute_step, find_nearest_collectible};
