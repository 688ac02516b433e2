use crate::grid::Position;
use thiserror::Error;

/// Recoverable navigation outcomes. Neither aborts a tick: pursuers keep their
/// heading and the forager picks a new target.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("no path from {start} to {goal}")]
    Unreachable { start: Position, goal: Position },
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("maze layout has no cells")]
    Empty,
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown tile glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
    #[error("unknown tile code {code} at ({x}, {y})")]
    UnknownCode { code: u8, x: usize, y: usize },
}
