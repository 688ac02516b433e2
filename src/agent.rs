use crate::grid::{Direction, Grid, Position};

/// Read-only view of an agent handed to the navigation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSnapshot {
    pub position: Position,
    pub heading: Direction,
}

/// A moving entity owned by the game loop.
#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Position,
    pub heading: Direction,
    pub home: Position,
    move_delay: u32,
    move_counter: u32,
}

impl Agent {
    /// `move_delay` is the number of ticks per step; zero is treated as one.
    pub fn new(home: Position, move_delay: u32) -> Self {
        Agent {
            position: home,
            heading: Direction::NONE,
            home,
            move_delay: move_delay.max(1),
            move_counter: 0,
        }
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            position: self.position,
            heading: self.heading,
        }
    }

    /// Steps one cell along the current heading unless that cell is a wall.
    pub fn step(&mut self, grid: &Grid) -> bool {
        if self.heading.is_none() {
            return false;
        }
        let next = self.position.offset(self.heading);
        if grid.is_walkable(next) {
            self.position = next;
            true
        } else {
            false
        }
    }

    /// Counts a tick and steps once every `move_delay` ticks.
    pub fn step_with_delay(&mut self, grid: &Grid) -> bool {
        self.move_counter += 1;
        if self.move_counter >= self.move_delay {
            self.move_counter = 0;
            self.step(grid)
        } else {
            false
        }
    }

    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    /// Back to the spawn cell, standing still.
    pub fn reset(&mut self) {
        self.position = self.home;
        self.heading = Direction::NONE;
        self.move_counter = 0;
    }
}
