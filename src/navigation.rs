//! Entry points the game loop calls once per tick per agent.
//!
//! Every call borrows the grid for its duration and keeps nothing afterwards,
//! except the cached path held by a [`ForagePolicy`].

use crate::agent::AgentSnapshot;
use crate::algorithms::{reconstruct, search, SearchMode, SearchTree};
use crate::error::NavError;
use crate::grid::{Direction, Grid, Position};
use std::collections::VecDeque;
use tracing::{debug, warn};

pub use crate::algorithms::find_nearest_collectible;

fn checked_search(
    start: Position,
    goal: Position,
    grid: &Grid,
    mode: SearchMode,
) -> Result<SearchTree, NavError> {
    for pos in [start, goal] {
        if !grid.contains(pos) {
            return Err(NavError::OutOfBounds(pos));
        }
    }
    let tree = search(grid, start, goal, mode);
    if tree.reached {
        Ok(tree)
    } else {
        Err(NavError::Unreachable { start, goal })
    }
}

/// The first move from `agent` toward `target`. `Ok(None)` means the agent is
/// already there.
pub fn compute_step(
    agent: Position,
    target: Position,
    grid: &Grid,
    mode: SearchMode,
) -> Result<Option<Direction>, NavError> {
    let tree = checked_search(agent, target, grid, mode)?;
    Ok(reconstruct::first_step(&tree))
}

/// The shortest path `start..=goal`.
pub fn compute_path(
    start: Position,
    goal: Position,
    grid: &Grid,
    mode: SearchMode,
) -> Result<Vec<Position>, NavError> {
    let tree = checked_search(start, goal, grid, mode)?;
    reconstruct::full_path(&tree).ok_or(NavError::Unreachable { start, goal })
}

/// Pursuer heading for this tick. Keeps the previous heading whenever there is
/// no step to take.
pub fn chase_heading(pursuer: AgentSnapshot, target: Position, grid: &Grid, mode: SearchMode) -> Direction {
    match compute_step(pursuer.position, target, grid, mode) {
        Ok(Some(dir)) => dir,
        Ok(None) => pursuer.heading,
        Err(err) => {
            debug!(%err, "pursuer keeps heading");
            pursuer.heading
        }
    }
}

/// Autopilot that walks to the nearest collectible along a cached path.
#[derive(Debug, Clone, Default)]
pub struct ForagePolicy {
    target: Option<Position>,
    path: VecDeque<Position>,
    searches: u64,
}

impl ForagePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<Position> {
        self.target
    }

    /// Cells still to visit, current position excluded.
    pub fn path(&self) -> &VecDeque<Position> {
        &self.path
    }

    /// Path searches run so far. Ticks served from the cache don't count.
    pub fn searches(&self) -> u64 {
        self.searches
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.path.clear();
    }

    fn is_valid(&self, position: Position, grid: &Grid) -> bool {
        let target_live = self
            .target
            .and_then(|target| grid.get(target))
            .is_some_and(|cell| cell.is_collectible());
        let head_adjacent = self.path.front().is_some_and(|next| next.is_adjacent(position));
        target_live && head_adjacent
    }

    fn replan(&mut self, position: Position, grid: &Grid, mode: SearchMode) {
        self.clear();
        let Some(target) = find_nearest_collectible(position, grid) else {
            warn!(%position, "no reachable collectible left");
            return;
        };
        self.searches += 1;
        match compute_path(position, target, grid, mode) {
            Ok(path) => {
                self.path = path.into_iter().skip(1).collect();
                self.target = Some(target);
                debug!(%position, %target, steps = self.path.len(), %mode, "forager committed to target");
            }
            Err(err) => warn!(%err, "forager could not path to its target"),
        }
    }

    /// Heading for this tick from `position`, replanning first if the cached
    /// path is spent, stale, or its target has been eaten. `None` means stand
    /// still.
    pub fn next_heading(&mut self, position: Position, grid: &Grid, mode: SearchMode) -> Option<Direction> {
        if self.path.front() == Some(&position) {
            self.path.pop_front();
        }
        if !self.is_valid(position, grid) {
            self.replan(position, grid, mode);
        }
        let next = *self.path.front()?;
        Direction::between(position, next)
    }
}
