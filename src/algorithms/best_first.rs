use crate::algorithms::common::SearchMode;
use crate::grid::{Grid, Position};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

/// A frontier entry. `seq` is the insertion counter that breaks priority ties
/// first-in first-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    priority: u32,
    cost: u32,
    seq: u64,
    position: Position,
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap pops the lowest priority, oldest entry first.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// What a search leaves behind: the predecessor map rooted at `start`.
#[derive(Debug, Clone)]
pub struct SearchTree {
    pub start: Position,
    pub goal: Position,
    /// Whether `goal` was popped before the frontier ran dry.
    pub reached: bool,
    /// Number of nodes popped and expanded.
    pub expanded: usize,
    predecessors: FxHashMap<Position, Position>,
    costs: FxHashMap<Position, u32>,
}

impl SearchTree {
    pub fn predecessor(&self, pos: Position) -> Option<Position> {
        self.predecessors.get(&pos).copied()
    }

    /// Best known cost from `start`. `None` is infinity.
    pub fn cost(&self, pos: Position) -> Option<u32> {
        self.costs.get(&pos).copied()
    }
}

/// Best-first search over the walkable cells of `grid`.
///
/// `priority(cost, node)` orders the frontier. Expansion stops as soon as `goal`
/// is popped, so only the path to `goal` is guaranteed optimal. A non-walkable
/// `start` is never expanded.
pub fn best_first_search<F>(grid: &Grid, start: Position, goal: Position, priority: F) -> SearchTree
where
    F: Fn(u32, Position) -> u32,
{
    let mut tree = SearchTree {
        start,
        goal,
        reached: false,
        expanded: 0,
        predecessors: FxHashMap::default(),
        costs: FxHashMap::default(),
    };
    if !grid.is_walkable(start) {
        return tree;
    }

    let mut seq = 0u64;
    let mut frontier = BinaryHeap::new();
    tree.costs.insert(start, 0);
    frontier.push(Frontier {
        priority: priority(0, start),
        cost: 0,
        seq,
        position: start,
    });

    while let Some(Frontier { cost, position, .. }) = frontier.pop() {
        if position == goal {
            tree.reached = true;
            break;
        }
        if tree.costs.get(&position).is_some_and(|&best| cost > best) {
            continue;
        }
        tree.expanded += 1;

        for next in grid.neighbors(position) {
            let candidate = cost + 1;
            if tree.costs.get(&next).map_or(true, |&best| candidate < best) {
                tree.costs.insert(next, candidate);
                tree.predecessors.insert(next, position);
                seq += 1;
                frontier.push(Frontier {
                    priority: priority(candidate, next),
                    cost: candidate,
                    seq,
                    position: next,
                });
            }
        }
    }

    trace!(
        %start,
        %goal,
        reached = tree.reached,
        expanded = tree.expanded,
        "best-first search finished"
    );
    tree
}

/// Runs [`best_first_search`] with the priority `mode` prescribes.
pub fn search(grid: &Grid, start: Position, goal: Position, mode: SearchMode) -> SearchTree {
    best_first_search(grid, start, goal, |cost, node| mode.priority(cost, node, goal))
}
