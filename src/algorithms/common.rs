use crate::grid::Position;
use clap::ValueEnum;
use std::fmt;

/// Which priority the best-first search orders its frontier by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum SearchMode {
    /// Dijkstra: priority is the accumulated cost.
    #[default]
    UniformCost,
    /// A*: accumulated cost plus Manhattan distance to the goal.
    HeuristicGuided,
}

impl SearchMode {
    pub fn priority(self, cost: u32, node: Position, goal: Position) -> u32 {
        match self {
            SearchMode::UniformCost => cost,
            SearchMode::HeuristicGuided => cost.saturating_add(node.manhattan(goal)),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SearchMode::UniformCost => SearchMode::HeuristicGuided,
            SearchMode::HeuristicGuided => SearchMode::UniformCost,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SearchMode::UniformCost => "dijkstra",
            SearchMode::HeuristicGuided => "a_star",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
