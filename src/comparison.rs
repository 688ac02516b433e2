use crate::algorithms::{reconstruct, search, SearchMode};
use crate::config::Config;
use crate::grid::{Grid, Position};
use pathfinding::prelude::bfs;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const MODES: [SearchMode; 2] = [SearchMode::UniformCost, SearchMode::HeuristicGuided];

#[derive(Debug, Clone)]
pub struct TrialResult {
    pub trial: usize,
    pub mode: SearchMode,
    pub start: Position,
    pub goal: Position,
    /// Cells in the returned path, endpoints included.
    pub path_len: Option<usize>,
    /// Cells in the breadth-first reference path.
    pub baseline_len: Option<usize>,
    pub expanded: usize,
    pub elapsed: Duration,
}

impl TrialResult {
    pub fn is_optimal(&self) -> bool {
        self.path_len == self.baseline_len
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModeSummary {
    pub runs: usize,
    pub reachable: usize,
    pub optimal: usize,
    pub total_expanded: usize,
    pub total_time: Duration,
}

impl ModeSummary {
    pub fn average_expanded(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.total_expanded as f64 / self.runs as f64
        }
    }

    pub fn average_time(&self) -> Duration {
        if self.runs == 0 {
            Duration::ZERO
        } else {
            self.total_time / self.runs as u32
        }
    }
}

/// Runs both search modes over the same seeded random mazes and checks each
/// path against a breadth-first reference.
pub struct Comparison {
    trials: usize,
    grid_size: usize,
    wall_density: f64,
    seed: u64,
    results: Vec<TrialResult>,
}

impl Comparison {
    pub fn new(config: &Config) -> Self {
        Comparison {
            trials: config.trials,
            grid_size: config.grid_size,
            wall_density: config.wall_density,
            seed: config.seed.unwrap_or_else(rand::random),
            results: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn results(&self) -> &[TrialResult] {
        &self.results
    }

    pub fn run(&mut self) -> &[TrialResult] {
        self.results.clear();
        let mut rng = StdRng::seed_from_u64(self.seed);

        for trial in 0..self.trials {
            let grid = Grid::random(self.grid_size, self.wall_density, &mut rng);
            let walkable: Vec<Position> = grid.walkable_positions().collect();
            if walkable.is_empty() {
                warn!(trial, "random maze has no open cells, skipping");
                continue;
            }
            let start = walkable[rng.gen_range(0..walkable.len())];
            let goal = walkable[rng.gen_range(0..walkable.len())];
            let baseline_len = bfs(&start, |p| grid.neighbors(*p).collect::<Vec<_>>(), |p| *p == goal)
                .map(|path| path.len());

            for mode in MODES {
                let started = Instant::now();
                let tree = search(&grid, start, goal, mode);
                let path = if tree.reached {
                    reconstruct::full_path(&tree)
                } else {
                    None
                };
                let elapsed = started.elapsed();

                let result = TrialResult {
                    trial,
                    mode,
                    start,
                    goal,
                    path_len: path.map(|p| p.len()),
                    baseline_len,
                    expanded: tree.expanded,
                    elapsed,
                };
                if !result.is_optimal() {
                    warn!(trial, %mode, %start, %goal, "path length differs from baseline");
                }
                self.results.push(result);
            }
            debug!(trial, %start, %goal, ?baseline_len, "trial complete");
        }
        &self.results
    }

    pub fn summary(&self) -> BTreeMap<&'static str, ModeSummary> {
        let mut summary: BTreeMap<&'static str, ModeSummary> = BTreeMap::new();
        for result in &self.results {
            let entry = summary.entry(result.mode.name()).or_default();
            entry.runs += 1;
            entry.reachable += usize::from(result.path_len.is_some());
            entry.optimal += usize::from(result.is_optimal());
            entry.total_expanded += result.expanded;
            entry.total_time += result.elapsed;
        }
        summary
    }

    /// Trials where the two modes returned paths of different length.
    pub fn disagreements(&self) -> usize {
        let mut by_trial: BTreeMap<usize, Vec<Option<usize>>> = BTreeMap::new();
        for result in &self.results {
            by_trial.entry(result.trial).or_default().push(result.path_len);
        }
        by_trial
            .values()
            .filter(|lens| lens.windows(2).any(|pair| pair[0] != pair[1]))
            .count()
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        writeln!(
            file,
            "trial,algorithm,start_x,start_y,goal_x,goal_y,path_len,baseline_len,expanded,elapsed_ns"
        )?;
        let fmt_len = |len: Option<usize>| len.map_or_else(String::new, |len| len.to_string());
        for r in &self.results {
            writeln!(
                file,
                "{},{},{},{},{},{},{},{},{},{}",
                r.trial,
                r.mode,
                r.start.x,
                r.start.y,
                r.goal.x,
                r.goal.y,
                fmt_len(r.path_len),
                fmt_len(r.baseline_len),
                r.expanded,
                r.elapsed.as_nanos()
            )?;
        }
        file.flush()
    }

    pub fn print_summary(&self) {
        println!("\n=== SEARCH MODE COMPARISON ===");
        println!(
            "Seed: {} | Trials: {} | Grid: {}x{} | Wall density: {:.2}",
            self.seed, self.trials, self.grid_size, self.grid_size, self.wall_density
        );
        println!();
        println!(
            "{:<10} {:<8} {:<10} {:<10} {:<14} {:<12}",
            "Algorithm", "Runs", "Reachable", "Optimal", "Avg Expanded", "Avg Time"
        );
        println!("{}", "-".repeat(66));
        for (name, s) in self.summary() {
            println!(
                "{:<10} {:<8} {:<10} {:<10} {:<14.1} {:<12}",
                name,
                s.runs,
                s.reachable,
                s.optimal,
                s.average_expanded(),
                format!("{:.2?}", s.average_time())
            );
        }
        println!();
        match self.disagreements() {
            0 => println!("Both modes agreed on every path length."),
            n => println!("Modes disagreed on {} trials.", n),
        }
    }
}
