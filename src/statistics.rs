use crate::algorithms::SearchMode;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Won,
    Lost,
    TimedOut,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Running => "running",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
            Outcome::TimedOut => "timed out",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone)]
pub struct Statistics {
    pub ticks: u64,
    pub score: u32,
    pub dots_eaten: usize,
    pub pellets_eaten: usize,
    pub bonuses_eaten: usize,
    pub ghosts_eaten: usize,
    pub lives_lost: u32,
    pub player_moves: usize,
    pub mode_toggles: usize,
    pub outcome: Outcome,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics {
            ticks: 0,
            score: 0,
            dots_eaten: 0,
            pellets_eaten: 0,
            bonuses_eaten: 0,
            ghosts_eaten: 0,
            lives_lost: 0,
            player_moves: 0,
            mode_toggles: 0,
            outcome: Outcome::Running,
        }
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outcome: {}", self.outcome)?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "Player Moves: {}", self.player_moves)?;
        writeln!(
            f,
            "Eaten: {} dots, {} power pellets, {} bonus, {} ghosts",
            self.dots_eaten, self.pellets_eaten, self.bonuses_eaten, self.ghosts_eaten
        )?;
        writeln!(f, "Lives Lost: {}", self.lives_lost)?;
        if self.mode_toggles > 0 {
            writeln!(f, "Mode Toggles: {}", self.mode_toggles)?;
        }
        Ok(())
    }
}

/// Wall-clock time spent in search calls, split by caller and by mode.
#[derive(Debug, Clone, Default)]
pub struct TimingData {
    pub chase_times: Vec<Duration>,
    pub forage_times: Vec<Duration>,
    pub uniform_cost_calls: usize,
    pub heuristic_calls: usize,
}

impl TimingData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_chase(&mut self, mode: SearchMode, elapsed: Duration) {
        self.chase_times.push(elapsed);
        self.count(mode);
    }

    pub fn record_forage(&mut self, mode: SearchMode, elapsed: Duration) {
        self.forage_times.push(elapsed);
        self.count(mode);
    }

    fn count(&mut self, mode: SearchMode) {
        match mode {
            SearchMode::UniformCost => self.uniform_cost_calls += 1,
            SearchMode::HeuristicGuided => self.heuristic_calls += 1,
        }
    }

    fn average(times: &[Duration]) -> Duration {
        if times.is_empty() {
            Duration::from_nanos(0)
        } else {
            let total: Duration = times.iter().sum();
            total / times.len() as u32
        }
    }

    pub fn average_chase_time(&self) -> Duration {
        Self::average(&self.chase_times)
    }

    pub fn average_forage_time(&self) -> Duration {
        Self::average(&self.forage_times)
    }

    pub fn total_calls(&self) -> usize {
        self.chase_times.len() + self.forage_times.len()
    }
}

impl fmt::Display for TimingData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_calls();
        let share = |calls: usize| {
            if total > 0 {
                (calls as f64 / total as f64) * 100.0
            } else {
                0.0
            }
        };
        writeln!(f, "Total navigation calls: {}", total)?;
        writeln!(
            f,
            "Dijkstra: {} calls ({:.1}%) | A*: {} calls ({:.1}%)",
            self.uniform_cost_calls,
            share(self.uniform_cost_calls),
            self.heuristic_calls,
            share(self.heuristic_calls)
        )?;
        writeln!(f, "Average chase time: {:.2?}", self.average_chase_time())?;
        writeln!(f, "Average forage time: {:.2?}", self.average_forage_time())?;
        Ok(())
    }
}
