use crate::algorithms::SearchMode;
use crate::game::GameSettings;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, value_enum, default_value_t = SearchMode::UniformCost)]
    pub mode: SearchMode,

    #[arg(long, default_value_t = 3)]
    pub lives: u32,

    /// Ticks between player steps.
    #[arg(long, default_value_t = 6)]
    pub player_delay: u32,

    /// Ticks between ghost steps.
    #[arg(long, default_value_t = 8)]
    pub ghost_delay: u32,

    #[arg(long, default_value_t = 420)]
    pub frightened_ticks: u32,

    #[arg(long, default_value_t = 120)]
    pub respawn_ticks: u32,

    #[arg(long, default_value_t = 18_000)]
    pub max_ticks: u64,

    /// Flip between dijkstra and a_star every N ticks.
    #[arg(long)]
    pub toggle_every: Option<u64>,

    #[arg(long, default_value_t = 16)]
    pub delay_ms: u64,

    /// Frames printed every N ticks when visualizing.
    #[arg(long, default_value_t = 6)]
    pub frame_every: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Print each ghost's full path to the player with every frame.
    #[arg(long, default_value_t = false)]
    pub debug_paths: bool,

    /// Compare both search modes on random mazes instead of playing.
    #[arg(long, default_value_t = false)]
    pub compare: bool,

    #[arg(long, default_value_t = 200)]
    pub trials: usize,

    #[arg(long, default_value_t = 20)]
    pub grid_size: usize,

    /// Chance of an interior wall in comparison mazes, within `0.0..=1.0`.
    #[arg(long, default_value_t = 0.25, value_parser = parse_density)]
    pub wall_density: f64,

    #[arg(long)]
    pub seed: Option<u64>,

    /// CSV file for comparison results.
    #[arg(long)]
    pub output_file: Option<String>,
}

fn parse_density(arg: &str) -> Result<f64, String> {
    let density: f64 = arg.parse().map_err(|err| format!("{err}"))?;
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(format!("{arg} is not a probability between 0 and 1"))
    }
}

impl Config {
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            mode: self.mode,
            lives: self.lives,
            player_delay: self.player_delay,
            ghost_delay: self.ghost_delay,
            frightened_ticks: self.frightened_ticks,
            respawn_ticks: self.respawn_ticks,
            max_ticks: self.max_ticks,
            toggle_every: self.toggle_every,
        }
    }
}
