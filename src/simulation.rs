use crate::config::Config;
use crate::game::Game;
use crate::grid::Position;
use crate::statistics::{Outcome, Statistics, TimingData};
use std::thread;
use std::time::Duration;

/// Drives a [`Game`] to completion, printing frames to the terminal when
/// visualization is on.
pub struct Simulation {
    game: Game,
    config: Config,
}

impl Simulation {
    pub fn new(config: Config) -> Self {
        let game = Game::classic(config.game_settings());
        Simulation { game, config }
    }

    /// Drives a prepared game (custom maze or settings) instead of the classic one.
    pub fn with_game(config: Config, game: Game) -> Self {
        Simulation { game, config }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    fn visualize(&self) -> bool {
        !self.config.no_visualization && !self.config.quiet
    }

    pub fn run(&mut self) -> (Statistics, TimingData) {
        if self.visualize() {
            self.print_frame();
        }

        let frame_every = self.config.frame_every.max(1);
        loop {
            let outcome = self.game.step();
            let tick = self.game.statistics().ticks;
            if self.visualize() && (tick % frame_every == 0 || outcome != Outcome::Running) {
                self.print_frame();
                thread::sleep(Duration::from_millis(self.config.delay_ms));
            }
            if outcome != Outcome::Running {
                break;
            }
        }

        (self.game.statistics().clone(), self.game.timing().clone())
    }

    fn print_frame(&self) {
        self.clear_screen();
        let game = &self.game;
        let stats = game.statistics();
        println!("=== MAZE CHASE ===");
        println!(
            "Algorithm: {} | Tick: {} | Score: {} | Lives: {} | Left: {}",
            game.mode(),
            stats.ticks,
            stats.score,
            game.lives(),
            game.grid().remaining_collectibles()
        );
        if let Some(target) = game.forager().target() {
            println!(
                "Autopilot target: {} ({} steps cached)",
                target,
                game.forager().path().len()
            );
        }

        let mut agents: Vec<(Position, char)> = Vec::new();
        if self.config.debug_paths {
            for (i, path) in game.ghost_paths().into_iter().enumerate() {
                match path {
                    Some(path) => {
                        println!("Ghost {} path: {} cells", i + 1, path.len());
                        agents.extend(path.into_iter().map(|pos| (pos, '*')));
                    }
                    None => println!("Ghost {} path: none", i + 1),
                }
            }
        }
        for (i, ghost) in game.ghosts().iter().enumerate() {
            if ghost.is_respawning() {
                continue;
            }
            let glyph = if ghost.is_frightened() {
                'f'
            } else {
                char::from_digit(i as u32 + 1, 10).unwrap_or('G')
            };
            agents.push((ghost.agent.position, glyph));
        }
        agents.push((game.player().position, 'C'));
        game.grid().print_grid(&agents);
    }

    fn clear_screen(&self) {
        print!("\x1B[2J\x1B[1;1H");
    }
}
