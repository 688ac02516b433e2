use crate::agent::Agent;
use crate::algorithms::SearchMode;
use crate::grid::{Cell, Grid, Position};
use crate::navigation::{chase_heading, compute_path, ForagePolicy};
use crate::statistics::{Outcome, Statistics, TimingData};
use std::time::Instant;
use tracing::info;

pub const DOT_POINTS: u32 = 10;
pub const PELLET_POINTS: u32 = 50;
pub const BONUS_POINTS: u32 = 100;
pub const GHOST_POINTS: u32 = 200;

/// Spawn cells on the classic layout. All of them are walkable and connected.
pub const CLASSIC_PLAYER_HOME: Position = Position::new(7, 9);
pub const CLASSIC_GHOST_HOMES: [Position; 4] = [
    Position::new(6, 5),
    Position::new(7, 5),
    Position::new(8, 5),
    Position::new(8, 6),
];
pub const CLASSIC_GHOST_HOUSE: Position = Position::new(7, 7);

/// Tick budgets. Timer defaults assume 60 ticks per second.
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub mode: SearchMode,
    pub lives: u32,
    pub player_delay: u32,
    pub ghost_delay: u32,
    pub frightened_ticks: u32,
    pub respawn_ticks: u32,
    pub max_ticks: u64,
    /// Flip the search mode every this many ticks.
    pub toggle_every: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            mode: SearchMode::UniformCost,
            lives: 3,
            player_delay: 6,
            ghost_delay: 8,
            frightened_ticks: 60 * 7,
            respawn_ticks: 60 * 2,
            max_ticks: 60 * 60 * 5,
            toggle_every: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ghost {
    pub agent: Agent,
    pub frightened_timer: u32,
    pub respawn_timer: u32,
}

impl Ghost {
    fn new(home: Position, move_delay: u32) -> Self {
        Ghost {
            agent: Agent::new(home, move_delay),
            frightened_timer: 0,
            respawn_timer: 0,
        }
    }

    pub fn is_frightened(&self) -> bool {
        self.frightened_timer > 0
    }

    pub fn is_respawning(&self) -> bool {
        self.respawn_timer > 0
    }
}

/// Headless maze-chase loop: an autopilot player forages while ghosts chase it.
pub struct Game {
    grid: Grid,
    player: Agent,
    forager: ForagePolicy,
    ghosts: Vec<Ghost>,
    ghost_house: Position,
    mode: SearchMode,
    lives: u32,
    settings: GameSettings,
    stats: Statistics,
    timing: TimingData,
}

impl Game {
    pub fn new(
        grid: Grid,
        player_home: Position,
        ghost_homes: &[Position],
        ghost_house: Position,
        settings: GameSettings,
    ) -> Self {
        let ghosts = ghost_homes
            .iter()
            .map(|&home| Ghost::new(home, settings.ghost_delay))
            .collect();
        Game {
            grid,
            player: Agent::new(player_home, settings.player_delay),
            forager: ForagePolicy::new(),
            ghosts,
            ghost_house,
            mode: settings.mode,
            lives: settings.lives,
            settings,
            stats: Statistics::new(),
            timing: TimingData::new(),
        }
    }

    pub fn classic(settings: GameSettings) -> Self {
        Self::new(
            Grid::classic(),
            CLASSIC_PLAYER_HOME,
            &CLASSIC_GHOST_HOMES,
            CLASSIC_GHOST_HOUSE,
            settings,
        )
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Agent {
        &self.player
    }

    pub fn forager(&self) -> &ForagePolicy {
        &self.forager
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn outcome(&self) -> Outcome {
        self.stats.outcome
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn timing(&self) -> &TimingData {
        &self.timing
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.stats.mode_toggles += 1;
        info!(mode = %self.mode, "search mode toggled");
    }

    /// Full path from every active ghost to the player, for debugging.
    pub fn ghost_paths(&self) -> Vec<Option<Vec<Position>>> {
        self.ghosts
            .iter()
            .map(|ghost| {
                if ghost.is_respawning() {
                    return None;
                }
                compute_path(ghost.agent.position, self.player.position, &self.grid, self.mode).ok()
            })
            .collect()
    }

    /// Advances one tick.
    pub fn step(&mut self) -> Outcome {
        if self.stats.outcome != Outcome::Running {
            return self.stats.outcome;
        }

        if let Some(every) = self.settings.toggle_every.filter(|&every| every > 0) {
            if self.stats.ticks > 0 && self.stats.ticks % every == 0 {
                self.toggle_mode();
            }
        }

        self.move_player();
        self.eat();
        self.move_ghosts();

        self.stats.ticks += 1;
        if self.stats.outcome == Outcome::Running {
            if self.grid.remaining_collectibles() == 0 {
                self.stats.outcome = Outcome::Won;
                info!(score = self.stats.score, ticks = self.stats.ticks, "maze cleared");
            } else if self.stats.ticks >= self.settings.max_ticks {
                self.stats.outcome = Outcome::TimedOut;
            }
        }
        self.stats.outcome
    }

    /// Runs until the game ends.
    pub fn run(&mut self) -> Outcome {
        while self.step() == Outcome::Running {}
        self.stats.outcome
    }

    fn move_player(&mut self) {
        let searches = self.forager.searches();
        let started = Instant::now();
        let heading = self.forager.next_heading(self.player.position, &self.grid, self.mode);
        if self.forager.searches() > searches {
            self.timing.record_forage(self.mode, started.elapsed());
        }

        if let Some(heading) = heading {
            self.player.heading = heading;
            if self.player.step_with_delay(&self.grid) {
                self.stats.player_moves += 1;
            }
        }
    }

    fn eat(&mut self) {
        match self.grid.consume(self.player.position) {
            Some(Cell::Dot) => {
                self.stats.score += DOT_POINTS;
                self.stats.dots_eaten += 1;
            }
            Some(Cell::PowerPellet) => {
                self.stats.score += PELLET_POINTS;
                self.stats.pellets_eaten += 1;
                for ghost in &mut self.ghosts {
                    ghost.frightened_timer = self.settings.frightened_ticks;
                }
            }
            Some(Cell::Bonus) => {
                self.stats.score += BONUS_POINTS;
                self.stats.bonuses_eaten += 1;
            }
            Some(Cell::Wall | Cell::Empty) | None => {}
        }
    }

    fn move_ghosts(&mut self) {
        let mut caught = false;
        for ghost in &mut self.ghosts {
            if ghost.is_respawning() {
                ghost.respawn_timer -= 1;
                continue;
            }

            if ghost.is_frightened() {
                ghost.frightened_timer -= 1;
            } else {
                let started = Instant::now();
                ghost.agent.heading =
                    chase_heading(ghost.agent.snapshot(), self.player.position, &self.grid, self.mode);
                self.timing.record_chase(self.mode, started.elapsed());
            }
            ghost.agent.step_with_delay(&self.grid);

            if ghost.agent.position != self.player.position {
                continue;
            }
            if ghost.is_frightened() {
                self.stats.score += GHOST_POINTS;
                self.stats.ghosts_eaten += 1;
                ghost.agent.move_to(self.ghost_house);
                ghost.agent.heading = Default::default();
                ghost.frightened_timer = 0;
                ghost.respawn_timer = self.settings.respawn_ticks;
            } else {
                caught = true;
                break;
            }
        }

        if caught {
            self.lose_life();
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.stats.lives_lost += 1;
        info!(lives = self.lives, tick = self.stats.ticks, "player caught");
        if self.lives == 0 {
            self.stats.outcome = Outcome::Lost;
            return;
        }
        self.player.reset();
        self.forager.clear();
        for ghost in &mut self.ghosts {
            ghost.agent.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    fn quick() -> GameSettings {
        GameSettings {
            player_delay: 1,
            ghost_delay: 1,
            ..GameSettings::default()
        }
    }

    #[test]
    fn player_clears_a_ghostless_corridor() {
        let grid = Grid::parse("#######\n#.. .o#\n#######").unwrap();
        let mut game = Game::new(grid, Position::new(1, 1), &[], Position::new(1, 1), quick());
        assert_eq!(game.run(), Outcome::Won);
        let stats = game.statistics();
        assert_eq!(stats.dots_eaten, 3);
        assert_eq!(stats.pellets_eaten, 1);
        assert_eq!(stats.score, 3 * DOT_POINTS + PELLET_POINTS);
        assert_eq!(stats.player_moves, 4);
    }

    #[test]
    fn forage_timing_counts_searches_not_ticks() {
        let grid = Grid::parse("#######\n#.. .o#\n#######").unwrap();
        let mut game = Game::new(grid, Position::new(1, 1), &[], Position::new(1, 1), quick());
        game.run();
        // (1,1), (2,1), (4,1) via (3,1), then (5,1); the step onto (4,1) uses the cache.
        assert_eq!(game.timing().forage_times.len(), 4);
        assert_eq!(game.forager().searches(), 4);
        assert_eq!(game.timing().total_calls(), 4);
        assert!((game.timing().forage_times.len() as u64) < game.statistics().ticks);
    }

    #[test]
    fn ghost_catches_player_and_costs_a_life() {
        let grid = Grid::parse("########\n#     .#\n########").unwrap();
        let settings = GameSettings {
            lives: 2,
            player_delay: 100,
            ..quick()
        };
        let mut game = Game::new(grid, Position::new(1, 1), &[Position::new(4, 1)], Position::new(4, 1), settings);
        let mut ticks = 0;
        while game.lives() == 2 && ticks < 10 {
            game.step();
            ticks += 1;
        }
        assert_eq!(game.lives(), 1);
        assert_eq!(game.player().position, Position::new(1, 1));
        assert_eq!(game.ghosts()[0].agent.position, Position::new(4, 1));
        assert_eq!(game.ghosts()[0].agent.heading, Direction::NONE);
    }

    #[test]
    fn last_life_ends_the_game() {
        let grid = Grid::parse("######\n#   .#\n######").unwrap();
        let settings = GameSettings {
            lives: 1,
            player_delay: 100,
            ..quick()
        };
        let mut game = Game::new(grid, Position::new(1, 1), &[Position::new(2, 1)], Position::new(2, 1), settings);
        assert_eq!(game.step(), Outcome::Lost);
        assert_eq!(game.step(), Outcome::Lost);
        assert_eq!(game.statistics().lives_lost, 1);
    }

    #[test]
    fn power_pellet_frightens_and_ghost_is_eaten() {
        // Player eats the pellet on its first step; the ghost then walks into it.
        let grid = Grid::parse("#######\n#o   .#\n#######").unwrap();
        let settings = GameSettings {
            player_delay: 100,
            respawn_ticks: 5,
            ..quick()
        };
        let mut game = Game::new(
            grid,
            Position::new(1, 1),
            &[Position::new(2, 1)],
            Position::new(4, 1),
            settings,
        );
        game.step();
        assert_eq!(game.statistics().pellets_eaten, 1);
        assert!(game.ghosts()[0].is_frightened());

        // Frightened ghosts keep their heading; this one has none, so walk it in.
        assert_eq!(game.ghosts()[0].agent.heading, Direction::NONE);
        game.ghosts[0].agent.heading = Direction::LEFT;
        game.step();
        assert_eq!(game.statistics().ghosts_eaten, 1);
        assert_eq!(game.score(), PELLET_POINTS + GHOST_POINTS);
        let ghost = &game.ghosts()[0];
        assert!(ghost.is_respawning());
        assert!(!ghost.is_frightened());
        assert_eq!(ghost.agent.position, Position::new(4, 1));
    }

    #[test]
    fn mode_toggles_on_schedule() {
        let settings = GameSettings {
            toggle_every: Some(2),
            max_ticks: 5,
            ..quick()
        };
        let mut game = Game::classic(settings);
        assert_eq!(game.mode(), SearchMode::UniformCost);
        game.step();
        game.step();
        assert_eq!(game.mode(), SearchMode::UniformCost);
        game.step();
        assert_eq!(game.mode(), SearchMode::HeuristicGuided);
        assert_eq!(game.run(), Outcome::TimedOut);
        assert_eq!(game.statistics().mode_toggles, 2);
    }

    #[test]
    fn ghost_paths_lead_to_player() {
        let game = Game::classic(GameSettings::default());
        let paths = game.ghost_paths();
        assert_eq!(paths.len(), 4);
        for (path, ghost) in paths.iter().zip(game.ghosts()) {
            let path = path.as_ref().unwrap();
            assert_eq!(path.first(), Some(&ghost.agent.position));
            assert_eq!(path.last(), Some(&CLASSIC_PLAYER_HOME));
        }
    }
}
