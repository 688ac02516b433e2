use maze_chase::game::{Game, GameSettings, CLASSIC_GHOST_HOUSE, CLASSIC_PLAYER_HOME};
use maze_chase::statistics::Outcome;
use maze_chase::{Grid, SearchMode};

#[test]
fn autopilot_clears_the_classic_maze_without_ghosts() {
    for mode in [SearchMode::UniformCost, SearchMode::HeuristicGuided] {
        let grid = Grid::classic();
        let collectibles = grid.remaining_collectibles();
        let settings = GameSettings {
            mode,
            player_delay: 1,
            ..GameSettings::default()
        };
        let mut game = Game::new(grid, CLASSIC_PLAYER_HOME, &[], CLASSIC_GHOST_HOUSE, settings);

        assert_eq!(game.run(), Outcome::Won);
        let stats = game.statistics();
        assert_eq!(stats.dots_eaten + stats.pellets_eaten, collectibles);
        assert_eq!(game.grid().remaining_collectibles(), 0);
        assert!(stats.ticks < 5_000);
    }
}

#[test]
fn classic_game_always_terminates() {
    let settings = GameSettings {
        max_ticks: 3_000,
        toggle_every: Some(50),
        ..GameSettings::default()
    };
    let mut game = Game::classic(settings);
    let outcome = game.run();
    assert_ne!(outcome, Outcome::Running);
    assert!(game.statistics().ticks <= 3_000);
    assert!(game.timing().uniform_cost_calls > 0);
    assert!(game.timing().heuristic_calls > 0);
}

#[test]
fn ghosts_close_in_on_a_stationary_player() {
    let settings = GameSettings {
        player_delay: u32::MAX,
        ghost_delay: 1,
        lives: 1,
        ..GameSettings::default()
    };
    let mut game = Game::classic(settings);
    assert_eq!(game.run(), Outcome::Lost);
    assert_eq!(game.statistics().lives_lost, 1);
    assert!(game.statistics().ticks < 50);
}
