use crate::grid::{Grid, Position};
use pathfinding::prelude::bfs_reach;

/// Breadth-first flood from `start` returning the first walkable cell that
/// satisfies `is_target`. `start` itself is tested first.
///
/// Neighbors are enqueued in [`crate::grid::Direction::ALL`] order, which fixes
/// the winner among equidistant candidates.
pub fn nearest_matching<P>(start: Position, grid: &Grid, is_target: P) -> Option<Position>
where
    P: Fn(Position) -> bool,
{
    if !grid.is_walkable(start) {
        return None;
    }
    bfs_reach(start, |pos| grid.neighbors(*pos)).find(|pos| is_target(*pos))
}

/// The closest dot or power pellet reachable from `start`.
pub fn find_nearest_collectible(start: Position, grid: &Grid) -> Option<Position> {
    nearest_matching(start, grid, |pos| grid.get(pos).is_some_and(|cell| cell.is_collectible()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equidistant_dots_resolve_by_expansion_order() {
        let grid = Grid::parse("#####\n# . #\n#.  #\n#####").unwrap();
        assert_eq!(find_nearest_collectible(Position::new(1, 1), &grid), Some(Position::new(2, 1)));

        // All three dots are two steps away; +x is expanded first.
        let grid = Grid::parse("#####\n#  .#\n# . #\n#.  #\n#####").unwrap();
        assert_eq!(find_nearest_collectible(Position::new(1, 1), &grid), Some(Position::new(3, 1)));
    }

    #[test]
    fn start_cell_counts() {
        let grid = Grid::parse("####\n#o.#\n####").unwrap();
        assert_eq!(find_nearest_collectible(Position::new(1, 1), &grid), Some(Position::new(1, 1)));
    }

    #[test]
    fn bonus_fruit_is_not_a_target() {
        let grid = Grid::parse("######\n# %  #\n######").unwrap();
        assert_eq!(find_nearest_collectible(Position::new(1, 1), &grid), None);
    }

    #[test]
    fn distance_is_measured_by_walking() {
        // (3,1) is two cells away across the wall but four by walking; (5,2) is five.
        let grid = Grid::parse("#######\n# #.  #\n#    .#\n#######").unwrap();
        assert_eq!(find_nearest_collectible(Position::new(1, 1), &grid), Some(Position::new(3, 1)));

        let grid = Grid::parse("#######\n# #.  #\n#  .  #\n#######").unwrap();
        assert_eq!(find_nearest_collectible(Position::new(1, 1), &grid), Some(Position::new(3, 2)));
    }

    #[test]
    fn nothing_from_outside_or_wall() {
        let grid = Grid::parse("###\n#.#\n###").unwrap();
        assert_eq!(find_nearest_collectible(Position::new(0, 0), &grid), None);
        assert_eq!(find_nearest_collectible(Position::new(5, 5), &grid), None);
    }
}
