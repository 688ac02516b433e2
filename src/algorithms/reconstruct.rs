use crate::algorithms::best_first::SearchTree;
use crate::grid::{Direction, Position};

/// The first edge of the path from `tree.start` to `tree.goal`.
///
/// `None` means no movement: the goal is the start, or it was never reached.
pub fn first_step(tree: &SearchTree) -> Option<Direction> {
    if tree.goal == tree.start {
        return None;
    }
    let mut current = tree.goal;
    loop {
        let prev = tree.predecessor(current)?;
        if prev == tree.start {
            return Direction::between(prev, current);
        }
        current = prev;
    }
}

/// The full path `start..=goal`, or `None` if the walk back from the goal does
/// not end at the start.
pub fn full_path(tree: &SearchTree) -> Option<Vec<Position>> {
    let mut path = vec![tree.goal];
    let mut current = tree.goal;
    while current != tree.start {
        current = tree.predecessor(current)?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}
