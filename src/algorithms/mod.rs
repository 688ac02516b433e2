pub mod best_first;
pub mod common;
pub mod nearest;
pub mod reconstruct;

pub use best_first::{best_first_search, search, SearchTree};
pub use common::SearchMode;
pub use nearest::{find_nearest_collectible, nearest_matching};
