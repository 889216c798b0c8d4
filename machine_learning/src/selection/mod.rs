mod grid_search;
mod kfold;
mod leaderboard;

pub use grid_search::{CvResult, GridSearch, GridSearchResult};
pub use kfold::{Fold, KFold};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
