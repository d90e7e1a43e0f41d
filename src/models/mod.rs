//! Data models for leaderboard rows, account state, and positions.

mod account;
mod leaderboard;
mod position;

pub use account::{AccountState, MarginSummary};
pub use leaderboard::{LeaderboardRow, WindowPerformance};
pub use position::Position;
