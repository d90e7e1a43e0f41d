//! Whale discovery: leaderboard filtering and per-account position views.

mod filter;
mod positions;

pub use filter::{filter_whales, DEFAULT_MIN_ACCOUNT_VALUE};
pub use positions::{open_positions, reconcile_account_value};
