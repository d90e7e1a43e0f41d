//! Hyperliquid API clients for the stats (leaderboard) and info endpoints.

mod error;
mod info_client;
mod request;
mod stats_client;
mod types;

pub use error::ApiError;
pub use info_client::{InfoClient, INFO_API_BASE};
pub use request::send;
pub use stats_client::{StatsClient, STATS_API_BASE};
pub use types::*;
