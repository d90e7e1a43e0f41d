//! Leaderboard row model: one ranked account from the stats endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::{LeaderboardRowResponse, WindowPerformanceResponse};
use crate::format::short_address;

/// Performance over one leaderboard window ("day", "week", "month", "allTime").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowPerformance {
    pub pnl: Decimal,
    pub roi: Decimal,
    /// Traded volume over the window
    pub vlm: Decimal,
}

/// A leaderboard row as consumed by the whale commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// Wallet address (0x-prefixed)
    pub address: String,

    /// Account value as reported by the leaderboard
    pub account_value: Decimal,

    /// Optional display name chosen by the account owner
    #[serde(default)]
    pub display_name: Option<String>,

    /// `(window label, performance)` pairs in the order the API sent them
    #[serde(default)]
    pub window_performances: Vec<(String, WindowPerformance)>,
}

impl LeaderboardRow {
    /// Display name, or a shortened address when none is set.
    pub fn display_name(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => short_address(&self.address),
        }
    }

    /// Whether the owner has set a non-empty display name.
    pub fn has_display_name(&self) -> bool {
        self.display_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }

    pub fn performance(&self, window: &str) -> Option<&WindowPerformance> {
        self.window_performances
            .iter()
            .find(|(label, _)| label == window)
            .map(|(_, perf)| perf)
    }
}

impl From<WindowPerformanceResponse> for WindowPerformance {
    fn from(p: WindowPerformanceResponse) -> Self {
        Self {
            pnl: p.pnl,
            roi: p.roi,
            vlm: p.vlm,
        }
    }
}

impl From<LeaderboardRowResponse> for LeaderboardRow {
    fn from(r: LeaderboardRowResponse) -> Self {
        Self {
            address: r.eth_address,
            account_value: r.account_value,
            display_name: r.display_name,
            window_performances: r
                .window_performances
                .into_iter()
                .map(|(label, perf)| (label, perf.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
impl LeaderboardRow {
    pub fn new(address: impl Into<String>, account_value: Decimal) -> Self {
        Self {
            address: address.into(),
            account_value,
            display_name: None,
            window_performances: Vec::new(),
        }
    }
}
