//! Runtime configuration: endpoints, timeouts, and the whale threshold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::api::{INFO_API_BASE, STATS_API_BASE};
use crate::probe::SuiteContext;
use crate::whales::DEFAULT_MIN_ACCOUNT_VALUE;

/// Configuration shared by every subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Base URL of the info API (`POST <base>/info`)
    pub info_base_url: String,

    /// Base URL of the stats host serving the leaderboard
    pub stats_base_url: String,

    /// Timeout for inspection requests, in seconds
    pub request_timeout_secs: u64,

    /// Timeout for endpoint discovery probes, in seconds
    pub probe_timeout_secs: u64,

    /// Minimum leaderboard account value for a whale
    pub min_account_value: Decimal,
}

impl ProbeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Suite context probing `user` with this configuration.
    pub fn suite_context(&self, user: &str) -> SuiteContext {
        SuiteContext {
            info_base: self.info_base_url.clone(),
            stats_base: self.stats_base_url.clone(),
            user: user.to_string(),
            request_timeout: self.request_timeout(),
            probe_timeout: self.probe_timeout(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            info_base_url: INFO_API_BASE.to_string(),
            stats_base_url: STATS_API_BASE.to_string(),
            request_timeout_secs: 10,
            probe_timeout_secs: 5,
            min_account_value: DEFAULT_MIN_ACCOUNT_VALUE,
        }
    }
}
