//! Account state: margin summaries and positions from `clearinghouseState`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::{ClearinghouseStateResponse, MarginSummaryResponse};

use super::position::Position;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarginSummary {
    pub account_value: Decimal,
    /// Total notional of open positions
    pub total_notional: Decimal,
    pub total_raw_usd: Decimal,
    pub total_margin_used: Decimal,
}

impl From<MarginSummaryResponse> for MarginSummary {
    fn from(m: MarginSummaryResponse) -> Self {
        Self {
            account_value: m.account_value,
            total_notional: m.total_ntl_pos,
            total_raw_usd: m.total_raw_usd,
            total_margin_used: m.total_margin_used,
        }
    }
}

/// Snapshot of an account's margin and positions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountState {
    pub margin_summary: Option<MarginSummary>,
    pub cross_margin_summary: Option<MarginSummary>,
    pub withdrawable: Option<Decimal>,
    /// Every asset position returned, including flat ones
    pub positions: Vec<Position>,
}

impl AccountState {
    /// Account value reported by the clearinghouse; `None` only when the
    /// margin summary is missing. A zero value is a real reading.
    pub fn account_value(&self) -> Option<Decimal> {
        self.margin_summary.as_ref().map(|m| m.account_value)
    }
}

impl From<ClearinghouseStateResponse> for AccountState {
    fn from(s: ClearinghouseStateResponse) -> Self {
        Self {
            margin_summary: s.margin_summary.map(Into::into),
            cross_margin_summary: s.cross_margin_summary.map(Into::into),
            withdrawable: s.withdrawable,
            positions: s
                .asset_positions
                .into_iter()
                .map(|ap| ap.position.into())
                .collect(),
        }
    }
}
