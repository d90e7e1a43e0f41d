//! Position model representing one perpetual position in a clearinghouse state.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::PositionResponse;

/// Direction implied by the sign of the position size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
    Flat,
}

impl PositionSide {
    pub fn from_size(size: Decimal) -> Self {
        if size > Decimal::ZERO {
            PositionSide::Long
        } else if size < Decimal::ZERO {
            PositionSide::Short
        } else {
            PositionSide::Flat
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSide::Long => "LONG",
            PositionSide::Short => "SHORT",
            PositionSide::Flat => "FLAT",
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Margin mode and multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leverage {
    /// "cross" or "isolated"
    pub mode: String,
    pub value: u32,
}

impl Default for Leverage {
    fn default() -> Self {
        Self {
            mode: "cross".to_string(),
            value: 1,
        }
    }
}

/// Open (or flat) position held by an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Asset symbol, e.g. "BTC"
    pub coin: String,

    /// Signed size: positive is long, negative is short
    pub size: Decimal,

    /// Average entry price; the API sends null for some positions
    pub entry_price: Option<Decimal>,

    /// Notional value in USD
    #[serde(default)]
    pub position_value: Decimal,

    #[serde(default)]
    pub unrealized_pnl: Decimal,

    /// Liquidation price, absent when the account cannot be liquidated
    #[serde(default)]
    pub liquidation_price: Option<Decimal>,

    #[serde(default)]
    pub margin_used: Decimal,

    #[serde(default)]
    pub leverage: Leverage,

    /// Funding paid (negative) or received since the position was opened
    #[serde(default)]
    pub funding_since_open: Decimal,
}

impl Position {
    pub fn side(&self) -> PositionSide {
        PositionSide::from_size(self.size)
    }

    pub fn is_open(&self) -> bool {
        !self.size.is_zero()
    }

    /// Distance from `mark` to the liquidation price, in percent of `mark`.
    pub fn distance_to_liquidation_pct(&self, mark: Decimal) -> Option<Decimal> {
        let liq = self.liquidation_price?;
        if liq <= Decimal::ZERO || mark <= Decimal::ZERO {
            return None;
        }
        Some(((mark - liq) / mark).abs() * dec!(100))
    }
}

impl From<PositionResponse> for Position {
    fn from(p: PositionResponse) -> Self {
        let leverage = p
            .leverage
            .map(|l| Leverage {
                mode: l.leverage_type,
                value: l.value,
            })
            .unwrap_or_default();

        Self {
            coin: p.coin,
            size: p.szi,
            entry_price: p.entry_px,
            position_value: p.position_value,
            unrealized_pnl: p.unrealized_pnl,
            liquidation_price: p.liquidation_px,
            margin_used: p.margin_used,
            leverage,
            funding_since_open: p.cum_funding.map(|f| f.since_open).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
impl Position {
    pub fn new(coin: impl Into<String>, size: Decimal, entry_price: Decimal) -> Self {
        Self {
            coin: coin.into(),
            size,
            entry_price: Some(entry_price),
            position_value: (size * entry_price).abs(),
            unrealized_pnl: Decimal::ZERO,
            liquidation_price: None,
            margin_used: Decimal::ZERO,
            leverage: Leverage::default(),
            funding_since_open: Decimal::ZERO,
        }
    }
}
