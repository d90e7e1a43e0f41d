//! API response types for the Hyperliquid stats and info endpoints.
//!
//! Numeric fields arrive as JSON strings ("1234.5"); `Decimal` accepts both
//! strings and numbers.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Body of `GET /Mainnet/leaderboard`.
///
/// The endpoint has been seen returning both a bare list and an object with a
/// `leaderboardRows` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LeaderboardResponse {
    Wrapped {
        #[serde(rename = "leaderboardRows")]
        leaderboard_rows: Vec<LeaderboardRowResponse>,
    },
    List(Vec<LeaderboardRowResponse>),
}

impl LeaderboardResponse {
    pub fn into_rows(self) -> Vec<LeaderboardRowResponse> {
        match self {
            LeaderboardResponse::Wrapped { leaderboard_rows } => leaderboard_rows,
            LeaderboardResponse::List(rows) => rows,
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRowResponse {
    pub eth_address: String,
    #[serde(default)]
    pub account_value: Decimal,
    #[serde(default)]
    pub display_name: Option<String>,
    /// `[["day", {"pnl": .., "roi": .., "vlm": ..}], ...]`
    #[serde(default)]
    pub window_performances: Vec<(String, WindowPerformanceResponse)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowPerformanceResponse {
    #[serde(default)]
    pub pnl: Decimal,
    #[serde(default)]
    pub roi: Decimal,
    #[serde(default)]
    pub vlm: Decimal,
}

/// Body of `POST /info {"type": "clearinghouseState", "user": ..}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseStateResponse {
    #[serde(default)]
    pub margin_summary: Option<MarginSummaryResponse>,
    #[serde(default)]
    pub cross_margin_summary: Option<MarginSummaryResponse>,
    #[serde(default)]
    pub withdrawable: Option<Decimal>,
    #[serde(default)]
    pub asset_positions: Vec<AssetPositionResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummaryResponse {
    #[serde(default)]
    pub account_value: Decimal,
    #[serde(default)]
    pub total_ntl_pos: Decimal,
    #[serde(default)]
    pub total_raw_usd: Decimal,
    #[serde(default)]
    pub total_margin_used: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetPositionResponse {
    pub position: PositionResponse,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionResponse {
    pub coin: String,
    pub szi: Decimal,
    #[serde(default)]
    pub entry_px: Option<Decimal>,
    #[serde(default)]
    pub position_value: Decimal,
    #[serde(default)]
    pub unrealized_pnl: Decimal,
    #[serde(default)]
    pub liquidation_px: Option<Decimal>,
    #[serde(default)]
    pub margin_used: Decimal,
    #[serde(default)]
    pub leverage: Option<LeverageResponse>,
    #[serde(default)]
    pub cum_funding: Option<CumFundingResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageResponse {
    #[serde(rename = "type")]
    pub leverage_type: String,
    pub value: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumFundingResponse {
    #[serde(default)]
    pub since_open: Decimal,
}

/// Body of `POST /info {"type": "allMids"}`: coin -> mid price.
pub type AllMidsResponse = HashMap<String, Decimal>;

/// Body of `POST /info {"type": "meta"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaResponse {
    pub universe: Vec<AssetMetaResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetaResponse {
    pub name: String,
    #[serde(default)]
    pub sz_decimals: u32,
    #[serde(default)]
    pub max_leverage: u32,
    #[serde(default)]
    pub only_isolated: bool,
    #[serde(default)]
    pub is_delisted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ROW: &str = r#"{
        "ethAddress": "0x1111111111111111111111111111111111111111",
        "accountValue": "3150000.25",
        "windowPerformances": [
            ["day", {"pnl": "1200.5", "roi": "0.01", "vlm": "50000.0"}],
            ["allTime", {"pnl": "-42.0", "roi": "-0.002", "vlm": "9000000.0"}]
        ],
        "prize": 0,
        "displayName": null
    }"#;

    #[test]
    fn test_leaderboard_accepts_both_shapes() {
        let wrapped = format!(r#"{{"leaderboardRows": [{}]}}"#, ROW);
        let list = format!("[{}]", ROW);

        let a: LeaderboardResponse = serde_json::from_str(&wrapped).unwrap();
        let b: LeaderboardResponse = serde_json::from_str(&list).unwrap();

        let a = a.into_rows();
        let b = b.into_rows();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(a[0].eth_address, b[0].eth_address);
        assert_eq!(a[0].account_value, dec!(3150000.25));
        assert_eq!(a[0].window_performances.len(), 2);
        assert_eq!(a[0].window_performances[1].0, "allTime");
        assert_eq!(a[0].window_performances[1].1.pnl, dec!(-42.0));
        assert!(a[0].display_name.is_none());
    }

    #[test]
    fn test_clearinghouse_state_parses_positions() {
        let body = r#"{
            "marginSummary": {"accountValue": "2600000.0", "totalNtlPos": "1500000.0",
                              "totalRawUsd": "1100000.0", "totalMarginUsed": "75000.0"},
            "crossMarginSummary": {"accountValue": "2600000.0", "totalNtlPos": "1500000.0",
                                   "totalRawUsd": "1100000.0", "totalMarginUsed": "75000.0"},
            "crossMaintenanceMarginUsed": "20000.0",
            "withdrawable": "2500000.0",
            "assetPositions": [
                {"type": "oneWay", "position": {
                    "coin": "BTC", "szi": "-2.5", "entryPx": "65000.0",
                    "positionValue": "160000.0", "unrealizedPnl": "2500.0",
                    "returnOnEquity": "0.2", "liquidationPx": null,
                    "marginUsed": "8000.0", "maxLeverage": 40,
                    "leverage": {"type": "cross", "value": 20},
                    "cumFunding": {"allTime": "-10.0", "sinceOpen": "-3.5", "sinceChange": "-1.0"}
                }}
            ],
            "time": 1718000000000
        }"#;

        let state: ClearinghouseStateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(state.asset_positions.len(), 1);

        let pos = &state.asset_positions[0].position;
        assert_eq!(pos.coin, "BTC");
        assert_eq!(pos.szi, dec!(-2.5));
        assert_eq!(pos.entry_px, Some(dec!(65000.0)));
        assert!(pos.liquidation_px.is_none());
        assert_eq!(pos.leverage.as_ref().map(|l| l.value), Some(20));
        assert_eq!(
            state.margin_summary.map(|m| m.account_value),
            Some(dec!(2600000.0))
        );
    }

    #[test]
    fn test_all_mids_parses_string_prices() {
        let mids: AllMidsResponse =
            serde_json::from_str(r#"{"BTC": "64123.5", "ETH": "3100.25"}"#).unwrap();
        assert_eq!(mids.get("ETH"), Some(&dec!(3100.25)));
    }
}
