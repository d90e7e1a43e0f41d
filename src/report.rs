//! Console report helpers: JSON previews and one-line position summaries.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::format::{truncate, usd};
use crate::models::{LeaderboardRow, MarginSummary, Position, WindowPerformance};

/// Characters shown for a non-list top-level field of a JSON object.
pub const FIELD_PREVIEW: usize = 200;

pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Read a decimal from a JSON string or number.
pub fn decimal_field(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .ok(),
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        _ => None,
    }
}

/// Rows of a leaderboard body, whichever of its two shapes it has.
pub fn leaderboard_rows(data: &Value) -> &[Value] {
    match data {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("leaderboardRows")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

fn first_keys(items: &[Value]) -> Option<Vec<&String>> {
    items
        .first()
        .and_then(Value::as_object)
        .map(|obj| obj.keys().collect())
}

/// Describe each top-level field: lists by length and the keys of their first
/// item, everything else as a truncated preview. Rows themselves are left to
/// the caller so they are printed once.
pub fn describe_fields(data: &Value) -> Vec<String> {
    match data {
        Value::Array(items) => {
            let mut lines = vec![format!("Total entries: {}", items.len())];
            if let Some(keys) = first_keys(items) {
                lines.push(format!("First entry keys: {:?}", keys));
            }
            lines
        }
        Value::Object(map) => {
            let keys: Vec<&String> = map.keys().collect();
            let mut lines = vec![format!("Dict keys: {:?}", keys)];
            for (key, value) in map {
                match value.as_array() {
                    Some(items) if !items.is_empty() => lines.push(match first_keys(items) {
                        Some(keys) => format!(
                            "{} (list of {}), first item keys: {:?}",
                            key,
                            items.len(),
                            keys
                        ),
                        None => format!("{} (list of {})", key, items.len()),
                    }),
                    _ => lines.push(format!(
                        "{}: {}",
                        key,
                        truncate(&value.to_string(), FIELD_PREVIEW)
                    )),
                }
            }
            lines
        }
        other => vec![truncate(&other.to_string(), FIELD_PREVIEW)],
    }
}

/// Raw `assetPositions` entries whose `position.szi` is non-zero.
pub fn open_raw_positions(state: &Value) -> Vec<&Value> {
    state
        .get("assetPositions")
        .and_then(Value::as_array)
        .map(|positions| {
            positions
                .iter()
                .filter(|p| {
                    p.get("position")
                        .and_then(|pos| pos.get("szi"))
                        .and_then(decimal_field)
                        .is_some_and(|size| !size.is_zero())
                })
                .collect()
        })
        .unwrap_or_default()
}

/// `BTC LONG @ $65,000.00 | PnL: $2,500 | 20x cross | liq dist: 12.5%`
///
/// `mark` falls back to the entry price when no mid is known.
pub fn position_line(position: &Position, mark: Option<Decimal>) -> String {
    let entry = position
        .entry_price
        .map(|px| usd(px, 2))
        .unwrap_or_else(|| "n/a".to_string());

    let mut line = format!(
        "{} {} @ {} | PnL: {} | {}x {}",
        position.coin,
        position.side(),
        entry,
        usd(position.unrealized_pnl, 0),
        position.leverage.value,
        position.leverage.mode
    );

    let mark = mark.or(position.entry_price);
    if let Some(dist) = mark.and_then(|m| position.distance_to_liquidation_pct(m)) {
        line.push_str(&format!(" | liq dist: {:.1}%", dist));
    }
    line
}

/// `allTime: PnL=$1,234 ROI=12.50% Vol=$9,000,000`
pub fn window_line(window: &str, perf: &WindowPerformance) -> String {
    format!(
        "{}: PnL={} ROI={:.2}% Vol={}",
        window,
        usd(perf.pnl, 0),
        perf.roi * Decimal::ONE_HUNDRED,
        usd(perf.vlm, 0)
    )
}

/// Per-window lines for a leaderboard row, in the order the API sent them.
pub fn window_lines(row: &LeaderboardRow) -> Vec<String> {
    row.window_performances
        .iter()
        .map(|(window, perf)| window_line(window, perf))
        .collect()
}

/// `Margin used: $75,000 | Notional: $1,500,000 | Raw USD: $1,100,000`
pub fn margin_line(summary: &MarginSummary) -> String {
    format!(
        "Margin used: {} | Notional: {} | Raw USD: {}",
        usd(summary.total_margin_used, 0),
        usd(summary.total_notional, 0),
        usd(summary.total_raw_usd, 0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_leaderboard_rows_both_shapes() {
        let rows = json!([{"ethAddress": "0x1"}, {"ethAddress": "0x2"}]);
        let wrapped = json!({"leaderboardRows": rows.clone()});

        assert_eq!(leaderboard_rows(&rows).len(), 2);
        assert_eq!(leaderboard_rows(&wrapped).len(), 2);
        assert!(leaderboard_rows(&json!({"other": []})).is_empty());
        assert!(leaderboard_rows(&json!("nope")).is_empty());
    }

    #[test]
    fn test_describe_fields_reports_list_length() {
        let data = json!({"leaderboardRows": [{"a": 1}, {"a": 2}, {"a": 3}], "updated": 17});
        let lines = describe_fields(&data);

        assert!(lines[0].starts_with("Dict keys:"));
        assert!(lines.iter().any(|l| l.starts_with("leaderboardRows (list of 3)")));
        assert!(lines.iter().any(|l| l == "updated: 17"));

        let lines = describe_fields(&json!([{"k": true}]));
        assert_eq!(lines[0], "Total entries: 1");
        assert_eq!(lines[1], r#"First entry keys: ["k"]"#);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_describe_fields_does_not_print_rows() {
        let data = json!({"leaderboardRows": [{"ethAddress": "0xfeed", "accountValue": "1"}]});
        let lines = describe_fields(&data);

        assert_eq!(
            lines[1],
            r#"leaderboardRows (list of 1), first item keys: ["accountValue", "ethAddress"]"#
        );
        assert!(lines.iter().all(|l| !l.contains("0xfeed")));
    }

    #[test]
    fn test_decimal_field() {
        assert_eq!(decimal_field(&json!("-0.25")), Some(dec!(-0.25)));
        assert_eq!(decimal_field(&json!(3)), Some(dec!(3)));
        assert_eq!(decimal_field(&json!("1e-3")), Some(dec!(0.001)));
        assert_eq!(decimal_field(&json!(null)), None);
        assert_eq!(decimal_field(&json!("abc")), None);
    }

    #[test]
    fn test_open_raw_positions_excludes_flat() {
        let state = json!({
            "assetPositions": [
                {"type": "oneWay", "position": {"coin": "BTC", "szi": "0.0"}},
                {"type": "oneWay", "position": {"coin": "ETH", "szi": "-4.2"}},
                {"type": "oneWay", "position": {"coin": "SOL", "szi": "10"}}
            ]
        });

        let open = open_raw_positions(&state);
        let coins: Vec<&str> = open
            .iter()
            .filter_map(|p| p["position"]["coin"].as_str())
            .collect();
        assert_eq!(coins, vec!["ETH", "SOL"]);
        assert!(open_raw_positions(&json!({})).is_empty());
    }

    #[test]
    fn test_position_line() {
        let mut pos = Position::new("BTC", dec!(-2), dec!(65000));
        pos.unrealized_pnl = dec!(2500.4);
        pos.leverage.value = 20;
        pos.liquidation_price = Some(dec!(71500));

        assert_eq!(
            position_line(&pos, None),
            "BTC SHORT @ $65,000.00 | PnL: $2,500 | 20x cross | liq dist: 10.0%"
        );

        pos.liquidation_price = None;
        assert_eq!(
            position_line(&pos, Some(dec!(64000))),
            "BTC SHORT @ $65,000.00 | PnL: $2,500 | 20x cross"
        );
    }

    #[test]
    fn test_window_lines() {
        let mut row = LeaderboardRow::new("0x1", dec!(1));
        row.window_performances = vec![(
            "allTime".to_string(),
            WindowPerformance {
                pnl: dec!(-1234567.8),
                roi: dec!(-0.0525),
                vlm: dec!(9000000),
            },
        )];
        assert_eq!(
            window_lines(&row),
            vec!["allTime: PnL=-$1,234,568 ROI=-5.25% Vol=$9,000,000"]
        );
    }

    #[test]
    fn test_margin_line() {
        let summary = MarginSummary {
            account_value: dec!(2600000),
            total_notional: dec!(1500000),
            total_raw_usd: dec!(1100000),
            total_margin_used: dec!(75000.4),
        };
        assert_eq!(
            margin_line(&summary),
            "Margin used: $75,000 | Notional: $1,500,000 | Raw USD: $1,100,000"
        );
    }
}
