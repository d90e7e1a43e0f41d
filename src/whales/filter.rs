//! Whale selection from leaderboard rows.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::models::LeaderboardRow;

/// Default minimum account value for a whale.
pub const DEFAULT_MIN_ACCOUNT_VALUE: Decimal = dec!(2500000);
/// Rows above this value with no display name are treated as bogus.
pub const SUSPICIOUS_ACCOUNT_VALUE: Decimal = dec!(1000000000);

/// Keep rows whose account value is at least `min_value`, largest first.
///
/// Rows reporting more than [`SUSPICIOUS_ACCOUNT_VALUE`] without a display
/// name are dropped.
pub fn filter_whales(rows: &[LeaderboardRow], min_value: Decimal) -> Vec<LeaderboardRow> {
    let mut whales: Vec<LeaderboardRow> = rows
        .iter()
        .filter(|row| row.account_value >= min_value)
        .filter(|row| {
            if row.account_value > SUSPICIOUS_ACCOUNT_VALUE && !row.has_display_name() {
                warn!(
                    address = %row.address,
                    account_value = %row.account_value,
                    "Skipping suspicious whale with no display name"
                );
                return false;
            }
            true
        })
        .cloned()
        .collect();

    whales.sort_by(|a, b| b.account_value.cmp(&a.account_value));
    whales
}
