//! Position selection and account value reconciliation for one whale.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::models::{AccountState, LeaderboardRow, Position};

/// Leaderboard and clearinghouse values further apart than this (percent of
/// the leaderboard value) are considered out of sync.
pub const ACCOUNT_VALUE_MISMATCH_PCT: Decimal = dec!(20);

/// Positions with a non-zero size and a known entry price.
pub fn open_positions(state: &AccountState) -> Vec<&Position> {
    state
        .positions
        .iter()
        .filter(|p| p.is_open())
        .filter(|p| {
            if p.entry_price.is_none() {
                warn!(coin = %p.coin, "Skipping position with no entry price");
                return false;
            }
            true
        })
        .collect()
}

/// Account value to report for `row`.
///
/// The leaderboard value lags; when the clearinghouse disagrees by more than
/// [`ACCOUNT_VALUE_MISMATCH_PCT`] the clearinghouse value wins.
pub fn reconcile_account_value(row: &LeaderboardRow, state: &AccountState) -> Decimal {
    let leaderboard = row.account_value;
    let Some(clearinghouse) = state.account_value() else {
        return leaderboard;
    };

    if leaderboard <= Decimal::ZERO {
        return leaderboard;
    }

    let diff_pct = (leaderboard - clearinghouse).abs() / leaderboard * dec!(100);
    if diff_pct > ACCOUNT_VALUE_MISMATCH_PCT {
        warn!(
            address = %row.address,
            leaderboard = %leaderboard,
            clearinghouse = %clearinghouse,
            diff_pct = %diff_pct.round_dp(1),
            "Account value mismatch, using clearinghouse value"
        );
        return clearinghouse;
    }

    leaderboard
}
