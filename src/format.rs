//! Console formatting helpers.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Truncate a string with ellipsis if too long (counted in chars).
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let head: String = s.chars().take(max_len - 3).collect();
    format!("{}...", head)
}

/// `0x1234...abcd` form of an address.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Format with thousands separators and a fixed number of decimals,
/// e.g. `2,512,340.57`.
pub fn with_separators(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp(decimals);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", decimals as usize, rounded.abs());

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Dollar amount with separators: `$1,234` or `-$56`.
pub fn usd(value: Decimal, decimals: u32) -> String {
    if value.is_sign_negative() && !value.round_dp(decimals).is_zero() {
        format!("-${}", with_separators(value.abs(), decimals))
    } else {
        format!("${}", with_separators(value.abs(), decimals))
    }
}

/// Compact signed dollar amount: `+$2.50M`, `-$12.3K`, `+$950`.
pub fn usd_compact(value: Decimal) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        '-'
    } else {
        '+'
    };
    let abs = value.abs();
    let body = if abs >= dec!(1000000000) {
        format!("{:.2}B", abs / dec!(1000000000))
    } else if abs >= dec!(1000000) {
        format!("{:.2}M", abs / dec!(1000000))
    } else if abs >= dec!(1000) {
        format!("{:.1}K", abs / dec!(1000))
    } else {
        format!("{:.0}", abs)
    };
    format!("{}${}", sign, body)
}
