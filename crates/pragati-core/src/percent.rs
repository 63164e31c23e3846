//! Percentage formatting shared by the aggregation rollups.
//!
//! Two display contracts coexist:
//! - KPI cards show one decimal place, half-up, with a bare `"0"` sentinel
//!   when the denominator is empty (never a division by zero).
//! - District comparison bars show whole percents, rounded to nearest — not
//!   truncated, so a 99.6% district does not read as 99%.

/// One-decimal percentage string, half-up. Returns `"0"` when `denom` is not
/// positive.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio_percent_1dp(numer: i64, denom: i64) -> String {
    if denom <= 0 {
        return "0".to_string();
    }
    let pct = 100.0 * numer as f64 / denom as f64;
    format!("{:.1}", (pct * 10.0).round() / 10.0)
}

/// Whole-number percentage, rounded to nearest. Returns `0` when `denom` is
/// zero.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn ratio_percent_whole(numer: usize, denom: usize) -> u32 {
    if denom == 0 {
        return 0;
    }
    (100.0 * numer as f64 / denom as f64).round() as u32
}
