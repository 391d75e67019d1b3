//! Distribution value rounding.
//!
//! Stored topic distributions are rounded to 4 decimal digits, rounding
//! **away from zero** at the 4th digit (ceiling-style, not nearest). This
//! keeps exported files compact and byte-reproducible: re-rounding an
//! already-rounded value never drifts further.

/// Tolerance absorbing binary representation noise so that an
/// already-rounded value (e.g. 0.1235 stored as 0.12350000000000002) does
/// not creep up a whole step on re-rounding. Trade-off: a raw value that
/// genuinely sits within 1e-11 (this tolerance at the unscaled magnitude)
/// above a 4-decimal boundary rounds down to that boundary instead of up.
const EPS: f64 = 1e-7;

/// Round a single value to 4 decimals, away from zero.
///
/// # Example
///
/// ```
/// use topic_hierarchy_core::types::round_up4;
///
/// assert_eq!(round_up4(0.123456), 0.1235);
/// assert_eq!(round_up4(round_up4(0.123456)), 0.1235); // idempotent
/// assert_eq!(round_up4(-0.123411), -0.1235);
/// assert_eq!(round_up4(0.0), 0.0);
/// ```
#[inline]
pub fn round_up4(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let scaled = value.abs() * 10_000.0;
    let ceiled = (scaled - EPS).ceil().max(0.0);
    let rounded = ceiled / 10_000.0;
    if value < 0.0 {
        -rounded
    } else {
        rounded
    }
}

/// Round a whole distribution, away from zero at 4 decimals.
pub fn round_distribution(values: &[f64]) -> Vec<f64> {
    values.iter().copied().map(round_up4).collect()
}
