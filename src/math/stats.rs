//! Clamps and (weighted) means.
//!
//! All of these are total: NaN inputs collapse to the lower bound and empty or
//! zero-weight inputs produce `0.0`, never NaN. Downstream scores rely on that.

/// Clamp into `[lo, hi]`; NaN maps to `lo`.
pub fn clamp_range(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.clamp(lo, hi)
}

/// Clamp into `[0, 1]`.
pub fn clamp01(value: f64) -> f64 {
    clamp_range(value, 0.0, 1.0)
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Weighted mean of `(value, weight)` pairs; `0.0` when the weights sum to zero.
pub fn weighted_mean(pairs: &[(f64, f64)]) -> f64 {
    let denom: f64 = pairs.iter().map(|(_, w)| *w).sum();
    if denom <= 0.0 || !denom.is_finite() {
        return 0.0;
    }
    pairs.iter().map(|(v, w)| v * w).sum::<f64>() / denom
}
