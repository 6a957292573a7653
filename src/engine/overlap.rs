//! Alignment & time-overlap scoring.
//!
//! Overlap strength blends four terms:
//!
//! | term | weight |
//! |---|---|
//! | luck-cycle element ∩ transit element | 0.50 |
//! | share of high-impact transits | 0.25 |
//! | progression density (layer 7) | 0.15 |
//! | timing density (layer 4) | 0.10 |

use std::collections::BTreeSet;

use crate::domain::{LayerCells, MatrixCalculationInput, TimeOverlap, WesternElement};
use crate::math::{clamp01, clamp_range};

const ELEMENT_WEIGHT: f64 = 0.5;
const STRONG_SIGNAL_WEIGHT: f64 = 0.25;
const PROGRESSION_WEIGHT: f64 = 0.15;
const TIMING_WEIGHT: f64 = 0.1;

/// Layer 7 is saturated at one full row of progressions.
const PROGRESSION_SATURATION: f64 = 6.0;
/// Layer 4 is saturated at two luck elements × four transits.
const TIMING_SATURATION: f64 = 8.0;

pub const MIN_TIME_WEIGHT: f64 = 1.0;
pub const MAX_TIME_WEIGHT: f64 = 1.3;

/// `clamp(1 + 0.3 × overlap, 1.0, 1.3)`; also clamps out-of-range or NaN overlap.
pub fn time_overlap_weight_for(overlap_strength: f64) -> f64 {
    clamp_range(
        MIN_TIME_WEIGHT + (MAX_TIME_WEIGHT - MIN_TIME_WEIGHT) * overlap_strength,
        MIN_TIME_WEIGHT,
        MAX_TIME_WEIGHT,
    )
}

pub fn calculate_time_overlap_weight(
    input: &MatrixCalculationInput,
    layer4: &LayerCells,
    layer7: &LayerCells,
) -> TimeOverlap {
    let element_overlap = element_overlap(input);
    let strong_signal = strong_signal(input);
    let progression_density = (layer7.len() as f64 / PROGRESSION_SATURATION).min(1.0);
    let timing_density = (layer4.len() as f64 / TIMING_SATURATION).min(1.0);

    let overlap_strength = clamp01(
        ELEMENT_WEIGHT * element_overlap
            + STRONG_SIGNAL_WEIGHT * strong_signal
            + PROGRESSION_WEIGHT * progression_density
            + TIMING_WEIGHT * timing_density,
    );

    TimeOverlap {
        overlap_strength,
        time_overlap_weight: time_overlap_weight_for(overlap_strength),
        element_overlap,
        strong_signal,
        progression_density,
        timing_density,
    }
}

/// Fraction of the luck-cycle Western elements that an active transit also carries.
fn element_overlap(input: &MatrixCalculationInput) -> f64 {
    let saju: BTreeSet<WesternElement> = input
        .luck_cycle_elements()
        .into_iter()
        .map(|e| e.to_western())
        .collect();
    let transit: BTreeSet<WesternElement> = input
        .transit_set()
        .into_iter()
        .map(|t| t.western_element())
        .collect();

    if saju.is_empty() || transit.is_empty() {
        return 0.0;
    }
    saju.intersection(&transit).count() as f64 / saju.len() as f64
}

fn strong_signal(input: &MatrixCalculationInput) -> f64 {
    let transits = input.transit_set();
    if transits.is_empty() {
        return 0.0;
    }
    transits.iter().filter(|t| t.is_high_impact()).count() as f64 / transits.len() as f64
}
