//! Monthly Timeline Projector.
//!
//! The base overlap strength is perturbed per month by a seasonal sine and a
//! hash-derived noise term. The noise is an FNV-1a hash of the canonical scoring
//! JSON plus the month key and index, so the curve is a pure function of
//! (input, start month).

use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::TAU;

use serde::Serialize;

use crate::domain::{
    AspectType, Asteroid, Domain, DomainScore, ExtraPoint, FiveElement, Geokguk, LayerCells,
    MatrixCalculationInput, MonthlyOverlapPoint, PeakLevel, Planet, ProgressionType, RelationKind,
    Shinsal, Sibsin, TransitCycle, TwelveStage, WesternElement, ZodiacSign,
};
use crate::engine::overlap::{calculate_time_overlap_weight, time_overlap_weight_for};
use crate::math::{YearMonth, clamp01, fnv1a_32, signed_noise};

pub const TIMELINE_MONTHS: usize = 12;

const SEASONAL_AMPLITUDE: f64 = 0.08;
const NOISE_AMPLITUDE: f64 = 0.1;

const PEAK_THRESHOLD: f64 = 0.75;
const HIGH_THRESHOLD: f64 = 0.6;

/// The fields the resolver reads, with set-like lists as sorted sets.
///
/// Relations and aspects reduce to their kinds and types, and an empty
/// progression list is expanded to every technique, matching how scoring sees them.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoringView<'a> {
    day_master_element: FiveElement,
    pillar_elements: &'a [FiveElement],
    sibsin_distribution: &'a BTreeMap<Sibsin, u32>,
    twelve_stages: &'a BTreeMap<TwelveStage, u32>,
    relation_kinds: BTreeSet<RelationKind>,
    geokguk: Option<Geokguk>,
    yongsin: Option<FiveElement>,
    current_daeun_element: Option<FiveElement>,
    current_saeun_element: Option<FiveElement>,
    shinsal: BTreeSet<Shinsal>,
    dominant_western_element: Option<WesternElement>,
    planet_houses: &'a BTreeMap<Planet, u8>,
    planet_signs: &'a BTreeMap<Planet, ZodiacSign>,
    aspect_types: BTreeSet<AspectType>,
    active_transits: BTreeSet<TransitCycle>,
    active_progressions: BTreeSet<ProgressionType>,
    asteroid_houses: &'a BTreeMap<Asteroid, u8>,
    extra_point_signs: &'a BTreeMap<ExtraPoint, ZodiacSign>,
}

impl<'a> ScoringView<'a> {
    fn of(input: &'a MatrixCalculationInput) -> Self {
        Self {
            day_master_element: input.day_master_element,
            pillar_elements: &input.pillar_elements,
            sibsin_distribution: &input.sibsin_distribution,
            twelve_stages: &input.twelve_stages,
            relation_kinds: input.relation_kinds(),
            geokguk: input.geokguk,
            yongsin: input.yongsin,
            current_daeun_element: input.current_daeun_element,
            current_saeun_element: input.current_saeun_element,
            shinsal: input.shinsal_set(),
            dominant_western_element: input.dominant_western_element,
            planet_houses: &input.planet_houses,
            planet_signs: &input.planet_signs,
            aspect_types: input.aspect_types(),
            active_transits: input.transit_set(),
            active_progressions: input.progression_set(),
            asteroid_houses: &input.asteroid_houses,
            extra_point_signs: &input.extra_point_signs,
        }
    }
}

/// Canonical serialization of every field that affects scoring.
///
/// `profileContext`, relation pillars and notes, and aspect planets and orbs are
/// dropped, so neither metadata nor list order changes the hash.
pub fn canonical_scoring_json(input: &MatrixCalculationInput) -> String {
    // Only enum keys, numbers and strings: serialization cannot fail.
    serde_json::to_string(&ScoringView::of(input)).unwrap_or_default()
}

pub fn classify_peak(overlap_strength: f64) -> PeakLevel {
    if overlap_strength >= PEAK_THRESHOLD {
        PeakLevel::Peak
    } else if overlap_strength >= HIGH_THRESHOLD {
        PeakLevel::High
    } else {
        PeakLevel::Normal
    }
}

fn point(month: String, overlap_strength: f64) -> MonthlyOverlapPoint {
    let overlap_strength = clamp01(overlap_strength);
    MonthlyOverlapPoint {
        month,
        overlap_strength,
        time_overlap_weight: time_overlap_weight_for(overlap_strength),
        peak_level: classify_peak(overlap_strength),
    }
}

/// Twelve consecutive months starting at `start` (default: the current month).
pub fn generate_monthly_overlap_timeline(
    input: &MatrixCalculationInput,
    layer4: &LayerCells,
    layer7: &LayerCells,
    start: Option<YearMonth>,
) -> Vec<MonthlyOverlapPoint> {
    let base = calculate_time_overlap_weight(input, layer4, layer7).overlap_strength;
    let start = start.unwrap_or_else(YearMonth::current);
    let canonical = canonical_scoring_json(input);

    start
        .sequence(TIMELINE_MONTHS)
        .into_iter()
        .enumerate()
        .map(|(index, month)| {
            let key = month.to_string();
            let seasonal = (f64::from(month.month0()) / 12.0 * TAU).sin() * SEASONAL_AMPLITUDE;
            let noise = signed_noise(fnv1a_32(&format!("{canonical}|{key}|{index}")), NOISE_AMPLITUDE);
            point(key, base + seasonal + noise)
        })
        .collect()
}

/// Domain intensity factor in `[0.7, 1.3]`: above-midpoint domains amplify the curve.
pub fn domain_intensity(final_score: f64) -> f64 {
    0.7 + 0.6 * clamp01((final_score - 5.0) / 5.0)
}

/// Re-scale the global timeline once per domain.
pub fn generate_timeline_by_domain(
    timeline: &[MonthlyOverlapPoint],
    domain_scores: &BTreeMap<Domain, DomainScore>,
) -> BTreeMap<Domain, Vec<MonthlyOverlapPoint>> {
    domain_scores
        .iter()
        .map(|(domain, score)| {
            let factor = domain_intensity(score.final_score_adjusted);
            let points = timeline
                .iter()
                .map(|p| point(p.month.clone(), p.overlap_strength * factor))
                .collect();
            (*domain, points)
        })
        .collect()
}
