//! Domain Projector.
//!
//! The ten layer means are re-projected onto the five life domains through a
//! fixed 10×5 weight matrix (one row per layer, each row summing to 1):
//!
//! ```text
//! raw[d]  = Σ_l mean[l]      · W[l][d]
//! mass[d] = Σ_l populated[l] · W[l][d]
//! norm[d] = raw / mass, shrunk toward 0.5 by mass / Σ_l W[l][d]
//! ```
//!
//! `domainBaseNorm` is therefore not the raw sum `Σ mean · W`. With every layer
//! populated, `mass = Σ_l W[l][d]` and the norm is the column-weighted average of
//! the layer means. Empty layers pull a domain toward the neutral midpoint instead
//! of toward zero.

use std::collections::BTreeMap;

use nalgebra::{RowSVector, SMatrix};

use crate::domain::{DerivedComponentScores, Domain, DomainScore, LayerId, LayerScoreBundle, TimeOverlap};
use crate::engine::components::calculate_alignment_term;
use crate::engine::drivers::extract_drivers_and_cautions;
use crate::engine::overlap::time_overlap_weight_for;
use crate::math::{clamp01, clamp_range};

const LAYERS: usize = 10;
const DOMAINS: usize = 5;

/// Layer → domain weights. Columns: career, love, money, health, move.
pub const DOMAIN_WEIGHTS: [[f64; DOMAINS]; LAYERS] = [
    [0.20, 0.20, 0.20, 0.25, 0.15], // elementCore
    [0.30, 0.20, 0.25, 0.10, 0.15], // sibsinPlanet
    [0.30, 0.20, 0.30, 0.10, 0.10], // sibsinHouse
    [0.20, 0.15, 0.20, 0.15, 0.30], // timingOverlay
    [0.15, 0.35, 0.10, 0.15, 0.25], // relationAspect
    [0.20, 0.15, 0.15, 0.35, 0.15], // stageHouse
    [0.35, 0.10, 0.25, 0.10, 0.20], // advancedAnalysis
    [0.20, 0.30, 0.15, 0.15, 0.20], // shinsalPlanet
    [0.15, 0.30, 0.15, 0.30, 0.10], // asteroidHouse
    [0.25, 0.20, 0.15, 0.20, 0.20], // extraPointSibsin
];

const NEUTRAL_NORM: f64 = 0.5;
const DOMAIN_COMPONENT_FLOOR: f64 = 0.6;
const ALIGNMENT_FLOOR: f64 = 0.85;

/// `clamp01(0.7 × coverage + 0.3 × alignment)`.
pub fn confidence_from(data_coverage: f64, alignment: f64) -> f64 {
    clamp01(0.7 * data_coverage + 0.3 * alignment)
}

fn weight_matrix() -> SMatrix<f64, LAYERS, DOMAINS> {
    SMatrix::from_fn(|l, d| DOMAIN_WEIGHTS[l][d])
}

/// Normalized base score of every domain in `[0, 1]`.
fn domain_base_norms(bundle: &LayerScoreBundle) -> [f64; DOMAINS] {
    let weights = weight_matrix();
    let means = RowSVector::<f64, LAYERS>::from_fn(|_, l| bundle.layer_mean(LayerId::ALL[l]));
    let populated = RowSVector::<f64, LAYERS>::from_fn(|_, l| {
        if bundle.is_populated(LayerId::ALL[l]) { 1.0 } else { 0.0 }
    });
    let ones = RowSVector::<f64, LAYERS>::repeat(1.0);

    let raw = means * weights;
    let mass = populated * weights;
    let total = ones * weights;

    let mut out = [NEUTRAL_NORM; DOMAINS];
    for (d, slot) in out.iter_mut().enumerate() {
        if mass[d] <= 0.0 || total[d] <= 0.0 {
            continue;
        }
        let norm = raw[d] / mass[d];
        let coverage = mass[d] / total[d];
        *slot = clamp01(NEUTRAL_NORM + (norm - NEUTRAL_NORM) * coverage);
    }
    out
}

/// One `DomainScore` per life domain.
///
/// Overlap strength is the global one for every domain; the domain-specific
/// re-scaling happens later, in the per-domain timeline.
pub fn compute_domain_scores(
    bundle: &LayerScoreBundle,
    components: &DerivedComponentScores,
    time_overlap: &TimeOverlap,
) -> BTreeMap<Domain, DomainScore> {
    let norms = domain_base_norms(bundle);
    let overlap_strength = clamp01(time_overlap.overlap_strength);
    let time_overlap_weight = time_overlap_weight_for(overlap_strength);

    Domain::ALL
        .into_iter()
        .map(|domain| {
            let norm = norms[domain.index()];
            let scale = DOMAIN_COMPONENT_FLOOR + (1.0 - DOMAIN_COMPONENT_FLOOR) * norm;
            let saju = clamp01(components.saju_component_score * scale);
            let astro = clamp01(components.astro_component_score * scale);
            let alignment = calculate_alignment_term(saju, astro);

            let final_score = clamp_range(
                10.0 * norm * (ALIGNMENT_FLOOR + (1.0 - ALIGNMENT_FLOOR) * alignment) * time_overlap_weight,
                0.0,
                10.0,
            );
            let confidence = confidence_from(components.data_coverage, alignment);
            let (drivers, cautions) =
                extract_drivers_and_cautions(alignment, time_overlap_weight, overlap_strength, confidence);

            let score = DomainScore {
                domain,
                base_final_score: 10.0 * norm,
                final_score_adjusted: final_score,
                saju_component_score: saju,
                astro_component_score: astro,
                alignment_score: alignment,
                overlap_strength,
                time_overlap_weight,
                confidence_score: confidence,
                drivers,
                cautions,
            };
            (domain, score)
        })
        .collect()
}
