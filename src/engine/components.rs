//! Component Score Deriver and the alignment term.
//!
//! Each layer is attributed to exactly one pool: Saju-dominant, astrology-dominant
//! or the cross-system bridge. Weights within each pool sum to 1.

use crate::domain::{DerivedComponentScores, LayerId, LayerScoreBundle};
use crate::math::{clamp01, weighted_mean};

/// Which component pool a layer feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    Saju,
    Astro,
    Bridge,
}

/// Share of the system base in each component score; the rest is the bridge.
const BASE_SHARE: f64 = 0.75;
const BRIDGE_SHARE: f64 = 0.25;

/// Pool and in-pool weight of every layer.
pub fn layer_attribution(layer: LayerId) -> (Attribution, f64) {
    match layer {
        LayerId::ElementCore => (Attribution::Bridge, 0.25),
        LayerId::SibsinPlanet => (Attribution::Bridge, 0.20),
        LayerId::SibsinHouse => (Attribution::Bridge, 0.15),
        LayerId::TimingOverlay => (Attribution::Astro, 0.60),
        LayerId::RelationAspect => (Attribution::Bridge, 0.15),
        LayerId::StageHouse => (Attribution::Saju, 0.55),
        LayerId::AdvancedAnalysis => (Attribution::Bridge, 0.10),
        LayerId::ShinsalPlanet => (Attribution::Saju, 0.45),
        LayerId::AsteroidHouse => (Attribution::Astro, 0.40),
        LayerId::ExtraPointSibsin => (Attribution::Bridge, 0.15),
    }
}

/// Collapse the ten layers into the two component scores, the bridge and coverage.
///
/// Only layers with matched cells enter a weighted mean; a pool with no data
/// contributes `0.0`.
pub fn derive_saju_astro_component_scores(bundle: &LayerScoreBundle) -> DerivedComponentScores {
    let mut saju = Vec::new();
    let mut astro = Vec::new();
    let mut bridge = Vec::new();

    for layer in LayerId::ALL {
        if !bundle.is_populated(layer) {
            continue;
        }
        let (pool, weight) = layer_attribution(layer);
        let entry = (bundle.layer_mean(layer), weight);
        match pool {
            Attribution::Saju => saju.push(entry),
            Attribution::Astro => astro.push(entry),
            Attribution::Bridge => bridge.push(entry),
        }
    }

    let saju_base = weighted_mean(&saju);
    let astro_base = weighted_mean(&astro);
    let overlap_bridge_score = clamp01(weighted_mean(&bridge));

    DerivedComponentScores {
        saju_component_score: clamp01(BASE_SHARE * saju_base + BRIDGE_SHARE * overlap_bridge_score),
        astro_component_score: clamp01(BASE_SHARE * astro_base + BRIDGE_SHARE * overlap_bridge_score),
        overlap_bridge_score,
        data_coverage: bundle.populated_layers() as f64 / LayerId::ALL.len() as f64,
    }
}

/// Symmetric agreement of two component scores: `1 - |saju - astro|`, clamped.
pub fn calculate_alignment_term(saju_score: f64, astro_score: f64) -> f64 {
    clamp01(1.0 - (saju_score - astro_score).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InteractionCode, LayerCells, MatrixCell, cell_key};

    fn cells(scores: &[u8]) -> LayerCells {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let row = format!("r{i}");
                (
                    cell_key(&row, "c"),
                    MatrixCell {
                        row_key: row.clone(),
                        col_key: "c".to_string(),
                        interaction: InteractionCode::from_score(s, &row, "c"),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn pool_weights_sum_to_one() {
        for pool in [Attribution::Saju, Attribution::Astro, Attribution::Bridge] {
            let total: f64 = LayerId::ALL
                .iter()
                .map(|l| layer_attribution(*l))
                .filter(|(p, _)| *p == pool)
                .map(|(_, w)| w)
                .sum();
            assert!((total - 1.0).abs() < 1e-9, "{pool:?}: {total}");
        }
    }

    #[test]
    fn empty_bundle_scores_zero_without_nan() {
        let scores = derive_saju_astro_component_scores(&LayerScoreBundle::default());
        assert_eq!(scores.saju_component_score, 0.0);
        assert_eq!(scores.astro_component_score, 0.0);
        assert_eq!(scores.overlap_bridge_score, 0.0);
        assert_eq!(scores.data_coverage, 0.0);
    }

    #[test]
    fn single_pool_layers_drive_their_component() {
        let mut bundle = LayerScoreBundle::default();
        bundle.layers.insert(LayerId::StageHouse, cells(&[8, 6]));
        bundle.layers.insert(LayerId::AsteroidHouse, cells(&[4]));
        bundle.layers.insert(LayerId::ElementCore, cells(&[10]));

        let scores = derive_saju_astro_component_scores(&bundle);
        // saju base 0.7, astro base 0.4, bridge 1.0
        assert!((scores.saju_component_score - (0.75 * 0.7 + 0.25)).abs() < 1e-12);
        assert!((scores.astro_component_score - (0.75 * 0.4 + 0.25)).abs() < 1e-12);
        assert!((scores.overlap_bridge_score - 1.0).abs() < 1e-12);
        assert!((scores.data_coverage - 0.3).abs() < 1e-12);
    }

    #[test]
    fn alignment_is_symmetric_and_monotone() {
        assert_eq!(calculate_alignment_term(0.3, 0.7), calculate_alignment_term(0.7, 0.3));
        assert_eq!(calculate_alignment_term(0.5, 0.5), 1.0);
        assert_eq!(calculate_alignment_term(0.0, 1.0), 0.0);

        let astro = 0.4;
        let mut last = f64::INFINITY;
        for step in 0..=60 {
            let saju = astro + step as f64 * 0.01;
            let a = calculate_alignment_term(saju, astro);
            assert!(a <= last);
            last = a;
        }
    }
}
