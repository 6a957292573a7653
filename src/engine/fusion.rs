//! The full scoring pipeline in one call.

use crate::data::LayerTables;
use crate::domain::{FusionReport, LayerCells, LayerId, LayerSummary, MatrixCalculationInput};
use crate::engine::components::{calculate_alignment_term, derive_saju_astro_component_scores};
use crate::engine::domains::compute_domain_scores;
use crate::engine::overlap::calculate_time_overlap_weight;
use crate::engine::resolver::resolve_all;
use crate::engine::timeline::{generate_monthly_overlap_timeline, generate_timeline_by_domain};
use crate::math::YearMonth;

pub const DEFAULT_INSIGHT_LIMIT: usize = 5;

/// Knobs of a single calculation that are not part of the input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FusionOptions {
    /// First month of the timeline; `None` means the current month.
    pub start_month: Option<YearMonth>,
    pub insight_limit: usize,
}

impl Default for FusionOptions {
    fn default() -> Self {
        Self {
            start_month: None,
            insight_limit: DEFAULT_INSIGHT_LIMIT,
        }
    }
}

/// resolve → components → alignment → time overlap → domains → timelines →
/// signals → insights.
pub fn calculate_fusion(
    input: &MatrixCalculationInput,
    tables: &LayerTables,
    options: &FusionOptions,
) -> FusionReport {
    let start = options.start_month.unwrap_or_else(YearMonth::current);
    let span = tracing::debug_span!("calculate_fusion", start = %start);
    let _guard = span.enter();

    let layers = resolve_all(input, tables);
    let empty = LayerCells::new();
    let layer4 = layers.cells(LayerId::TimingOverlay).unwrap_or(&empty);
    let layer7 = layers.cells(LayerId::AdvancedAnalysis).unwrap_or(&empty);

    let layer_summaries = LayerId::ALL
        .into_iter()
        .map(|layer| LayerSummary {
            layer,
            cell_count: layers.cell_count(layer),
            mean: layers.layer_mean(layer),
        })
        .collect();

    let components = derive_saju_astro_component_scores(&layers);
    let alignment_score =
        calculate_alignment_term(components.saju_component_score, components.astro_component_score);
    let time_overlap = calculate_time_overlap_weight(input, layer4, layer7);
    let domain_scores = compute_domain_scores(&layers, &components, &time_overlap);

    let timeline = generate_monthly_overlap_timeline(input, layer4, layer7, Some(start));
    let timeline_by_domain = generate_timeline_by_domain(&timeline, &domain_scores);

    let signals = crate::report::derive_calendar_signals(
        &domain_scores,
        &timeline_by_domain,
        alignment_score,
        components.data_coverage,
    );
    let insights = crate::report::rank_insights(&layers, options.insight_limit);

    tracing::debug!(
        cells = layers.total_cells(),
        coverage = components.data_coverage,
        alignment = alignment_score,
        overlap = time_overlap.overlap_strength,
        "fusion calculated"
    );

    FusionReport {
        start_month: start.to_string(),
        layers,
        layer_summaries,
        components,
        alignment_score,
        time_overlap,
        domain_scores,
        timeline,
        timeline_by_domain,
        signals,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::domain::*;

    fn options() -> FusionOptions {
        FusionOptions {
            start_month: YearMonth::new(2025, 1),
            insight_limit: 5,
        }
    }

    fn rich_input() -> MatrixCalculationInput {
        let mut input = MatrixCalculationInput::new(
            FiveElement::Wood,
            vec![FiveElement::Wood, FiveElement::Fire, FiveElement::Water, FiveElement::Metal],
        );
        input.sibsin_distribution.insert(Sibsin::Jeonggwan, 2);
        input.sibsin_distribution.insert(Sibsin::Siksin, 1);
        input.twelve_stages.insert(TwelveStage::Jewang, 1);
        input.twelve_stages.insert(TwelveStage::Myo, 1);
        input.relations.push(RelationHit {
            kind: RelationKind::Samhap,
            pillars: vec!["year".to_string(), "day".to_string()],
            note: None,
        });
        input.geokguk = Some(Geokguk::Jeonggwan);
        input.yongsin = Some(FiveElement::Water);
        input.current_daeun_element = Some(FiveElement::Fire);
        input.current_saeun_element = Some(FiveElement::Water);
        input.shinsal_list = vec![Shinsal::Cheoneul, Shinsal::Dohwa];
        input.dominant_western_element = Some(WesternElement::Water);
        input.planet_houses.insert(Planet::Sun, 10);
        input.planet_houses.insert(Planet::Jupiter, 1);
        input.planet_houses.insert(Planet::Venus, 7);
        input.planet_signs.insert(Planet::Moon, ZodiacSign::Cancer);
        input.aspects.push(AspectHit {
            planet1: Planet::Sun,
            planet2: Planet::Jupiter,
            aspect_type: AspectType::Trine,
            orb: Some(1.2),
            angle: None,
        });
        input.active_transits = vec![TransitCycle::JupiterReturn, TransitCycle::MarsRetrograde];
        input.asteroid_houses.insert(Asteroid::Juno, 7);
        input.extra_point_signs.insert(ExtraPoint::NorthNode, ZodiacSign::Leo);
        input
    }

    fn pick(rng: &mut StdRng) -> FiveElement {
        FiveElement::ALL.choose(rng).copied().unwrap_or(FiveElement::Wood)
    }

    fn random_input(rng: &mut StdRng) -> MatrixCalculationInput {
        let pillars = (0..4).map(|_| pick(rng)).collect();
        let mut input = MatrixCalculationInput::new(pick(rng), pillars);

        for s in Sibsin::ALL {
            if rng.gen_bool(0.4) {
                input.sibsin_distribution.insert(s, rng.gen_range(0..4));
            }
        }
        for s in TwelveStage::ALL {
            if rng.gen_bool(0.3) {
                input.twelve_stages.insert(s, rng.gen_range(0..3));
            }
        }
        for r in RelationKind::ALL {
            if rng.gen_bool(0.25) {
                input.relations.push(RelationHit {
                    kind: r,
                    pillars: Vec::new(),
                    note: None,
                });
            }
        }
        if rng.gen_bool(0.5) {
            input.geokguk = Geokguk::ALL.choose(rng).copied();
        }
        if rng.gen_bool(0.5) {
            input.yongsin = Some(pick(rng));
        }
        if rng.gen_bool(0.6) {
            input.current_daeun_element = Some(pick(rng));
        }
        if rng.gen_bool(0.6) {
            input.current_saeun_element = Some(pick(rng));
        }
        for s in Shinsal::ALL {
            if rng.gen_bool(0.2) {
                input.shinsal_list.push(s);
            }
        }
        if rng.gen_bool(0.7) {
            input.dominant_western_element = WesternElement::ALL.choose(rng).copied();
        }
        for p in Planet::ALL {
            if rng.gen_bool(0.6) {
                input.planet_houses.insert(p, rng.gen_range(1..=12));
            }
        }
        for a in AspectType::ALL {
            if rng.gen_bool(0.3) {
                input.aspects.push(AspectHit {
                    planet1: Planet::Sun,
                    planet2: Planet::Moon,
                    aspect_type: a,
                    orb: None,
                    angle: None,
                });
            }
        }
        for t in TransitCycle::ALL {
            if rng.gen_bool(0.25) {
                input.active_transits.push(t);
            }
        }
        for a in Asteroid::ALL {
            if rng.gen_bool(0.5) {
                input.asteroid_houses.insert(a, rng.gen_range(1..=12));
            }
        }
        for x in ExtraPoint::ALL {
            if rng.gen_bool(0.4) {
                input.extra_point_signs.insert(x, ZodiacSign::Aries);
            }
        }
        input
    }

    fn assert_bounded(report: &FusionReport) {
        let unit = 0.0..=1.0;
        let c = &report.components;
        assert!(unit.contains(&c.saju_component_score));
        assert!(unit.contains(&c.astro_component_score));
        assert!(unit.contains(&c.overlap_bridge_score));
        assert!(unit.contains(&c.data_coverage));
        assert!(unit.contains(&report.alignment_score));
        assert!(unit.contains(&report.time_overlap.overlap_strength));
        assert!((1.0..=1.3).contains(&report.time_overlap.time_overlap_weight));
        assert_eq!(report.domain_scores.len(), 5);
        for d in report.domain_scores.values() {
            assert!((0.0..=10.0).contains(&d.base_final_score));
            assert!((0.0..=10.0).contains(&d.final_score_adjusted));
            assert!(unit.contains(&d.confidence_score));
            assert!(unit.contains(&d.alignment_score));
            assert!((1.0..=1.3).contains(&d.time_overlap_weight));
            assert!(d.drivers.len() <= 3 && d.cautions.len() <= 3);
        }
        for points in report.timeline_by_domain.values() {
            assert_eq!(points.len(), 12);
            for p in points {
                assert!(unit.contains(&p.overlap_strength));
            }
        }
    }

    #[test]
    fn minimal_input_degrades_to_midpoint() {
        let input = MatrixCalculationInput::new(
            FiveElement::Wood,
            vec![FiveElement::Wood, FiveElement::Fire, FiveElement::Earth, FiveElement::Metal],
        );
        let report = calculate_fusion(&input, LayerTables::builtin(), &options());
        assert!(report.components.data_coverage < 1.0);
        for d in report.domain_scores.values() {
            assert!((d.final_score_adjusted - 5.0).abs() < 1e-9);
            assert!(d.confidence_score < 0.5);
        }
        assert!(report.insights.is_empty());
        assert_bounded(&report);
    }

    #[test]
    fn rich_input_populates_every_layer() {
        let report = calculate_fusion(&rich_input(), LayerTables::builtin(), &options());
        assert_eq!(report.layers.populated_layers(), 10);
        assert_eq!(report.components.data_coverage, 1.0);
        assert_eq!(report.layer_summaries.len(), 10);
        assert_eq!(report.insights.len(), 5);
        assert_eq!(report.start_month, "2025-01");
        assert_bounded(&report);
    }

    #[test]
    fn identical_input_gives_identical_report() {
        let a = calculate_fusion(&rich_input(), LayerTables::builtin(), &options());
        let b = calculate_fusion(&rich_input(), LayerTables::builtin(), &options());
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn profile_context_carries_no_weight() {
        let a = rich_input();
        let mut b = rich_input();
        b.profile_context = Some(ProfileContext {
            name: Some("Kim".to_string()),
            birth_date: Some("1990-03-14".to_string()),
            ..ProfileContext::default()
        });
        let ra = calculate_fusion(&a, LayerTables::builtin(), &options());
        let rb = calculate_fusion(&b, LayerTables::builtin(), &options());
        assert_eq!(ra.components, rb.components);
        assert_eq!(ra.domain_scores, rb.domain_scores);
        assert_eq!(ra.timeline, rb.timeline);
    }

    #[test]
    fn random_inputs_stay_bounded_and_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let input = random_input(&mut rng);
            let report = calculate_fusion(&input, LayerTables::builtin(), &options());
            assert_bounded(&report);
            let again = calculate_fusion(&input, LayerTables::builtin(), &options());
            assert_eq!(report, again);
        }
    }
}
