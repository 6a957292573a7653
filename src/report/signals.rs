//! Calendar Signal Deriver.
//!
//! A thin view over domain scores and per-domain timelines; no new scoring.

use std::collections::BTreeMap;

use crate::domain::{CalendarSignal, Domain, DomainScore, MonthlyOverlapPoint, PeakLevel, SignalLevel};
use crate::engine::confidence_from;
use crate::engine::drivers::{LOW_CONFIDENCE, SYSTEM_DISAGREEMENT};

pub const PEAK_CONVERGENCE_WINDOW: &str = "Peak Convergence Window";

const PEAK_SCORE: f64 = 7.0;
const PEAK_WEIGHT: f64 = 1.15;
const DISAGREEMENT_BELOW: f64 = 0.4;
const LOW_CONFIDENCE_BELOW: f64 = 0.5;

/// Signals sorted high → medium → caution, then by score descending.
///
/// Scores are on the 0..10 scale: domain scores as-is, overlap strengths and the
/// caution ratios × 10. Cautions are raised per domain from that domain's
/// alignment and confidence, and once globally (`domain: None`).
pub fn derive_calendar_signals(
    domain_scores: &BTreeMap<Domain, DomainScore>,
    timeline_by_domain: &BTreeMap<Domain, Vec<MonthlyOverlapPoint>>,
    alignment_score: f64,
    data_coverage: f64,
) -> Vec<CalendarSignal> {
    let mut signals = Vec::new();

    for (domain, score) in domain_scores {
        if score.final_score_adjusted >= PEAK_SCORE && score.time_overlap_weight >= PEAK_WEIGHT {
            signals.push(CalendarSignal {
                level: SignalLevel::High,
                trigger: PEAK_CONVERGENCE_WINDOW.to_string(),
                score: score.final_score_adjusted,
                domain: Some(*domain),
                month: None,
            });
        }
    }

    for (domain, points) in timeline_by_domain {
        for p in points {
            let (level, trigger) = match p.peak_level {
                PeakLevel::Peak => (
                    SignalLevel::High,
                    format!("{} convergence peak {}", domain.display_name(), p.month),
                ),
                PeakLevel::High => (
                    SignalLevel::Medium,
                    format!("{} rising window {}", domain.display_name(), p.month),
                ),
                PeakLevel::Normal => continue,
            };
            signals.push(CalendarSignal {
                level,
                trigger,
                score: p.overlap_strength * 10.0,
                domain: Some(*domain),
                month: Some(p.month.clone()),
            });
        }
    }

    for (domain, score) in domain_scores {
        if score.alignment_score < DISAGREEMENT_BELOW {
            signals.push(caution(SYSTEM_DISAGREEMENT, score.alignment_score, Some(*domain)));
        }
        if score.confidence_score < LOW_CONFIDENCE_BELOW {
            signals.push(caution(LOW_CONFIDENCE, score.confidence_score, Some(*domain)));
        }
    }

    if alignment_score < DISAGREEMENT_BELOW {
        signals.push(caution(SYSTEM_DISAGREEMENT, alignment_score, None));
    }
    let confidence = confidence_from(data_coverage, alignment_score);
    if confidence < LOW_CONFIDENCE_BELOW {
        signals.push(caution(LOW_CONFIDENCE, confidence, None));
    }

    signals.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| a.trigger.cmp(&b.trigger))
    });
    signals
}

fn caution(label: &str, ratio: f64, domain: Option<Domain>) -> CalendarSignal {
    let trigger = match domain {
        Some(domain) => format!("{} {}", domain.display_name(), label.to_lowercase()),
        None => label.to_string(),
    };
    CalendarSignal {
        level: SignalLevel::Caution,
        trigger,
        score: ratio * 10.0,
        domain,
        month: None,
    }
}
