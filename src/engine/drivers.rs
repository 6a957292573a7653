//! Driver / caution tags for a domain score.

const MAX_TAGS: usize = 3;

pub const HIGH_AGREEMENT: &str = "High cross-system agreement";
pub const STRONG_TIMING: &str = "Strong timing convergence";
pub const ELEMENTAL_RESONANCE: &str = "Elemental resonance detected";
pub const SYSTEM_DISAGREEMENT: &str = "System disagreement";
pub const LOW_CONFIDENCE: &str = "Low data confidence";

/// Threshold classifier over the four scalars; returns `(drivers, cautions)`,
/// each in evaluation order and capped at three.
pub fn extract_drivers_and_cautions(
    alignment_score: f64,
    time_overlap_weight: f64,
    overlap_strength: f64,
    confidence_score: f64,
) -> (Vec<String>, Vec<String>) {
    let drivers = [
        (alignment_score > 0.75, HIGH_AGREEMENT),
        (time_overlap_weight > 1.15, STRONG_TIMING),
        (overlap_strength > 0.6, ELEMENTAL_RESONANCE),
    ];
    let cautions = [
        (alignment_score < 0.4, SYSTEM_DISAGREEMENT),
        (confidence_score < 0.5, LOW_CONFIDENCE),
    ];

    (collect(&drivers), collect(&cautions))
}

fn collect(rules: &[(bool, &str)]) -> Vec<String> {
    rules
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, tag)| tag.to_string())
        .take(MAX_TAGS)
        .collect()
}
