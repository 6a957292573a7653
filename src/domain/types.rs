//! Input record and output value objects.
//!
//! These types are intentionally plain and serializable so they can be:
//!
//! - read from the JSON emitted by the upstream Saju/astrology calculators
//! - handed to the report assembler as nested data
//! - exported to JSON and reloaded later
//!
//! Every map is a `BTreeMap` so serialization order is stable; the timeline noise
//! hash depends on it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::symbols::*;

/// A relation detected between two or more pillars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationHit {
    pub kind: RelationKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pillars: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A natal aspect between two planets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectHit {
    pub planet1: Planet,
    pub planet2: Planet,
    #[serde(rename = "type")]
    pub aspect_type: AspectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

/// Birth metadata carried along for the narrative layer. Never scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The single input record of a fusion calculation.
///
/// Only `day_master_element` and `pillar_elements` are required; every other
/// field may be absent, which lowers coverage but never fails the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCalculationInput {
    pub day_master_element: FiveElement,
    pub pillar_elements: Vec<FiveElement>,
    #[serde(default)]
    pub sibsin_distribution: BTreeMap<Sibsin, u32>,
    #[serde(default)]
    pub twelve_stages: BTreeMap<TwelveStage, u32>,
    #[serde(default)]
    pub relations: Vec<RelationHit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geokguk: Option<Geokguk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yongsin: Option<FiveElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_daeun_element: Option<FiveElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_saeun_element: Option<FiveElement>,
    #[serde(default)]
    pub shinsal_list: Vec<Shinsal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_western_element: Option<WesternElement>,
    #[serde(default)]
    pub planet_houses: BTreeMap<Planet, u8>,
    #[serde(default)]
    pub planet_signs: BTreeMap<Planet, ZodiacSign>,
    #[serde(default)]
    pub aspects: Vec<AspectHit>,
    #[serde(default)]
    pub active_transits: Vec<TransitCycle>,
    /// Progression techniques in play; empty means "all of them".
    #[serde(default)]
    pub active_progressions: Vec<ProgressionType>,
    #[serde(default)]
    pub asteroid_houses: BTreeMap<Asteroid, u8>,
    #[serde(default)]
    pub extra_point_signs: BTreeMap<ExtraPoint, ZodiacSign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_context: Option<ProfileContext>,
}

impl MatrixCalculationInput {
    /// Minimal input: only the required fields, everything optional absent.
    pub fn new(day_master_element: FiveElement, pillar_elements: Vec<FiveElement>) -> Self {
        Self {
            day_master_element,
            pillar_elements,
            sibsin_distribution: BTreeMap::new(),
            twelve_stages: BTreeMap::new(),
            relations: Vec::new(),
            geokguk: None,
            yongsin: None,
            current_daeun_element: None,
            current_saeun_element: None,
            shinsal_list: Vec::new(),
            dominant_western_element: None,
            planet_houses: BTreeMap::new(),
            planet_signs: BTreeMap::new(),
            aspects: Vec::new(),
            active_transits: Vec::new(),
            active_progressions: Vec::new(),
            asteroid_houses: BTreeMap::new(),
            extra_point_signs: BTreeMap::new(),
            profile_context: None,
        }
    }

    /// Distinct elements of the day master and the four pillars.
    pub fn saju_elements(&self) -> BTreeSet<FiveElement> {
        std::iter::once(self.day_master_element)
            .chain(self.pillar_elements.iter().copied())
            .collect()
    }

    /// Distinct elements of the currently active luck cycles (daeun, saeun).
    pub fn luck_cycle_elements(&self) -> BTreeSet<FiveElement> {
        self.current_daeun_element
            .into_iter()
            .chain(self.current_saeun_element)
            .collect()
    }

    pub fn active_sibsin(&self) -> BTreeSet<Sibsin> {
        self.sibsin_distribution
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(s, _)| *s)
            .collect()
    }

    pub fn active_stages(&self) -> BTreeSet<TwelveStage> {
        self.twelve_stages
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(s, _)| *s)
            .collect()
    }

    /// Planets with either a house or a sign placement.
    pub fn present_planets(&self) -> BTreeSet<Planet> {
        self.planet_houses
            .keys()
            .chain(self.planet_signs.keys())
            .copied()
            .collect()
    }

    /// Houses occupied by at least one planet (raw values, unvalidated).
    pub fn occupied_houses(&self) -> BTreeSet<u8> {
        self.planet_houses.values().copied().collect()
    }

    pub fn relation_kinds(&self) -> BTreeSet<RelationKind> {
        self.relations.iter().map(|r| r.kind).collect()
    }

    pub fn aspect_types(&self) -> BTreeSet<AspectType> {
        self.aspects.iter().map(|a| a.aspect_type).collect()
    }

    pub fn transit_set(&self) -> BTreeSet<TransitCycle> {
        self.active_transits.iter().copied().collect()
    }

    /// Progressions in play; all six when none are listed.
    pub fn progression_set(&self) -> BTreeSet<ProgressionType> {
        if self.active_progressions.is_empty() {
            ProgressionType::ALL.into_iter().collect()
        } else {
            self.active_progressions.iter().copied().collect()
        }
    }

    pub fn shinsal_set(&self) -> BTreeSet<Shinsal> {
        self.shinsal_list.iter().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// Layer cells
// ---------------------------------------------------------------------------

/// The ten cross-reference layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerId {
    ElementCore,
    SibsinPlanet,
    SibsinHouse,
    TimingOverlay,
    RelationAspect,
    StageHouse,
    AdvancedAnalysis,
    ShinsalPlanet,
    AsteroidHouse,
    ExtraPointSibsin,
}

impl LayerId {
    pub const ALL: [LayerId; 10] = [
        LayerId::ElementCore,
        LayerId::SibsinPlanet,
        LayerId::SibsinHouse,
        LayerId::TimingOverlay,
        LayerId::RelationAspect,
        LayerId::StageHouse,
        LayerId::AdvancedAnalysis,
        LayerId::ShinsalPlanet,
        LayerId::AsteroidHouse,
        LayerId::ExtraPointSibsin,
    ];

    /// 1-based layer number.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// 0-based row of this layer in the fixed weight tables.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            LayerId::ElementCore => "elementCore",
            LayerId::SibsinPlanet => "sibsinPlanet",
            LayerId::SibsinHouse => "sibsinHouse",
            LayerId::TimingOverlay => "timingOverlay",
            LayerId::RelationAspect => "relationAspect",
            LayerId::StageHouse => "stageHouse",
            LayerId::AdvancedAnalysis => "advancedAnalysis",
            LayerId::ShinsalPlanet => "shinsalPlanet",
            LayerId::AsteroidHouse => "asteroidHouse",
            LayerId::ExtraPointSibsin => "extraPointSibsin",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LayerId::ElementCore => "Element Core",
            LayerId::SibsinPlanet => "Sibsin x Planet",
            LayerId::SibsinHouse => "Sibsin x House",
            LayerId::TimingOverlay => "Timing Overlay",
            LayerId::RelationAspect => "Relation x Aspect",
            LayerId::StageHouse => "Life Stage x House",
            LayerId::AdvancedAnalysis => "Pattern x Progression",
            LayerId::ShinsalPlanet => "Marker x Planet",
            LayerId::AsteroidHouse => "Asteroid x House",
            LayerId::ExtraPointSibsin => "Extra Point x Sibsin",
        }
    }
}

/// Qualitative interaction level of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionLevel {
    Conflict,
    Clash,
    Balance,
    Amplify,
    Extreme,
}

impl InteractionLevel {
    /// 1–2 conflict, 3–4 clash, 5–6 balance, 7–8 amplify, 9–10 extreme.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => InteractionLevel::Conflict,
            3..=4 => InteractionLevel::Clash,
            5..=6 => InteractionLevel::Balance,
            7..=8 => InteractionLevel::Amplify,
            _ => InteractionLevel::Extreme,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            InteractionLevel::Conflict => "⚔",
            InteractionLevel::Clash => "⚡",
            InteractionLevel::Balance => "⚖",
            InteractionLevel::Amplify => "✨",
            InteractionLevel::Extreme => "🔥",
        }
    }

    pub fn color_code(self) -> &'static str {
        match self {
            InteractionLevel::Conflict => "#c0392b",
            InteractionLevel::Clash => "#e67e22",
            InteractionLevel::Balance => "#7f8c8d",
            InteractionLevel::Amplify => "#27ae60",
            InteractionLevel::Extreme => "#8e44ad",
        }
    }

    pub fn keyword_ko(self) -> &'static str {
        match self {
            InteractionLevel::Conflict => "충돌",
            InteractionLevel::Clash => "긴장",
            InteractionLevel::Balance => "균형",
            InteractionLevel::Amplify => "증폭",
            InteractionLevel::Extreme => "극대화",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            InteractionLevel::Conflict => "conflicts with",
            InteractionLevel::Clash => "strains",
            InteractionLevel::Balance => "balances",
            InteractionLevel::Amplify => "amplifies",
            InteractionLevel::Extreme => "surges with",
        }
    }
}

/// One lookup-table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionCode {
    pub level: InteractionLevel,
    /// 1..=10
    pub score: u8,
    pub icon: String,
    pub color_code: String,
    pub keyword: String,
    pub keyword_en: String,
}

impl InteractionCode {
    /// Build a code from a score; level, icon, color and keywords derive from it.
    pub fn from_score(score: u8, row: &str, col: &str) -> Self {
        let score = score.clamp(1, 10);
        let level = InteractionLevel::from_score(score);
        Self {
            level,
            score,
            icon: level.icon().to_string(),
            color_code: level.color_code().to_string(),
            keyword: format!("{row}·{col} {}", level.keyword_ko()),
            keyword_en: format!("{row} {} {col}", level.verb()),
        }
    }
}

/// One materialized cell: a matched (row, col) pair of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCell {
    pub row_key: String,
    pub col_key: String,
    pub interaction: InteractionCode,
}

impl MatrixCell {
    /// Score normalized to `[0.1, 1.0]`.
    pub fn normalized(&self) -> f64 {
        f64::from(self.interaction.score) / 10.0
    }
}

/// Sparse map of cell key (`"{row}_{col}"`) → cell.
pub type LayerCells = BTreeMap<String, MatrixCell>;

pub fn cell_key(row: &str, col: &str) -> String {
    format!("{row}_{col}")
}

/// All ten resolved layers of one calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerScoreBundle {
    pub layers: BTreeMap<LayerId, LayerCells>,
}

impl LayerScoreBundle {
    /// Cells of a layer; `None` behaves like an empty layer everywhere.
    pub fn cells(&self, layer: LayerId) -> Option<&LayerCells> {
        self.layers.get(&layer)
    }

    pub fn cell_count(&self, layer: LayerId) -> usize {
        self.cells(layer).map_or(0, |c| c.len())
    }

    pub fn is_populated(&self, layer: LayerId) -> bool {
        self.cell_count(layer) > 0
    }

    /// Mean of `score / 10` over the layer's cells; 0 for an empty layer.
    pub fn layer_mean(&self, layer: LayerId) -> f64 {
        let Some(cells) = self.cells(layer) else {
            return 0.0;
        };
        let values: Vec<f64> = cells.values().map(MatrixCell::normalized).collect();
        crate::math::mean(&values)
    }

    pub fn populated_layers(&self) -> usize {
        LayerId::ALL.iter().filter(|l| self.is_populated(**l)).count()
    }

    pub fn total_cells(&self) -> usize {
        self.layers.values().map(|c| c.len()).sum()
    }
}

/// Per-layer summary row for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSummary {
    pub layer: LayerId,
    pub cell_count: usize,
    pub mean: f64,
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// The two system-component scores plus bridge and coverage, all in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedComponentScores {
    pub saju_component_score: f64,
    pub astro_component_score: f64,
    pub overlap_bridge_score: f64,
    pub data_coverage: f64,
}

/// Time-overlap result with its blended sub-terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOverlap {
    pub overlap_strength: f64,
    /// Always within `[1.0, 1.3]`.
    pub time_overlap_weight: f64,
    pub element_overlap: f64,
    pub strong_signal: f64,
    pub progression_density: f64,
    pub timing_density: f64,
}

/// Score record of one life domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainScore {
    pub domain: Domain,
    /// 0..=10
    pub base_final_score: f64,
    /// 0..=10
    pub final_score_adjusted: f64,
    pub saju_component_score: f64,
    pub astro_component_score: f64,
    pub alignment_score: f64,
    pub overlap_strength: f64,
    pub time_overlap_weight: f64,
    pub confidence_score: f64,
    pub drivers: Vec<String>,
    pub cautions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PeakLevel {
    Normal,
    High,
    Peak,
}

/// One month of the overlap timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOverlapPoint {
    /// `YYYY-MM`
    pub month: String,
    pub overlap_strength: f64,
    pub time_overlap_weight: f64,
    pub peak_level: PeakLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalLevel {
    High,
    Medium,
    Caution,
}

/// Human-facing calendar signal derived from scores and timelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSignal {
    pub level: SignalLevel,
    pub trigger: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightCategory {
    Strength,
    Caution,
    Balance,
}

/// A ranked cell, ready for narration, with source attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub layer: LayerId,
    pub row_key: String,
    pub col_key: String,
    pub score: u8,
    pub level: InteractionLevel,
    pub category: InsightCategory,
    pub significance: f64,
    pub keyword: String,
    pub keyword_en: String,
}

/// Everything a single calculation produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionReport {
    pub start_month: String,
    pub layers: LayerScoreBundle,
    pub layer_summaries: Vec<LayerSummary>,
    pub components: DerivedComponentScores,
    pub alignment_score: f64,
    pub time_overlap: TimeOverlap,
    pub domain_scores: BTreeMap<Domain, DomainScore>,
    pub timeline: Vec<MonthlyOverlapPoint>,
    pub timeline_by_domain: BTreeMap<Domain, Vec<MonthlyOverlapPoint>>,
    pub signals: Vec<CalendarSignal>,
    pub insights: Vec<Insight>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_bands_cover_the_score_range() {
        assert_eq!(InteractionLevel::from_score(1), InteractionLevel::Conflict);
        assert_eq!(InteractionLevel::from_score(4), InteractionLevel::Clash);
        assert_eq!(InteractionLevel::from_score(6), InteractionLevel::Balance);
        assert_eq!(InteractionLevel::from_score(7), InteractionLevel::Amplify);
        assert_eq!(InteractionLevel::from_score(10), InteractionLevel::Extreme);
    }

    #[test]
    fn interaction_code_clamps_score() {
        let code = InteractionCode::from_score(14, "wood", "fire");
        assert_eq!(code.score, 10);
        assert_eq!(code.level, InteractionLevel::Extreme);
        assert_eq!(code.keyword_en, "wood surges with fire");
    }

    #[test]
    fn minimal_input_parses_with_korean_elements() {
        let json = r#"{"dayMasterElement":"목","pillarElements":["목","화","토","금"]}"#;
        let input: MatrixCalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.day_master_element, FiveElement::Wood);
        assert_eq!(input.pillar_elements.len(), 4);
        assert!(input.active_transits.is_empty());
        assert!(input.profile_context.is_none());
    }

    #[test]
    fn enum_keyed_maps_round_trip() {
        let mut input = MatrixCalculationInput::new(FiveElement::Fire, vec![FiveElement::Fire; 4]);
        input.planet_houses.insert(Planet::Venus, 7);
        input.sibsin_distribution.insert(Sibsin::Jeongjae, 2);
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"venus\":7"));
        let back: MatrixCalculationInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn empty_bundle_means_are_zero() {
        let bundle = LayerScoreBundle::default();
        for layer in LayerId::ALL {
            assert_eq!(bundle.layer_mean(layer), 0.0);
        }
        assert_eq!(bundle.populated_layers(), 0);
    }

    #[test]
    fn progressions_default_to_all() {
        let input = MatrixCalculationInput::new(FiveElement::Wood, vec![FiveElement::Wood; 4]);
        assert_eq!(input.progression_set().len(), 6);
    }
}
