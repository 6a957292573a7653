//! Built-in layer tables.
//!
//! Rather than shipping ten hand-typed matrices, each table is derived from the
//! symbolic structure carried by the axes:
//!
//! - element and role-family pairs score by their position on the generating /
//!   controlling cycle (`CycleRelation::base_score`)
//! - houses modulate by modality (angular > succedent > cadent)
//! - relations × aspects combine their harmony polarities
//! - markers × planets use the marker's nature and planet affinity
//!
//! Every raw score is shaped around the neutral midpoint (5.5) by an intensity
//! factor, rounded, and clamped into `1..=10`.

use std::collections::BTreeMap;

use crate::data::tables::{LayerTable, LayerTables};
use crate::domain::{
    AspectType, Asteroid, ExtraPoint, FiveElement, Geokguk, HouseModality, InteractionCode, LayerId,
    Planet, ProgressionType, RelationKind, Shinsal, ShinsalNature, Sibsin, TransitCycle, TwelveStage,
    WesternElement, house_family, house_key,
};

/// Version tag of the built-in table set.
pub const BUILTIN_VERSION: &str = "builtin-1";

/// Neutral midpoint of the 1..10 score scale.
const NEUTRAL: f64 = 5.5;

const HOUSES: [u8; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// Row key used by the advanced-analysis layer for the yongsin element.
pub fn yongsin_row_key(element: FiveElement) -> String {
    format!("yongsin_{}", element.key())
}

/// Build all ten built-in tables.
pub fn build_tables() -> LayerTables {
    let tables = vec![
        element_core(),
        sibsin_planet(),
        sibsin_house(),
        timing_overlay(),
        relation_aspect(),
        stage_house(),
        advanced_analysis(),
        shinsal_planet(),
        asteroid_house(),
        extra_point_sibsin(),
    ];

    LayerTables {
        version: BUILTIN_VERSION.to_string(),
        tables: tables.into_iter().map(|t| (t.layer, t)).collect(),
    }
}

/// Shape a raw score around the midpoint and round into `1..=10`.
fn shaped(raw: f64, intensity: f64) -> u8 {
    (NEUTRAL + (raw - NEUTRAL) * intensity).round().clamp(1.0, 10.0) as u8
}

fn build<R, C>(
    layer: LayerId,
    rows: &[R],
    cols: &[C],
    row_key: impl Fn(&R) -> String,
    col_key: impl Fn(&C) -> String,
    score: impl Fn(&R, &C) -> u8,
) -> LayerTable {
    let row_keys: Vec<String> = rows.iter().map(&row_key).collect();
    let col_keys: Vec<String> = cols.iter().map(&col_key).collect();

    let mut cells = BTreeMap::new();
    for (r, rk) in rows.iter().zip(&row_keys) {
        let mut line = BTreeMap::new();
        for (c, ck) in cols.iter().zip(&col_keys) {
            line.insert(ck.clone(), InteractionCode::from_score(score(r, c), rk, ck));
        }
        cells.insert(rk.clone(), line);
    }

    LayerTable {
        layer,
        rows: row_keys,
        cols: col_keys,
        cells,
    }
}

fn element_core() -> LayerTable {
    build(
        LayerId::ElementCore,
        &FiveElement::ALL,
        &WesternElement::ALL,
        |e| e.key().to_string(),
        |w| w.key().to_string(),
        |e, w| shaped(e.relation_to(w.to_five()).base_score(), 1.0),
    )
}

fn sibsin_planet() -> LayerTable {
    build(
        LayerId::SibsinPlanet,
        &Sibsin::ALL,
        &Planet::ALL,
        |s| s.key().to_string(),
        |p| p.key().to_string(),
        |s, p| {
            let intensity = if s.is_direct() { 1.0 } else { 1.2 };
            shaped(s.family().relation_to(p.family()).base_score(), intensity)
        },
    )
}

fn sibsin_house() -> LayerTable {
    build(
        LayerId::SibsinHouse,
        &Sibsin::ALL,
        &HOUSES,
        |s| s.key().to_string(),
        |h| house_key(*h),
        |s, h| match (house_family(*h), HouseModality::of(*h)) {
            (Some(family), Some(modality)) => {
                shaped(s.family().relation_to(family).base_score(), modality.intensity())
            }
            _ => shaped(NEUTRAL, 1.0),
        },
    )
}

fn timing_overlay() -> LayerTable {
    build(
        LayerId::TimingOverlay,
        &FiveElement::ALL,
        &TransitCycle::ALL,
        |e| e.key().to_string(),
        |t| t.key().to_string(),
        |e, t| {
            let intensity = if t.is_high_impact() {
                1.3
            } else if t.is_retrograde() {
                0.9
            } else {
                1.1
            };
            shaped(e.relation_to(t.western_element().to_five()).base_score(), intensity)
        },
    )
}

fn relation_aspect() -> LayerTable {
    build(
        LayerId::RelationAspect,
        &RelationKind::ALL,
        &AspectType::ALL,
        |r| r.key().to_string(),
        |a| a.key().to_string(),
        |r, a| {
            let raw = match a {
                AspectType::Conjunction => NEUTRAL + 2.0 * r.polarity(),
                _ => NEUTRAL + 1.1 * (r.polarity() + a.polarity()),
            };
            shaped(raw, 1.0)
        },
    )
}

fn stage_house() -> LayerTable {
    build(
        LayerId::StageHouse,
        &TwelveStage::ALL,
        &HOUSES,
        |s| s.key().to_string(),
        |h| house_key(*h),
        |s, h| {
            let intensity = HouseModality::of(*h).map_or(1.0, HouseModality::intensity);
            shaped(s.vigor(), intensity)
        },
    )
}

#[derive(Debug, Clone, Copy)]
enum PatternRow {
    Pattern(Geokguk),
    Yongsin(FiveElement),
}

fn advanced_analysis() -> LayerTable {
    let rows: Vec<PatternRow> = Geokguk::ALL
        .into_iter()
        .map(PatternRow::Pattern)
        .chain(FiveElement::ALL.into_iter().map(PatternRow::Yongsin))
        .collect();

    build(
        LayerId::AdvancedAnalysis,
        &rows,
        &ProgressionType::ALL,
        |r| match r {
            PatternRow::Pattern(g) => g.key().to_string(),
            PatternRow::Yongsin(e) => yongsin_row_key(*e),
        },
        |p| p.key().to_string(),
        |r, p| match r {
            PatternRow::Pattern(g) => match g.family() {
                Some(family) => shaped(family.relation_to(p.family()).base_score(), 1.0),
                None => 6,
            },
            PatternRow::Yongsin(e) => shaped(e.relation_to(p.element()).base_score(), 1.0),
        },
    )
}

fn shinsal_planet() -> LayerTable {
    build(
        LayerId::ShinsalPlanet,
        &Shinsal::ALL,
        &Planet::ALL,
        |s| s.key().to_string(),
        |p| p.key().to_string(),
        |s, p| {
            let affine = s.affine_planets().contains(p);
            match (s.nature(), affine) {
                (ShinsalNature::Auspicious, true) => 9,
                (ShinsalNature::Mixed, true) => 7,
                (ShinsalNature::Harsh, true) => 2,
                (ShinsalNature::Auspicious, false) => 6,
                (ShinsalNature::Mixed, false) => 5,
                (ShinsalNature::Harsh, false) => 4,
            }
        },
    )
}

fn asteroid_house() -> LayerTable {
    build(
        LayerId::AsteroidHouse,
        &Asteroid::ALL,
        &HOUSES,
        |a| a.key().to_string(),
        |h| house_key(*h),
        |a, h| {
            let homes = a.home_houses();
            if homes.contains(h) {
                8
            } else if homes.iter().any(|home| opposite_house(*home) == *h) {
                4
            } else if HouseModality::of(*h) == Some(HouseModality::Angular) {
                6
            } else {
                5
            }
        },
    )
}

fn extra_point_sibsin() -> LayerTable {
    build(
        LayerId::ExtraPointSibsin,
        &ExtraPoint::ALL,
        &Sibsin::ALL,
        |x| x.key().to_string(),
        |s| s.key().to_string(),
        |x, s| {
            let intensity = if x.is_volatile() { 1.2 } else { 1.0 };
            shaped(x.family().relation_to(s.family()).base_score(), intensity)
        },
    )
}

fn opposite_house(house: u8) -> u8 {
    (house + 5) % 12 + 1
}
