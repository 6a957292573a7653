//! Matrix Cell Resolver.
//!
//! For each layer, only rows and columns actually present in the input are
//! crossed against the lookup table; the result is a sparse cell map. Pairs the
//! table does not know (e.g. a house outside `1..=12`) are skipped.

use crate::data::builtin::yongsin_row_key;
use crate::data::{LayerTable, LayerTables};
use crate::domain::{LayerCells, LayerId, LayerScoreBundle, MatrixCalculationInput, MatrixCell, cell_key, house_key};

/// Resolve one layer of `input` against its table.
pub fn resolve_layer(layer: LayerId, input: &MatrixCalculationInput, table: &LayerTable) -> LayerCells {
    let mut cells = LayerCells::new();
    if table.layer != layer {
        tracing::warn!(
            layer = layer.key(),
            table = table.layer.key(),
            "table does not belong to layer; resolving empty"
        );
        return cells;
    }

    for (row, col) in candidate_pairs(layer, input) {
        let Some(code) = table.lookup(&row, &col) else {
            continue;
        };
        cells.insert(
            cell_key(&row, &col),
            MatrixCell {
                row_key: row,
                col_key: col,
                interaction: code.clone(),
            },
        );
    }
    cells
}

/// Resolve all ten layers. A layer without a table resolves empty.
pub fn resolve_all(input: &MatrixCalculationInput, tables: &LayerTables) -> LayerScoreBundle {
    let mut bundle = LayerScoreBundle::default();
    for layer in LayerId::ALL {
        let cells = match tables.table(layer) {
            Some(table) => resolve_layer(layer, input, table),
            None => LayerCells::new(),
        };
        tracing::debug!(layer = layer.key(), cells = cells.len(), "resolved layer");
        bundle.layers.insert(layer, cells);
    }
    bundle
}

/// (row, col) keys that apply to this person for one layer.
fn candidate_pairs(layer: LayerId, input: &MatrixCalculationInput) -> Vec<(String, String)> {
    match layer {
        LayerId::ElementCore => cross(
            input.saju_elements().iter().map(|e| e.key().to_string()),
            input.dominant_western_element.map(|w| w.key().to_string()),
        ),
        LayerId::SibsinPlanet => cross(
            input.active_sibsin().iter().map(|s| s.key().to_string()),
            input.present_planets().iter().map(|p| p.key().to_string()),
        ),
        LayerId::SibsinHouse => cross(
            input.active_sibsin().iter().map(|s| s.key().to_string()),
            input.occupied_houses().iter().map(|h| house_key(*h)),
        ),
        LayerId::TimingOverlay => cross(
            input.luck_cycle_elements().iter().map(|e| e.key().to_string()),
            input.transit_set().iter().map(|t| t.key().to_string()),
        ),
        LayerId::RelationAspect => cross(
            input.relation_kinds().iter().map(|r| r.key().to_string()),
            input.aspect_types().iter().map(|a| a.key().to_string()),
        ),
        LayerId::StageHouse => cross(
            input.active_stages().iter().map(|s| s.key().to_string()),
            input.occupied_houses().iter().map(|h| house_key(*h)),
        ),
        LayerId::AdvancedAnalysis => {
            let rows = input
                .geokguk
                .map(|g| g.key().to_string())
                .into_iter()
                .chain(input.yongsin.map(yongsin_row_key));
            cross(rows, input.progression_set().iter().map(|p| p.key().to_string()))
        }
        LayerId::ShinsalPlanet => cross(
            input.shinsal_set().iter().map(|s| s.key().to_string()),
            input.present_planets().iter().map(|p| p.key().to_string()),
        ),
        LayerId::AsteroidHouse => input
            .asteroid_houses
            .iter()
            .map(|(asteroid, house)| (asteroid.key().to_string(), house_key(*house)))
            .collect(),
        LayerId::ExtraPointSibsin => cross(
            input.extra_point_signs.keys().map(|x| x.key().to_string()),
            input.active_sibsin().iter().map(|s| s.key().to_string()),
        ),
    }
}

fn cross(
    rows: impl IntoIterator<Item = String>,
    cols: impl IntoIterator<Item = String>,
) -> Vec<(String, String)> {
    let cols: Vec<String> = cols.into_iter().collect();
    let mut out = Vec::new();
    for row in rows {
        for col in &cols {
            out.push((row.clone(), col.clone()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Asteroid, FiveElement, Geokguk, Planet, Sibsin, TransitCycle, TwelveStage, WesternElement,
    };

    fn base_input() -> MatrixCalculationInput {
        MatrixCalculationInput::new(
            FiveElement::Wood,
            vec![FiveElement::Wood, FiveElement::Fire, FiveElement::Earth, FiveElement::Metal],
        )
    }

    #[test]
    fn minimal_input_resolves_every_layer_empty() {
        let bundle = resolve_all(&base_input(), LayerTables::builtin());
        assert_eq!(bundle.layers.len(), 10);
        assert_eq!(bundle.total_cells(), 0);
    }

    #[test]
    fn element_core_crosses_only_dominant_element() {
        let mut input = base_input();
        input.dominant_western_element = Some(WesternElement::Water);
        let table = LayerTables::builtin().table(LayerId::ElementCore).unwrap();
        let cells = resolve_layer(LayerId::ElementCore, &input, table);
        // Four distinct Saju elements × one Western element.
        assert_eq!(cells.len(), 4);
        assert!(cells.contains_key("wood_water"));
        assert!(cells.keys().all(|k| k.ends_with("_water")));
    }

    #[test]
    fn zero_counts_do_not_produce_rows() {
        let mut input = base_input();
        input.sibsin_distribution.insert(Sibsin::Jeonggwan, 2);
        input.sibsin_distribution.insert(Sibsin::Pyeonjae, 0);
        input.planet_houses.insert(Planet::Saturn, 10);
        input.planet_houses.insert(Planet::Venus, 10);
        input.twelve_stages.insert(TwelveStage::Jewang, 1);

        let bundle = resolve_all(&input, LayerTables::builtin());
        assert_eq!(bundle.cell_count(LayerId::SibsinPlanet), 2);
        // Both planets share house 10.
        assert_eq!(bundle.cell_count(LayerId::SibsinHouse), 1);
        assert!(bundle.cells(LayerId::SibsinHouse).unwrap().contains_key("jeonggwan_10"));
        assert_eq!(bundle.cell_count(LayerId::StageHouse), 1);
    }

    #[test]
    fn out_of_range_house_is_no_match() {
        let mut input = base_input();
        input.twelve_stages.insert(TwelveStage::Jangsaeng, 1);
        input.planet_houses.insert(Planet::Sun, 13);
        input.asteroid_houses.insert(Asteroid::Juno, 0);
        let bundle = resolve_all(&input, LayerTables::builtin());
        assert_eq!(bundle.cell_count(LayerId::StageHouse), 0);
        assert_eq!(bundle.cell_count(LayerId::AsteroidHouse), 0);
    }

    #[test]
    fn asteroids_cross_only_their_own_house() {
        let mut input = base_input();
        input.asteroid_houses.insert(Asteroid::Juno, 7);
        input.asteroid_houses.insert(Asteroid::Ceres, 1);
        let bundle = resolve_all(&input, LayerTables::builtin());
        let cells = bundle.cells(LayerId::AsteroidHouse).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells["juno_7"].interaction.score, 8);
    }

    #[test]
    fn advanced_layer_defaults_to_all_progressions() {
        let mut input = base_input();
        input.geokguk = Some(Geokguk::Jeonggwan);
        input.yongsin = Some(FiveElement::Water);
        let bundle = resolve_all(&input, LayerTables::builtin());
        assert_eq!(bundle.cell_count(LayerId::AdvancedAnalysis), 12);

        input.active_progressions = vec![crate::domain::ProgressionType::SolarArc];
        let bundle = resolve_all(&input, LayerTables::builtin());
        let cells = bundle.cells(LayerId::AdvancedAnalysis).unwrap();
        assert_eq!(cells.len(), 2);
        assert!(cells.contains_key("yongsin_water_solarArc"));
    }

    #[test]
    fn timing_overlay_uses_distinct_luck_elements() {
        let mut input = base_input();
        input.current_daeun_element = Some(FiveElement::Fire);
        input.current_saeun_element = Some(FiveElement::Fire);
        input.active_transits = vec![TransitCycle::MarsRetrograde, TransitCycle::SaturnReturn];
        let bundle = resolve_all(&input, LayerTables::builtin());
        assert_eq!(bundle.cell_count(LayerId::TimingOverlay), 2);
    }

    #[test]
    fn mismatched_table_resolves_empty() {
        let mut input = base_input();
        input.dominant_western_element = Some(WesternElement::Fire);
        let wrong = LayerTables::builtin().table(LayerId::StageHouse).unwrap();
        assert!(resolve_layer(LayerId::ElementCore, &input, wrong).is_empty());
    }
}
