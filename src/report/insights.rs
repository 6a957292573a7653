//! Insight ranking: the most telling matched cells, ready for narration.
//!
//! A cell's significance is its distance from the neutral midpoint, scaled by how
//! much weight its layer carries in its component pool:
//!
//! `significance = |score - 5.5| / 4.5 × (0.5 + layer weight)`

use crate::domain::{Insight, InsightCategory, LayerId, LayerScoreBundle, MatrixCell};
use crate::engine::layer_attribution;

const NEUTRAL: f64 = 5.5;
const MAX_DISTANCE: f64 = 4.5;

pub fn categorize(score: u8) -> InsightCategory {
    match score {
        7..=u8::MAX => InsightCategory::Strength,
        5..=6 => InsightCategory::Balance,
        _ => InsightCategory::Caution,
    }
}

pub fn significance(layer: LayerId, score: u8) -> f64 {
    let (_, weight) = layer_attribution(layer);
    (f64::from(score) - NEUTRAL).abs() / MAX_DISTANCE * (0.5 + weight)
}

fn to_insight(layer: LayerId, cell: &MatrixCell) -> Insight {
    let score = cell.interaction.score;
    Insight {
        layer,
        row_key: cell.row_key.clone(),
        col_key: cell.col_key.clone(),
        score,
        level: cell.interaction.level,
        category: categorize(score),
        significance: significance(layer, score),
        keyword: cell.interaction.keyword.clone(),
        keyword_en: cell.interaction.keyword_en.clone(),
    }
}

/// Top `limit` cells by significance; ties keep layer order, then cell key order.
pub fn rank_insights(bundle: &LayerScoreBundle, limit: usize) -> Vec<Insight> {
    let mut candidates: Vec<Insight> = LayerId::ALL
        .into_iter()
        .filter_map(|layer| bundle.cells(layer).map(|cells| (layer, cells)))
        .flat_map(|(layer, cells)| cells.values().map(move |cell| to_insight(layer, cell)))
        .collect();

    // Stable sort: equal significance keeps the (layer, key) order built above.
    candidates.sort_by(|a, b| b.significance.total_cmp(&a.significance));
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InteractionCode, LayerCells, cell_key};

    fn cell(row: &str, col: &str, score: u8) -> (String, MatrixCell) {
        (
            cell_key(row, col),
            MatrixCell {
                row_key: row.to_string(),
                col_key: col.to_string(),
                interaction: InteractionCode::from_score(score, row, col),
            },
        )
    }

    #[test]
    fn categories_follow_score_bands() {
        assert_eq!(categorize(1), InsightCategory::Caution);
        assert_eq!(categorize(4), InsightCategory::Caution);
        assert_eq!(categorize(5), InsightCategory::Balance);
        assert_eq!(categorize(6), InsightCategory::Balance);
        assert_eq!(categorize(7), InsightCategory::Strength);
        assert_eq!(categorize(10), InsightCategory::Strength);
    }

    #[test]
    fn extremes_outrank_midpoint_cells() {
        let mut bundle = LayerScoreBundle::default();
        let stage: LayerCells = [cell("jewang", "10", 10), cell("soe", "3", 5)].into_iter().collect();
        let core: LayerCells = [cell("wood", "air", 2)].into_iter().collect();
        bundle.layers.insert(LayerId::StageHouse, stage);
        bundle.layers.insert(LayerId::ElementCore, core);

        let insights = rank_insights(&bundle, 2);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].row_key, "jewang");
        assert_eq!(insights[0].category, InsightCategory::Strength);
        assert_eq!(insights[1].row_key, "wood");
        assert_eq!(insights[1].category, InsightCategory::Caution);
    }

    #[test]
    fn heavier_layers_break_equal_distance() {
        // Same score, stageHouse (0.55) outweighs elementCore (0.25).
        assert!(significance(LayerId::StageHouse, 9) > significance(LayerId::ElementCore, 9));
        assert_eq!(significance(LayerId::ElementCore, 10), 0.75);
    }

    #[test]
    fn empty_bundle_has_no_insights() {
        assert!(rank_insights(&LayerScoreBundle::default(), 5).is_empty());
    }
}
