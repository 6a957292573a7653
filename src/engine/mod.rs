//! The fusion scoring engine.
//!
//! Pipeline (leaves first):
//!
//! - `resolver`: sparse per-layer cell resolution against the lookup tables
//! - `components`: Saju / astrology / bridge component scores and alignment
//! - `overlap`: luck-cycle × transit time overlap and its score weight
//! - `domains`: re-projection of layer means onto the five life domains
//! - `drivers`: threshold tags attached to each domain score
//! - `timeline`: deterministic twelve-month overlap curve
//! - `fusion`: the whole pipeline in one call, plus an LRU memoization `cache`
//!
//! Everything here is total: absent input degrades coverage, never errors.

pub mod cache;
pub mod components;
pub mod domains;
pub mod drivers;
pub mod fusion;
pub mod overlap;
pub mod resolver;
pub mod timeline;

pub use cache::FusionCache;
pub use components::{
    Attribution, calculate_alignment_term, derive_saju_astro_component_scores, layer_attribution,
};
pub use domains::{DOMAIN_WEIGHTS, compute_domain_scores, confidence_from};
pub use drivers::extract_drivers_and_cautions;
pub use fusion::{FusionOptions, calculate_fusion};
pub use overlap::{calculate_time_overlap_weight, time_overlap_weight_for};
pub use resolver::{resolve_all, resolve_layer};
pub use timeline::{
    canonical_scoring_json, classify_peak, generate_monthly_overlap_timeline, generate_timeline_by_domain,
};
