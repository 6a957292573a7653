//! Bounded memoization of full fusion reports, backed by moka.
//!
//! The cache is a pure wrapper: a hit returns exactly what `calculate_fusion`
//! would have produced. Keys combine the table version, the resolved start month,
//! the insight limit and the canonical scoring JSON (so `profileContext` never
//! splits entries).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;

use crate::data::LayerTables;
use crate::domain::{FusionReport, MatrixCalculationInput};
use crate::engine::fusion::{FusionOptions, calculate_fusion};
use crate::engine::timeline::canonical_scoring_json;
use crate::math::{YearMonth, fnv1a_32};

pub const DEFAULT_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    input_hash: u32,
    canonical: String,
    tables_version: String,
    start_month: YearMonth,
    insight_limit: usize,
}

pub struct FusionCache {
    inner: Cache<CacheKey, Arc<FusionReport>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for FusionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl FusionCache {
    /// A capacity of 0 disables caching: every lookup recomputes.
    pub fn new(capacity: usize) -> Self {
        tracing::debug!(capacity, "fusion cache initialized");
        Self {
            inner: Cache::builder().max_capacity(capacity as u64).build(),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get_or_compute(
        &self,
        input: &MatrixCalculationInput,
        tables: &LayerTables,
        options: &FusionOptions,
    ) -> FusionReport {
        // Pin the start month so a cached entry never outlives its anchor.
        let start_month = options.start_month.unwrap_or_else(YearMonth::current);
        let options = FusionOptions {
            start_month: Some(start_month),
            ..*options
        };

        let canonical = canonical_scoring_json(input);
        let key = CacheKey {
            input_hash: fnv1a_32(&canonical),
            canonical,
            tables_version: tables.version.clone(),
            start_month,
            insight_limit: options.insight_limit,
        };

        if self.is_enabled() {
            if let Some(report) = self.inner.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(hash = key.input_hash, "fusion cache hit");
                return report.as_ref().clone();
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let report = calculate_fusion(input, tables, &options);
        if self.is_enabled() {
            self.inner.insert(key, Arc::new(report.clone()));
        }
        report
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Entry count after moka's pending evictions have been applied.
    pub fn len(&self) -> usize {
        self.inner.run_pending_tasks();
        self.inner.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks();
    }
}

impl std::fmt::Debug for FusionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FusionCache")
            .field("capacity", &self.capacity)
            .field("entry_count", &self.inner.entry_count())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FiveElement, ProfileContext};

    fn options() -> FusionOptions {
        FusionOptions {
            start_month: YearMonth::new(2025, 1),
            insight_limit: 5,
        }
    }

    fn input(day_master: FiveElement) -> MatrixCalculationInput {
        MatrixCalculationInput::new(day_master, vec![day_master; 4])
    }

    #[test]
    fn hit_returns_the_uncached_result() {
        let tables = LayerTables::builtin();
        let cache = FusionCache::new(4);
        let direct = calculate_fusion(&input(FiveElement::Fire), tables, &options());
        let first = cache.get_or_compute(&input(FiveElement::Fire), tables, &options());
        let second = cache.get_or_compute(&input(FiveElement::Fire), tables, &options());
        assert_eq!(first, direct);
        assert_eq!(second, direct);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn profile_context_shares_an_entry() {
        let tables = LayerTables::builtin();
        let cache = FusionCache::new(4);
        let plain = input(FiveElement::Earth);
        let mut named = plain.clone();
        named.profile_context = Some(ProfileContext {
            name: Some("Lee".to_string()),
            ..ProfileContext::default()
        });
        cache.get_or_compute(&plain, tables, &options());
        cache.get_or_compute(&named, tables, &options());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn distinct_start_months_are_separate_entries() {
        let tables = LayerTables::builtin();
        let cache = FusionCache::new(4);
        let later = FusionOptions {
            start_month: YearMonth::new(2025, 6),
            ..options()
        };
        cache.get_or_compute(&input(FiveElement::Wood), tables, &options());
        cache.get_or_compute(&input(FiveElement::Wood), tables, &later);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn entry_count_stays_within_capacity() {
        let tables = LayerTables::builtin();
        let cache = FusionCache::new(2);
        for element in FiveElement::ALL {
            cache.get_or_compute(&input(element), tables, &options());
        }
        assert!(cache.len() <= 2);
        assert_eq!(cache.misses(), 5);

        // Evicted or not, a recomputed report is identical to the direct one.
        let direct = calculate_fusion(&input(FiveElement::Wood), tables, &options());
        assert_eq!(cache.get_or_compute(&input(FiveElement::Wood), tables, &options()), direct);
    }

    #[test]
    fn cleared_entries_are_recomputed() {
        let tables = LayerTables::builtin();
        let cache = FusionCache::new(4);
        cache.get_or_compute(&input(FiveElement::Fire), tables, &options());
        cache.clear();
        cache.get_or_compute(&input(FiveElement::Fire), tables, &options());
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn zero_capacity_disables_storage() {
        let tables = LayerTables::builtin();
        let cache = FusionCache::new(0);
        cache.get_or_compute(&input(FiveElement::Metal), tables, &options());
        cache.get_or_compute(&input(FiveElement::Metal), tables, &options());
        assert!(!cache.is_enabled());
        assert!(cache.is_empty());
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 2);
    }
}
