//! Substring search over the catalogue.
//!
//! Queries are normalized, screened against the over-general policy, matched
//! as case-insensitive substrings of record names, sorted by name and capped.
//! Results are memoized per normalized query in a bounded LRU cache that is
//! cleared whenever the catalogue is replaced.

use crate::{
    error::{CatalogError, Result},
    record::GpuRecord,
    store::CatalogStore,
};
use gpudex_core::SearchConfig;
use lru::LruCache;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::num::NonZeroUsize;
use tracing::{debug, info};

/// Vendor and category words too broad to search for on their own.
pub const GENERIC_TERMS: [&str; 11] = [
    "radeon", "amd", "geforce", "nvidia", "rtx", "gtx", "intel", "graphics", "gpu", "video",
    "card",
];

/// Description attached to every hit; all data comes from the local catalogue.
pub const LOCAL_DESCRIPTION: &str = "Local catalogue data.";

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Record name
    pub title: String,
    /// Synthetic local identifier derived from the name
    pub url: String,
    /// Constant placeholder description
    pub description: String,
}

impl SearchHit {
    fn from_record(record: &GpuRecord) -> Self {
        Self {
            title: record.name.clone(),
            url: format!("local://{}", record.name.to_lowercase().replace(' ', "-")),
            description: LOCAL_DESCRIPTION.to_string(),
        }
    }
}

/// Lower-case, collapse whitespace runs to one space, and trim.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Search engine over a [`CatalogStore`].
///
/// The query cache sits behind a [`RefCell`], so the engine is meant to be
/// owned by one thread.
pub struct SearchEngine {
    catalog: CatalogStore,
    result_limit: usize,
    cache: RefCell<LruCache<String, Vec<SearchHit>>>,
}

impl SearchEngine {
    /// Create an engine using the `[search]` configuration section.
    #[must_use]
    pub fn new(catalog: CatalogStore, config: &SearchConfig) -> Self {
        Self::with_limits(catalog, config.result_limit, config.cache_capacity)
    }

    /// Create an engine with an explicit result cap and cache size.
    #[must_use]
    pub fn with_limits(catalog: CatalogStore, result_limit: usize, cache_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            catalog,
            result_limit: result_limit.max(1),
            cache: RefCell::new(LruCache::new(capacity)),
        }
    }

    /// The catalogue being searched.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Maximum number of hits one search returns.
    #[must_use]
    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    /// Swap in a new catalogue and drop every cached result.
    pub fn replace_catalog(&mut self, catalog: CatalogStore) {
        self.catalog = catalog;
        self.cache.get_mut().clear();
        info!(count = self.catalog.len(), "catalogue replaced, search cache cleared");
    }

    /// Number of normalized queries currently cached.
    #[must_use]
    pub fn cached_queries(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Whether a query is suppressed by the over-general policy.
    ///
    /// A query is over-general when, once normalized, it equals one of the
    /// [`GENERIC_TERMS`] or `"amd "`/`"nvidia "` followed by one of them.
    #[must_use]
    pub fn is_too_general(query: &str) -> bool {
        let normalized = normalize_query(query);
        GENERIC_TERMS.iter().any(|term| {
            normalized == *term
                || normalized.strip_prefix("amd ") == Some(term)
                || normalized.strip_prefix("nvidia ") == Some(term)
        })
    }

    /// Whether a result set hit the cap, meaning the query was probably too broad.
    #[must_use]
    pub fn is_capped(&self, hits: &[SearchHit]) -> bool {
        hits.len() >= self.result_limit
    }

    /// Search record names for a query.
    ///
    /// Over-general queries return an empty result regardless of the
    /// catalogue; otherwise hits are case-insensitive substring matches,
    /// sorted by name and truncated to [`SearchEngine::result_limit`].
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        if Self::is_too_general(query) {
            debug!(query = %query, "query suppressed as too general");
            return Vec::new();
        }

        if self.catalog.is_empty() {
            return Vec::new();
        }

        let normalized = normalize_query(query);
        let mut cache = self.cache.borrow_mut();

        if let Some(hits) = cache.get(&normalized) {
            debug!(query = %normalized, count = hits.len(), "search cache hit");
            return hits.clone();
        }

        let mut matches: Vec<&GpuRecord> = self
            .catalog
            .records()
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&normalized))
            .collect();
        matches.sort_by_cached_key(|record| (record.name.to_lowercase(), record.name.clone()));

        let hits: Vec<SearchHit> = matches
            .into_iter()
            .take(self.result_limit)
            .map(SearchHit::from_record)
            .collect();

        debug!(query = %normalized, count = hits.len(), "search completed");
        cache.put(normalized, hits.clone());

        hits
    }

    /// Exact-name lookup, ignoring case.
    ///
    /// # Errors
    /// Returns [`CatalogError::GpuNotFound`] if no record has this name.
    pub fn details(&self, name: &str) -> Result<&GpuRecord> {
        self.catalog.find_exact(name)
    }

    /// Resolve a free-form query to one record.
    ///
    /// Tries an exact-name match first, then falls back to the first
    /// (alphabetically earliest) search hit. The fallback picks silently
    /// among ambiguous matches.
    ///
    /// # Errors
    /// Returns [`CatalogError::GpuNotFound`] if both steps come up empty.
    pub fn resolve(&self, query: &str) -> Result<&GpuRecord> {
        if let Ok(record) = self.catalog.find_exact(query) {
            return Ok(record);
        }

        let hits = self.search(query);
        let first = hits.first().ok_or_else(|| CatalogError::GpuNotFound {
            name: query.to_string(),
        })?;

        debug!(query = %query, resolved = %first.title, "resolved query through search fallback");
        self.catalog.find_exact(&first.title)
    }
}

/// Suggested ways to narrow down a broad query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinements {
    /// Whether the suggestions target a recognised vendor or series
    pub vendor_specific: bool,
    /// One suggestion per line
    pub suggestions: Vec<String>,
}

impl Refinements {
    /// Pick refinements for a raw query by scanning it for vendor words.
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        let lower = normalize_query(query);

        let vendor: Option<&[&str]> = if lower.contains("radeon") || lower.contains("amd") {
            Some(&[
                "radeon rx",
                "radeon 6000",
                "radeon 7000",
                "radeon rx 6700",
                "amd rx 7600",
            ])
        } else if lower.contains("geforce") || lower.contains("nvidia") {
            Some(&["geforce rtx", "rtx 30", "rtx 40", "rtx 3060", "gtx 1660"])
        } else if lower == "rtx" {
            Some(&["rtx 3060", "rtx 4070", "rtx 3080", "rtx 4060"])
        } else if lower == "gtx" {
            Some(&["gtx 1660", "gtx 1060", "gtx 1070", "gtx 1650"])
        } else {
            None
        };

        match vendor {
            Some(terms) => Self {
                vendor_specific: true,
                suggestions: terms.iter().map(|t| format!("search {t}")).collect(),
            },
            None => {
                let original = query.trim();
                Self {
                    vendor_specific: false,
                    suggestions: vec![
                        format!("Add model: '{original} 3060'"),
                        format!("Specify series: '{original} 6000'"),
                        format!("Include memory: '{original} 8gb'"),
                        "Use more specific terms".to_string(),
                    ],
                }
            }
        }
    }
}

impl fmt::Display for Refinements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vendor_specific {
            writeln!(f, "Try:")?;
        } else {
            writeln!(f, "Suggestions to refine your search:")?;
        }
        for line in &self.suggestions {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(names: &[&str]) -> SearchEngine {
        let records = names.iter().map(|n| GpuRecord::named(*n)).collect();
        SearchEngine::with_limits(CatalogStore::new(records), 30, 8)
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  GeForce\t RTX   3060 "), "geforce rtx 3060");
        assert_eq!(normalize_query(""), "");
    }

    #[test]
    fn test_generic_terms_return_nothing() {
        let engine = engine_with(&["GeForce RTX 3060", "Radeon RX 6600", "Intel Arc A770"]);

        for query in ["rtx", "AMD", " nvidia ", "amd radeon", "NVIDIA  GeForce", "card"] {
            assert!(SearchEngine::is_too_general(query), "should be general: {query}");
            assert!(engine.search(query).is_empty(), "should be empty: {query}");
        }
    }

    #[test]
    fn test_specific_queries_are_not_general() {
        assert!(!SearchEngine::is_too_general("rtx 3060"));
        assert!(!SearchEngine::is_too_general("intel arc"));
        assert!(!SearchEngine::is_too_general("amd nvidia"));
    }

    #[test]
    fn test_search_substring_and_sorting() {
        let engine = engine_with(&[
            "GeForce RTX 3060 Ti",
            "GeForce RTX 3060",
            "Radeon RX 6600",
            "geforce rtx 3060 8 GB",
            "GeForce RTX 3070",
        ]);

        let hits = engine.search("RTX   3060");
        let titles: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["GeForce RTX 3060", "geforce rtx 3060 8 GB", "GeForce RTX 3060 Ti"]
        );
    }

    #[test]
    fn test_search_hit_shape() {
        let engine = engine_with(&["Radeon RX 7600 XT"]);
        let hits = engine.search("rx 7600");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "local://radeon-rx-7600-xt");
        assert_eq!(hits[0].description, LOCAL_DESCRIPTION);
    }

    #[test]
    fn test_search_is_capped() {
        let names: Vec<String> = (0..45).map(|i| format!("Radeon Pro W{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let engine = engine_with(&refs);

        let hits = engine.search("pro w");
        assert_eq!(hits.len(), 30);
        assert!(engine.is_capped(&hits));
        assert_eq!(hits[0].title, "Radeon Pro W00");
        assert_eq!(hits[29].title, "Radeon Pro W29");
    }

    #[test]
    fn test_search_cache_and_replace() {
        let mut engine = engine_with(&["GeForce RTX 4060"]);
        assert_eq!(engine.search("rtx 4060").len(), 1);
        assert_eq!(engine.search("RTX 4060 ").len(), 1);
        assert_eq!(engine.cached_queries(), 1);

        engine.replace_catalog(CatalogStore::new(vec![
            GpuRecord::named("GeForce RTX 4060"),
            GpuRecord::named("GeForce RTX 4060 Ti"),
        ]));
        assert_eq!(engine.cached_queries(), 0);
        assert_eq!(engine.search("rtx 4060").len(), 2);
    }

    #[test]
    fn test_resolve_prefers_exact_match() {
        let engine = engine_with(&["GeForce RTX 3060 Ti", "GeForce RTX 3060"]);

        let exact = engine.resolve("geforce rtx 3060 ti").expect("resolve exact");
        assert_eq!(exact.name, "GeForce RTX 3060 Ti");

        let fallback = engine.resolve("rtx 3060").expect("resolve through search");
        assert_eq!(fallback.name, "GeForce RTX 3060");

        let missing = engine.resolve("voodoo 5");
        assert!(matches!(missing, Err(CatalogError::GpuNotFound { .. })));
    }

    #[test]
    fn test_refinements_by_vendor() {
        let amd = Refinements::for_query("Radeon");
        assert!(amd.vendor_specific);
        assert!(amd.suggestions.contains(&"search radeon rx".to_string()));

        let nvidia = Refinements::for_query("geforce 30");
        assert!(nvidia.suggestions.contains(&"search rtx 3060".to_string()));

        let rtx = Refinements::for_query("RTX");
        assert_eq!(rtx.suggestions[0], "search rtx 3060");

        let gtx = Refinements::for_query("gtx");
        assert_eq!(gtx.suggestions.len(), 4);

        let generic = Refinements::for_query("arc");
        assert!(!generic.vendor_specific);
        assert_eq!(generic.suggestions[0], "Add model: 'arc 3060'");
        assert!(generic.to_string().starts_with("Suggestions to refine your search:"));
    }
}
