//! Configuration types shared across the orchestrator and middleware.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::capability::Capability;

/// TTL configuration for the result cache middleware.
///
/// The two capabilities are cached independently: the reference country set
/// changes rarely and gets a long window, while query results track a
/// periodically refreshed source and get a short one. A TTL of zero disables
/// caching for that capability entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for the reference country set, in milliseconds.
    pub countries_ttl_ms: u64,
    /// TTL for top-terms query results, in milliseconds.
    pub top_terms_ttl_ms: u64,
    /// Maximum number of entries retained per capability store.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            countries_ttl_ms: 3_600_000,
            top_terms_ttl_ms: 600_000,
            max_entries: 256,
        }
    }
}

impl CacheConfig {
    /// TTL for a capability, or `None` when caching is disabled for it.
    #[must_use]
    pub const fn ttl_for(&self, cap: Capability) -> Option<Duration> {
        let ms = match cap {
            Capability::Countries => self.countries_ttl_ms,
            Capability::TopTerms => self.top_terms_ttl_ms,
        };
        if ms == 0 {
            None
        } else {
            Some(Duration::from_millis(ms))
        }
    }

    /// Entry capacity for a capability store.
    ///
    /// The country set is keyed by a constant, so a single slot suffices.
    #[must_use]
    pub const fn capacity_for(&self, cap: Capability) -> u64 {
        match cap {
            Capability::Countries => 1,
            Capability::TopTerms => self.max_entries,
        }
    }
}

/// Global configuration for the `Tendenza` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TendenzaConfig {
    /// Ordered country preference list for default selection.
    ///
    /// The first entry present in the current reference set wins; when none
    /// match, the first entry of the set in its natural order is used.
    pub preferred_countries: Vec<String>,
    /// Lower bound of the default date window offered to callers.
    pub calendar_min_date: NaiveDate,
}

impl Default for TendenzaConfig {
    fn default() -> Self {
        Self {
            preferred_countries: vec!["Philippines".to_owned(), "United States".to_owned()],
            calendar_min_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }
}
