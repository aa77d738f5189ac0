//! Lookup lists with a TTL cache
//!
//! The dropdown-style lists (product numbers, amendments, signatories,
//! statuses, states, approved-design indicators) change rarely, so they are
//! served from an in-process cache. An entry stays alive while it keeps being
//! used (2 minute sliding window) but is always refreshed after 10 minutes.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::{CertError, CertResult};
use crate::storage::Storage;

const SLIDING_TTL: Duration = Duration::from_secs(2 * 60);
const ABSOLUTE_TTL: Duration = Duration::from_secs(10 * 60);

struct CacheEntry {
    values: Vec<String>,
    loaded_at: Instant,
    last_used: Instant,
}

/// TTL cache for lookup lists, keyed by list name
pub struct LookupCache {
    sliding: Duration,
    absolute: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupCache {
    pub fn new() -> Self {
        Self::with_ttls(SLIDING_TTL, ABSOLUTE_TTL)
    }

    /// Build a cache with explicit expiry windows
    pub fn with_ttls(sliding: Duration, absolute: Duration) -> Self {
        Self {
            sliding,
            absolute,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Get a cached list, loading it through `load` on miss or expiry
    pub fn get_or_load<F>(&self, key: &str, load: F) -> CertResult<Vec<String>>
    where
        F: FnOnce() -> CertResult<Vec<String>>,
    {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CertError::Storage(format!("Failed to acquire cache lock: {}", e)))?;

        let now = Instant::now();
        if let Some(entry) = entries.get_mut(key) {
            let fresh = now.duration_since(entry.last_used) < self.sliding
                && now.duration_since(entry.loaded_at) < self.absolute;
            if fresh {
                entry.last_used = now;
                return Ok(entry.values.clone());
            }
        }

        let values = load()?;
        entries.insert(
            key.to_string(),
            CacheEntry {
                values: values.clone(),
                loaded_at: now,
                last_used: now,
            },
        );
        Ok(values)
    }

    /// Drop every cached list
    pub fn invalidate(&self) -> CertResult<()> {
        self.entries
            .lock()
            .map_err(|e| CertError::Storage(format!("Failed to acquire cache lock: {}", e)))?
            .clear();
        Ok(())
    }
}

/// Service resolving the lookup lists from storage through the cache
pub struct LookupService<'a> {
    storage: &'a Storage,
    cache: &'a LookupCache,
}

impl<'a> LookupService<'a> {
    /// Create a new lookup service
    pub fn new(storage: &'a Storage, cache: &'a LookupCache) -> Self {
        Self { storage, cache }
    }

    /// Product numbers from the part register
    pub fn product_numbers(&self) -> CertResult<Vec<String>> {
        self.cache.get_or_load("product_numbers", || {
            Ok(self
                .storage
                .reference
                .parts()?
                .into_iter()
                .map(|p| p.product_no)
                .collect())
        })
    }

    /// Amendment codes
    pub fn amendments(&self) -> CertResult<Vec<String>> {
        self.cache
            .get_or_load("amendments", || self.storage.reference.amendments())
    }

    /// Display names of users holding signatory access
    pub fn signatories(&self) -> CertResult<Vec<String>> {
        self.cache.get_or_load("signatories", || {
            Ok(self
                .storage
                .users
                .get_all()?
                .into_iter()
                .filter(|u| u.role.has_signatory_access())
                .map(|u| u.name)
                .collect())
        })
    }

    /// Status codes
    pub fn statuses(&self) -> CertResult<Vec<String>> {
        self.cache
            .get_or_load("statuses", || self.storage.reference.statuses())
    }

    /// The fixed lifecycle state names
    pub fn states(&self) -> Vec<String> {
        vec!["Valid".into(), "Printed".into(), "Cancelled".into()]
    }

    /// Approved-design indicators
    pub fn approved_indicators(&self) -> CertResult<Vec<String>> {
        self.cache.get_or_load("approved_indicators", || {
            self.storage.reference.approved_indicators()
        })
    }
}
