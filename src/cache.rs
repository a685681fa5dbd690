//! In-memory TTL cache shared by the solar engine and the API collaborators.
//!
//! Entries are addressed by a category label plus a digest of the call
//! arguments. The TTL that applies to an entry is looked up from the
//! category at read time, so changing a category's TTL affects entries that
//! are already stored. All state sits behind one mutex; values are handed
//! out as `Arc`s so nothing is cloned under the lock.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;

/// Category labels used across the application.
pub mod category {
    pub const WEATHER: &str = "weather";
    pub const GEOCODING: &str = "geocoding";
    pub const CITIES: &str = "cities";
    pub const SUN_POSITION: &str = "sun_position";
    pub const DAY_NIGHT_BOUNDARY: &str = "day_night_boundary";
}

/// Positional and named call arguments that identify a cache entry.
///
/// Named arguments are kept sorted, so the order they are supplied in does
/// not change the derived key. Arguments must serialise to JSON; args
/// holding one that does not are unkeyable, and the cache never stores or
/// serves anything under them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheArgs {
    args: Vec<Value>,
    kwargs: BTreeMap<String, Value>,
    #[serde(skip)]
    unkeyable: bool,
}

impl CacheArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => self.args.push(v),
            Err(e) => self.mark_unkeyable(&e),
        }
        self
    }

    pub fn named<T: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
        let name = name.into();
        match serde_json::to_value(value) {
            Ok(v) => {
                self.kwargs.insert(name, v);
            }
            Err(e) => self.mark_unkeyable(&e),
        }
        self
    }

    /// False once any argument failed to serialise.
    pub fn is_keyable(&self) -> bool {
        !self.unkeyable
    }

    fn mark_unkeyable(&mut self, error: &serde_json::Error) {
        warn!(error = %error, "cache argument is not serialisable, caching disabled for this call");
        self.unkeyable = true;
    }

    pub fn key(&self, category: &str) -> CacheKey {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        CacheKey {
            category: category.to_string(),
            digest: hex::encode(Sha256::digest(&canonical)),
        }
    }
}

/// `category:digest`, namespaced so categories never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    category: String,
    digest: String,
}

impl CacheKey {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.digest)
    }
}

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) >= ttl
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    hits: u64,
    misses: u64,
    sets: u64,
    evictions: u64,
}

struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    counters: Counters,
    config: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub evictions: u64,
    /// Hits over requests, as a percentage rounded to two decimals.
    pub hit_rate_percent: f64,
    pub default_ttl_seconds: u64,
    pub ttl_seconds: BTreeMap<String, u64>,
}

pub struct TtlCache {
    state: Mutex<CacheState>,
    clock: Arc<dyn Clock>,
}

impl TtlCache {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                counters: Counters::default(),
                config,
            }),
            clock,
        }
    }

    /// Fresh value stored under `category` and `args`, if any.
    ///
    /// A stale entry is evicted on the way. A stored value of a different
    /// type than `T` counts as a miss and is left in place. Unkeyable args
    /// always miss.
    pub fn get<T: Any + Send + Sync>(&self, category: &str, args: &CacheArgs) -> Option<Arc<T>> {
        if !args.is_keyable() {
            self.state.lock().counters.misses += 1;
            return None;
        }
        let key = args.key(category);
        let now = self.clock.now();
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let ttl = state.config.ttl_for(category);

        let expired = state.entries.get(&key).map(|entry| entry.is_expired(now, ttl));
        let value = match expired {
            None => None,
            Some(true) => {
                state.entries.remove(&key);
                state.counters.evictions += 1;
                debug!(category, "cache entry expired");
                None
            }
            Some(false) => state.entries.get(&key).map(|entry| Arc::clone(&entry.value)),
        };

        match value.map(|v| v.downcast::<T>()) {
            Some(Ok(v)) => {
                state.counters.hits += 1;
                debug!(category, "cache hit");
                Some(v)
            }
            Some(Err(_)) => {
                state.counters.misses += 1;
                warn!(category, key = %key, "cache entry holds a different type");
                None
            }
            None => {
                state.counters.misses += 1;
                debug!(category, "cache miss");
                None
            }
        }
    }

    /// Store `value`, replacing whatever the key held and restarting its age.
    /// Does nothing for unkeyable args.
    pub fn set<T: Any + Send + Sync>(&self, category: &str, value: T, args: &CacheArgs) {
        self.insert(category, Arc::new(value), args);
    }

    fn insert<T: Any + Send + Sync>(&self, category: &str, value: Arc<T>, args: &CacheArgs) {
        if !args.is_keyable() {
            debug!(category, "cache set skipped, args are unkeyable");
            return;
        }
        let key = args.key(category);
        let entry = CacheEntry {
            value,
            inserted_at: self.clock.now(),
        };
        let mut state = self.state.lock();
        state.entries.insert(key, entry);
        state.counters.sets += 1;
        debug!(category, "cache set");
    }

    /// Cached value, or the result of `compute` after storing it.
    ///
    /// `compute` runs without the lock held; two racing callers may both
    /// compute, and the later write wins.
    pub fn get_or_insert_with<T, F>(&self, category: &str, args: &CacheArgs, compute: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        if let Some(hit) = self.get::<T>(category, args) {
            return hit;
        }
        let value = Arc::new(compute());
        self.insert(category, Arc::clone(&value), args);
        value
    }

    pub fn delete(&self, category: &str, args: &CacheArgs) -> bool {
        if !args.is_keyable() {
            return false;
        }
        let key = args.key(category);
        let removed = self.state.lock().entries.remove(&key).is_some();
        if removed {
            debug!(category, "cache entry deleted");
        }
        removed
    }

    pub fn clear_by_category(&self, category: &str) -> usize {
        let mut state = self.state.lock();
        let before = state.entries.len();
        state.entries.retain(|key, _| key.category != category);
        let removed = before - state.entries.len();
        info!(category, removed, "cleared cache category");
        removed
    }

    /// Drop every entry and zero the counters.
    pub fn clear_all(&self) -> usize {
        let mut state = self.state.lock();
        let removed = state.entries.len();
        state.entries.clear();
        state.counters = Counters::default();
        info!(removed, "cache cleared");
        removed
    }

    /// Evict every entry whose category TTL has run out. Uses the same
    /// boundary as `get`: an entry aged exactly its TTL is stale.
    pub fn cleanup_expired(&self) -> usize {
        let now = self.clock.now();
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let config = &state.config;
        let before = state.entries.len();
        state
            .entries
            .retain(|key, entry| !entry.is_expired(now, config.ttl_for(&key.category)));
        let removed = before - state.entries.len();
        state.counters.evictions += removed as u64;
        info!(removed, "expired cache entries cleaned up");
        removed
    }

    /// Change a category's TTL, in whole seconds. Applies to entries already
    /// stored.
    pub fn set_ttl(&self, category: &str, seconds: u64) {
        self.state
            .lock()
            .config
            .ttl_seconds
            .insert(category.to_string(), seconds);
        info!(category, seconds, "cache TTL changed");
    }

    pub fn ttl_for(&self, category: &str) -> Duration {
        self.state.lock().config.ttl_for(category)
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn size_by_category(&self) -> BTreeMap<String, usize> {
        let state = self.state.lock();
        let mut sizes = BTreeMap::new();
        for key in state.entries.keys() {
            *sizes.entry(key.category.clone()).or_insert(0) += 1;
        }
        sizes
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        let c = state.counters;
        let total_requests = c.hits + c.misses;
        let hit_rate_percent = if total_requests > 0 {
            (c.hits as f64 / total_requests as f64 * 100.0 * 100.0).round() / 100.0
        } else {
            0.0
        };
        CacheStats {
            total_entries: state.entries.len(),
            total_requests,
            hits: c.hits,
            misses: c.misses,
            sets: c.sets,
            evictions: c.evictions,
            hit_rate_percent,
            default_ttl_seconds: state.config.default_ttl_seconds,
            ttl_seconds: state.config.ttl_seconds.clone(),
        }
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TtlCache")
            .field("entries", &state.entries.len())
            .field("counters", &state.counters)
            .field("config", &state.config)
            .field("clock", &self.clock)
            .finish()
    }
}
