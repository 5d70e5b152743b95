//! Caching layer for meeting-point answers.
//!
//! A meeting-point search runs one path search per (origin, airport) pair,
//! so repeated queries for the same travelers are worth remembering. The
//! fare graph is immutable for the life of the process, so a cached answer
//! never goes stale; the TTL and capacity only bound memory.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::AirportId;
use crate::planner::MeetingPlan;

/// Cache key: the origins exactly as requested, in order.
type MeetingKey = Vec<AirportId>;

/// Cached meeting plan.
type MeetingEntry = Arc<MeetingPlan>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Cache of meeting plans keyed by origin list.
pub struct MeetingCache {
    plans: MokaCache<MeetingKey, MeetingEntry>,
}

impl MeetingCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    /// Get the cached plan for these origins.
    pub async fn get(&self, origins: &[AirportId]) -> Option<MeetingEntry> {
        let hit = self.plans.get(origins).await;
        trace!(origins = origins.len(), hit = hit.is_some(), "Meeting cache lookup");
        hit
    }

    /// Insert a plan for these origins.
    pub async fn insert(&self, origins: Vec<AirportId>, plan: MeetingEntry) {
        self.plans.insert(origins, plan).await;
    }

    /// Get cache statistics (for monitoring).
    ///
    /// The count is eventually consistent.
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }
}
