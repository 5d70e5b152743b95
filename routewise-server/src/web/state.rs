//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, MeetingCache};
use crate::graph::FareGraph;
use crate::planner::MeetingConfig;

use super::config::ServerConfig;

/// Shared application state.
///
/// The fare graph is built once at startup and shared read-only by every
/// request.
#[derive(Clone)]
pub struct AppState {
    /// Fare graph loaded at startup
    pub graph: Arc<FareGraph>,

    /// Meeting-point search configuration
    pub meeting: Arc<MeetingConfig>,

    /// Request limits and deadlines
    pub server: Arc<ServerConfig>,

    /// Answers to previous meeting requests
    pub cache: Arc<MeetingCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        graph: FareGraph,
        meeting: MeetingConfig,
        server: ServerConfig,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            graph: Arc::new(graph),
            meeting: Arc::new(meeting),
            server: Arc::new(server),
            cache: Arc::new(MeetingCache::new(cache_config)),
        }
    }
}
