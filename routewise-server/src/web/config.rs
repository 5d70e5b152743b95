//! HTTP server configuration.

use std::time::Duration;

/// Configuration parameters for the HTTP API.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of origin airports in one meeting request.
    pub max_origins: usize,

    /// Deadline for a single search; slower requests get a 504.
    pub search_timeout: Duration,
}

impl ServerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_origins: usize, search_timeout: Duration) -> Self {
        Self {
            max_origins,
            search_timeout,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_origins: 10,
            search_timeout: Duration::from_secs(30),
        }
    }
}
