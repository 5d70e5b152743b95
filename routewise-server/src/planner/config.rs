//! Meeting-point search configuration.

/// How candidate totals are computed.
///
/// Both strategies sum the origins' costs in the same order and so produce
/// identical totals and the same winner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MeetingStrategy {
    /// One path search per (origin, candidate) pair, each stopping once the
    /// candidate is settled.
    #[default]
    PerCandidate,

    /// One full single-source sweep per origin, then a scan over candidates.
    PerOrigin,
}

/// Configuration parameters for meeting-point search.
#[derive(Debug, Clone)]
pub struct MeetingConfig {
    /// How candidate totals are computed.
    pub strategy: MeetingStrategy,

    /// Evaluate searches on the rayon thread pool.
    /// The winner is still chosen in graph order.
    pub parallel: bool,
}

impl MeetingConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(strategy: MeetingStrategy, parallel: bool) -> Self {
        Self { strategy, parallel }
    }

    /// Same configuration, evaluated on the calling thread only.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            strategy: MeetingStrategy::PerCandidate,
            parallel: true,
        }
    }
}
