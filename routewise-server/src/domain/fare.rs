//! Fare values and fare records.

use std::fmt;

use super::AirportId;

/// Error returned when a fare amount is not a usable edge weight.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidFare {
    #[error("fare must be a finite number, got {0}")]
    NotFinite(f64),

    #[error("fare must not be negative, got {0}")]
    Negative(f64),
}

/// A non-negative, finite fare amount.
///
/// Fares are the edge weights of the fare graph. Dijkstra's algorithm relies
/// on weights never being negative, so the check happens here, once.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Fare(f64);

impl Fare {
    /// A zero fare.
    pub const ZERO: Fare = Fare(0.0);

    /// Create a fare, rejecting NaN, infinities and negative amounts.
    pub fn new(amount: f64) -> Result<Self, InvalidFare> {
        if !amount.is_finite() {
            return Err(InvalidFare::NotFinite(amount));
        }
        if amount < 0.0 {
            return Err(InvalidFare::Negative(amount));
        }
        // Normalize -0.0 so it prints as 0
        Ok(Fare(amount + 0.0))
    }

    /// Returns the amount.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Debug for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fare({})", self.0)
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// One observed fare quote between two airports.
///
/// Quotes are treated as undirected: the same fare applies in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct FareRecord {
    pub origin: AirportId,
    pub destination: AirportId,
    pub fare: Fare,
}

impl FareRecord {
    /// Create a record from already-validated parts.
    pub fn new(origin: AirportId, destination: AirportId, fare: Fare) -> Self {
        Self {
            origin,
            destination,
            fare,
        }
    }
}
