//! Domain types for the meeting-point planner.
//!
//! This module contains the value types shared by the fare graph, the
//! path engine and the outer layers. All types enforce their invariants
//! at construction time, so code that receives these types can trust
//! their validity.

mod airport;
mod fare;

pub use airport::{AirportId, InvalidAirportId};
pub use fare::{Fare, FareRecord, InvalidFare};
