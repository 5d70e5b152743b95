//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::AirportId;
use crate::planner::{Itinerary, MeetingPlan, Route};

/// Request to find a meeting point.
#[derive(Debug, Deserialize)]
pub struct MeetingRequest {
    /// Origin airport codes, one per traveler
    pub airports: Vec<String>,
}

/// Response for a meeting-point request.
#[derive(Debug, Serialize)]
pub struct MeetingResponse {
    /// The chosen airport
    pub meeting: String,

    /// Sum of every traveler's fare
    pub total_cost: f64,

    /// Each traveler's route, in request order
    pub itineraries: Vec<ItineraryResult>,
}

/// One traveler's route to the meeting point.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// Origin airport
    pub origin: String,

    /// Airports along the way, origin and meeting point included
    pub path: Vec<String>,

    /// Fare paid; null if the meeting point is unreachable
    pub cost: Option<f64>,
}

/// Query for a single cheapest route.
#[derive(Debug, Deserialize)]
pub struct PathRequest {
    /// Departure airport
    pub from: String,

    /// Arrival airport
    pub to: String,
}

/// Response for a single cheapest route.
#[derive(Debug, Serialize)]
pub struct PathResponse {
    pub from: String,
    pub to: String,

    /// Airports along the way; empty if unreachable
    pub path: Vec<String>,

    /// Total fare; null if unreachable
    pub cost: Option<f64>,
}

/// Response listing the airports in the fare graph.
#[derive(Debug, Serialize)]
pub struct AirportsResponse {
    /// Airports in dataset order
    pub airports: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

fn path_codes(route: &Route) -> Vec<String> {
    route.path.iter().map(AirportId::to_string).collect()
}

fn reachable_cost(route: &Route) -> Option<f64> {
    route.is_reachable().then_some(route.cost)
}

impl ItineraryResult {
    /// Create from a planner itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            origin: itinerary.origin.to_string(),
            path: path_codes(&itinerary.route),
            cost: reachable_cost(&itinerary.route),
        }
    }
}

impl MeetingResponse {
    /// Create from a planner meeting plan.
    pub fn from_plan(plan: &MeetingPlan) -> Self {
        Self {
            meeting: plan.meeting.airport.to_string(),
            total_cost: plan.meeting.total_cost,
            itineraries: plan
                .itineraries
                .iter()
                .map(ItineraryResult::from_itinerary)
                .collect(),
        }
    }
}

impl PathResponse {
    /// Create from a planner route.
    pub fn from_route(from: &AirportId, to: &AirportId, route: &Route) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            path: path_codes(route),
            cost: reachable_cost(route),
        }
    }
}
