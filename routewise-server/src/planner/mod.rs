//! Least-cost path engine and meeting-point planner.
//!
//! This module answers: "given where each traveler starts, which airport
//! can everyone reach for the least combined fare?"
//!
//! Path costs come from Dijkstra's algorithm over the fare graph. The
//! meeting-point search evaluates every airport as a candidate and sums the
//! cheapest cost from each origin. Nothing in here logs or prints; errors
//! are returned to the caller unchanged.

mod config;
mod meeting;
mod search;

pub use config::{MeetingConfig, MeetingStrategy};
pub use meeting::{
    Itinerary, MeetingPlan, MeetingPoint, meeting_plan, optimal_meeting_point, plan_meeting,
};
pub use search::{CostTable, Route, SearchError, accumulate_cost, costs_from, shortest_path};
