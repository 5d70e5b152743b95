//! Optimal meeting-point search.
//!
//! For every airport in the graph, sum the least cost from each origin to
//! that airport and keep the airport with the smallest sum. Candidates are
//! visited in graph insertion order and only a strictly smaller total
//! replaces the current best, so ties go to the airport seen first.

use rayon::prelude::*;

use crate::domain::AirportId;
use crate::graph::{FareGraph, NodeIndex};

use super::config::{MeetingConfig, MeetingStrategy};
use super::search::{CostTable, Route, SearchError, cost_between, cost_table, node_of, shortest_path};

/// The winning airport and the fares all travelers pay to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingPoint {
    pub airport: AirportId,
    pub total_cost: f64,
}

/// One traveler's cheapest route to the meeting point.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub origin: AirportId,
    pub route: Route,
}

/// A meeting point together with each traveler's route to it.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingPlan {
    pub meeting: MeetingPoint,
    pub itineraries: Vec<Itinerary>,
}

/// Find the airport minimizing the summed least cost from all `origins`.
///
/// Fails with [`SearchError::NoOrigins`] for an empty origin list,
/// [`SearchError::UnknownNode`] if an origin is not in the graph, and
/// [`SearchError::NoReachableMeetingPoint`] if no airport is reachable from
/// every origin.
pub fn optimal_meeting_point(
    graph: &FareGraph,
    origins: &[AirportId],
    config: &MeetingConfig,
) -> Result<MeetingPoint, SearchError> {
    let sources = resolve_origins(graph, origins)?;

    let totals = match config.strategy {
        MeetingStrategy::PerCandidate => per_candidate_totals(graph, &sources, config.parallel),
        MeetingStrategy::PerOrigin => per_origin_totals(graph, &sources, config.parallel),
    };

    select_cheapest(graph, &totals)
}

/// Cheapest route from each origin to `meeting_point`, in origin order.
pub fn meeting_plan(
    graph: &FareGraph,
    origins: &[AirportId],
    meeting_point: &AirportId,
) -> Result<Vec<Itinerary>, SearchError> {
    if origins.is_empty() {
        return Err(SearchError::NoOrigins);
    }

    origins
        .iter()
        .map(|origin| {
            Ok(Itinerary {
                origin: origin.clone(),
                route: shortest_path(graph, origin, meeting_point)?,
            })
        })
        .collect()
}

/// Find the meeting point and every origin's route to it.
pub fn plan_meeting(
    graph: &FareGraph,
    origins: &[AirportId],
    config: &MeetingConfig,
) -> Result<MeetingPlan, SearchError> {
    let meeting = optimal_meeting_point(graph, origins, config)?;
    let itineraries = meeting_plan(graph, origins, &meeting.airport)?;

    Ok(MeetingPlan {
        meeting,
        itineraries,
    })
}

fn resolve_origins(graph: &FareGraph, origins: &[AirportId]) -> Result<Vec<NodeIndex>, SearchError> {
    if origins.is_empty() {
        return Err(SearchError::NoOrigins);
    }
    origins.iter().map(|origin| node_of(graph, origin)).collect()
}

/// Total for one candidate: a separate search from each origin.
fn candidate_total(graph: &FareGraph, sources: &[NodeIndex], candidate: NodeIndex) -> f64 {
    let mut total = 0.0;
    for &source in sources {
        let cost = cost_between(graph, source, candidate);
        if !cost.is_finite() {
            return f64::INFINITY;
        }
        total += cost;
    }
    total
}

fn per_candidate_totals(graph: &FareGraph, sources: &[NodeIndex], parallel: bool) -> Vec<f64> {
    let candidates = 0..graph.node_count();
    if parallel {
        candidates
            .into_par_iter()
            .map(|c| candidate_total(graph, sources, NodeIndex(c)))
            .collect()
    } else {
        candidates
            .map(|c| candidate_total(graph, sources, NodeIndex(c)))
            .collect()
    }
}

fn per_origin_totals(graph: &FareGraph, sources: &[NodeIndex], parallel: bool) -> Vec<f64> {
    let tables: Vec<CostTable> = if parallel {
        sources
            .par_iter()
            .map(|&source| cost_table(graph, source))
            .collect()
    } else {
        sources
            .iter()
            .map(|&source| cost_table(graph, source))
            .collect()
    };

    (0..graph.node_count())
        .map(|c| {
            let mut total = 0.0;
            for table in &tables {
                let cost = table.cost(NodeIndex(c));
                if !cost.is_finite() {
                    return f64::INFINITY;
                }
                total += cost;
            }
            total
        })
        .collect()
}

/// Pick the first candidate with the strictly smallest finite total.
fn select_cheapest(graph: &FareGraph, totals: &[f64]) -> Result<MeetingPoint, SearchError> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &total) in totals.iter().enumerate() {
        if !total.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, best_total)| total < best_total) {
            best = Some((index, total));
        }
    }

    let (index, total_cost) = best.ok_or(SearchError::NoReachableMeetingPoint)?;
    let airport = graph
        .airport(NodeIndex(index))
        .cloned()
        .ok_or(SearchError::NoReachableMeetingPoint)?;

    Ok(MeetingPoint {
        airport,
        total_cost,
    })
}

#[cfg(test)]
#[path = "meeting_tests.rs"]
mod tests;
