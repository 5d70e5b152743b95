//! Least-cost path search.
//!
//! This is Dijkstra's algorithm, not A*: queue priorities are the cumulative
//! fare so far with no goal-directed term. All fares are non-negative, so the
//! first time a node is popped at its recorded cost that cost is final.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::domain::{AirportId, Fare};
use crate::graph::{FareGraph, NodeIndex};

/// Error from path or meeting-point search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// An endpoint is not an airport of the graph
    #[error("unknown airport: {0}")]
    UnknownNode(AirportId),

    /// The origins span disconnected parts of the graph
    #[error("no meeting point is reachable from every origin")]
    NoReachableMeetingPoint,

    /// Meeting-point search was called without origins
    #[error("at least one origin airport is required")]
    NoOrigins,
}

/// The cheapest route between two airports.
///
/// An unreachable target has an empty path and an infinite cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Airports from source to target, both included.
    pub path: Vec<AirportId>,

    /// Sum of the fares along the path.
    pub cost: f64,
}

impl Route {
    /// A route to a target that cannot be reached.
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    /// Returns true if the target was reached.
    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }

    /// Number of flights taken.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Cost of one more flight on top of the cost so far.
///
/// Pure additive accumulation; there is no heuristic term.
pub fn accumulate_cost(current: f64, fare: Fare) -> f64 {
    current + fare.value()
}

/// Least cost found from one source to every node, by node index.
///
/// Nodes never reached hold `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    costs: Vec<f64>,
}

impl CostTable {
    fn new(node_count: usize) -> Self {
        Self {
            costs: vec![f64::INFINITY; node_count],
        }
    }

    /// Cost to reach the node at `index`.
    pub fn cost(&self, index: NodeIndex) -> f64 {
        self.costs.get(index.0).copied().unwrap_or(f64::INFINITY)
    }

    /// Number of nodes reached, the source included.
    pub fn reached(&self) -> usize {
        self.costs.iter().filter(|c| c.is_finite()).count()
    }

    /// Costs in node order.
    pub fn as_slice(&self) -> &[f64] {
        &self.costs
    }
}

/// Previous node on the best-known path, by node index.
#[derive(Debug, Clone)]
struct PredecessorTable {
    previous: Vec<Option<NodeIndex>>,
}

impl PredecessorTable {
    fn new(node_count: usize) -> Self {
        Self {
            previous: vec![None; node_count],
        }
    }

    /// Walk back from `target` to the source and return the path in travel order.
    fn path_to(&self, target: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![target];
        let mut node = target;
        while let Some(prev) = self.previous[node.0] {
            path.push(prev);
            node = prev;
        }
        path.reverse();
        path
    }
}

/// Priority queue entry, ordered so that `BinaryHeap` pops the cheapest first.
///
/// Equal costs pop in node order, which keeps the chosen path deterministic.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    cost: f64,
    node: NodeIndex,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Tables produced by one search; created per call and dropped with it.
struct SearchSpace {
    costs: CostTable,
    predecessors: PredecessorTable,
}

/// Run Dijkstra from `source`.
///
/// With a `target`, the search stops as soon as the target is popped.
/// Without one it settles every reachable node.
fn dijkstra(graph: &FareGraph, source: NodeIndex, target: Option<NodeIndex>) -> SearchSpace {
    let node_count = graph.node_count();
    let mut space = SearchSpace {
        costs: CostTable::new(node_count),
        predecessors: PredecessorTable::new(node_count),
    };

    space.costs.costs[source.0] = 0.0;
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry {
        cost: 0.0,
        node: source,
    });

    while let Some(QueueEntry { cost, node }) = queue.pop() {
        // Stale entry: the node was already reached more cheaply
        if cost > space.costs.costs[node.0] {
            continue;
        }

        if Some(node) == target {
            break;
        }

        for edge in graph.edges(node) {
            let candidate = accumulate_cost(cost, edge.fare);
            if candidate < space.costs.costs[edge.to.0] {
                space.costs.costs[edge.to.0] = candidate;
                space.predecessors.previous[edge.to.0] = Some(node);
                queue.push(QueueEntry {
                    cost: candidate,
                    node: edge.to,
                });
            }
        }
    }

    space
}

/// Resolve an airport to its node index.
pub(crate) fn node_of(graph: &FareGraph, id: &AirportId) -> Result<NodeIndex, SearchError> {
    graph
        .index_of(id)
        .ok_or_else(|| SearchError::UnknownNode(id.clone()))
}

/// Least cost from `source` to `target` alone, stopping as soon as it is final.
pub(crate) fn cost_between(graph: &FareGraph, source: NodeIndex, target: NodeIndex) -> f64 {
    dijkstra(graph, source, Some(target)).costs.cost(target)
}

/// Least costs from `source` to every node.
pub(crate) fn cost_table(graph: &FareGraph, source: NodeIndex) -> CostTable {
    dijkstra(graph, source, None).costs
}

/// Find the cheapest route from `source` to `target`.
///
/// Fails with [`SearchError::UnknownNode`] if either airport is missing from
/// the graph. A target in another component yields [`Route::unreachable`].
pub fn shortest_path(
    graph: &FareGraph,
    source: &AirportId,
    target: &AirportId,
) -> Result<Route, SearchError> {
    let from = node_of(graph, source)?;
    let to = node_of(graph, target)?;

    let space = dijkstra(graph, from, Some(to));
    let cost = space.costs.cost(to);
    if !cost.is_finite() {
        return Ok(Route::unreachable());
    }

    let path = space
        .predecessors
        .path_to(to)
        .into_iter()
        .filter_map(|index| graph.airport(index).cloned())
        .collect();

    Ok(Route { path, cost })
}

/// Least costs from `source` to every airport of the graph.
pub fn costs_from(graph: &FareGraph, source: &AirportId) -> Result<CostTable, SearchError> {
    let from = node_of(graph, source)?;
    Ok(cost_table(graph, from))
}
