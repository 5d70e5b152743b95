//! The undirected fare graph.

use indexmap::IndexMap;

use crate::domain::{AirportId, Fare, FareRecord};

use super::error::BuildError;
use super::row::FareRow;

/// Position of an airport in the graph's insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// An outgoing edge: the neighbor and the fare to reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareEdge {
    pub to: NodeIndex,
    pub fare: Fare,
}

/// Adjacency lists over airports, keyed in first-seen order.
///
/// Every record contributes an edge in each direction with the same fare,
/// so the graph is symmetric. Parallel edges between the same pair are
/// kept as-is; the path search only ever keeps the cheapest.
///
/// The graph is built once and read-only afterwards. Node order is the
/// order airports first appear in the record stream (origin before
/// destination), which is also the candidate order of the meeting-point
/// search.
#[derive(Debug, Clone, Default)]
pub struct FareGraph {
    nodes: IndexMap<AirportId, Vec<FareEdge>>,
    edge_count: usize,
}

impl FareGraph {
    /// Build a graph from validated fare records.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FareRecord>,
    {
        let mut graph = Self::default();
        for record in records {
            graph.insert(&record);
        }
        graph
    }

    /// Build a graph from raw tabular rows.
    ///
    /// Stops at the first row that fails validation.
    pub fn from_rows<I>(rows: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = FareRow>,
    {
        let mut graph = Self::default();
        for row in rows {
            let record = row.validate()?;
            graph.insert(&record);
        }
        Ok(graph)
    }

    fn insert(&mut self, record: &FareRecord) {
        let origin = self.ensure_node(&record.origin);
        let destination = self.ensure_node(&record.destination);

        self.nodes[origin.0].push(FareEdge {
            to: destination,
            fare: record.fare,
        });
        self.nodes[destination.0].push(FareEdge {
            to: origin,
            fare: record.fare,
        });
        self.edge_count += 2;
    }

    fn ensure_node(&mut self, id: &AirportId) -> NodeIndex {
        if let Some(index) = self.nodes.get_index_of(id) {
            return NodeIndex(index);
        }
        let (index, _) = self.nodes.insert_full(id.clone(), Vec::new());
        NodeIndex(index)
    }

    /// Number of airports.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges (two per record).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the graph has no airports.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if an airport is in the graph.
    pub fn contains(&self, id: &AirportId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up the index of an airport.
    pub fn index_of(&self, id: &AirportId) -> Option<NodeIndex> {
        self.nodes.get_index_of(id).map(NodeIndex)
    }

    /// Look up the airport at an index.
    pub fn airport(&self, index: NodeIndex) -> Option<&AirportId> {
        self.nodes.get_index(index.0).map(|(id, _)| id)
    }

    /// All airports in insertion order.
    pub fn airports(&self) -> impl ExactSizeIterator<Item = &AirportId> + '_ {
        self.nodes.keys()
    }

    /// Outgoing edges of the airport at `index`.
    ///
    /// Returns an empty slice for an index outside the graph.
    pub fn edges(&self, index: NodeIndex) -> &[FareEdge] {
        self.nodes
            .get_index(index.0)
            .map(|(_, edges)| edges.as_slice())
            .unwrap_or_default()
    }

    /// Neighbors of an airport with the fare of each edge, in insertion order.
    ///
    /// Returns `None` if the airport is not in the graph.
    pub fn neighbors(&self, id: &AirportId) -> Option<Vec<(&AirportId, Fare)>> {
        let edges = self.nodes.get(id)?;
        Some(
            edges
                .iter()
                .filter_map(|edge| self.airport(edge.to).map(|to| (to, edge.fare)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> AirportId {
        AirportId::parse(s).unwrap()
    }

    fn record(from: &str, to: &str, fare: f64) -> FareRecord {
        FareRecord::new(id(from), id(to), Fare::new(fare).unwrap())
    }

    fn fares_between(graph: &FareGraph, from: &str, to: &str) -> Vec<f64> {
        graph
            .neighbors(&id(from))
            .unwrap()
            .into_iter()
            .filter(|(n, _)| n.as_str() == to)
            .map(|(_, fare)| fare.value())
            .collect()
    }

    #[test]
    fn empty_graph() {
        let graph = FareGraph::build(Vec::new());
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(&id("MSP")).is_none());
    }

    #[test]
    fn edges_are_symmetric() {
        let graph = FareGraph::build(vec![record("MSP", "DCA", 189.0)]);

        assert_eq!(fares_between(&graph, "MSP", "DCA"), vec![189.0]);
        assert_eq!(fares_between(&graph, "DCA", "MSP"), vec![189.0]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn every_endpoint_is_a_node() {
        let graph = FareGraph::build(vec![record("MSP", "DCA", 10.0), record("DCA", "MIA", 5.0)]);

        assert_eq!(graph.node_count(), 3);
        assert!(graph.contains(&id("MSP")));
        assert!(graph.contains(&id("DCA")));
        assert!(graph.contains(&id("MIA")));
        assert!(!graph.contains(&id("SEA")));
    }

    #[test]
    fn insertion_order_is_first_seen() {
        let graph = FareGraph::build(vec![
            record("B", "C", 1.0),
            record("A", "B", 1.0),
            record("C", "D", 1.0),
        ]);

        let order: Vec<&str> = graph.airports().map(AirportId::as_str).collect();
        assert_eq!(order, vec!["B", "C", "A", "D"]);
        assert_eq!(graph.index_of(&id("A")), Some(NodeIndex(2)));
        assert_eq!(graph.airport(NodeIndex(3)), Some(&id("D")));
        assert_eq!(graph.airport(NodeIndex(4)), None);
    }

    #[test]
    fn duplicate_records_are_kept() {
        let graph = FareGraph::build(vec![record("MSP", "DCA", 200.0), record("MSP", "DCA", 150.0)]);

        assert_eq!(fares_between(&graph, "MSP", "DCA"), vec![200.0, 150.0]);
        assert_eq!(fares_between(&graph, "DCA", "MSP"), vec![200.0, 150.0]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn self_loop_record() {
        let graph = FareGraph::build(vec![record("MSP", "MSP", 0.0)]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(fares_between(&graph, "MSP", "MSP"), vec![0.0, 0.0]);
    }

    #[test]
    fn edges_out_of_range_is_empty() {
        let graph = FareGraph::build(vec![record("MSP", "DCA", 1.0)]);
        assert!(graph.edges(NodeIndex(10)).is_empty());
        assert_eq!(graph.edges(NodeIndex(0)).len(), 1);
    }

    #[test]
    fn from_rows_builds_graph() {
        let rows = vec![
            FareRow::new(1, "A", "B", "10"),
            FareRow::new(2, "B", "C", "5"),
        ];
        let graph = FareGraph::from_rows(rows).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(fares_between(&graph, "C", "B"), vec![5.0]);
    }

    #[test]
    fn from_rows_stops_at_first_bad_row() {
        let rows = vec![
            FareRow::new(1, "A", "B", "10"),
            FareRow::new(2, "B", "", "5"),
            FareRow::new(3, "C", "D", "abc"),
        ];
        let err = FareGraph::from_rows(rows).unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingField {
                row: 2,
                field: "destination"
            }
        );
    }

    #[test]
    fn from_rows_rejects_negative_fare() {
        let rows = vec![FareRow::new(1, "A", "B", "-1")];
        assert!(matches!(
            FareGraph::from_rows(rows),
            Err(BuildError::MalformedRecord { row: 1, .. })
        ));
    }
}
