//! Fare graph builder.
//!
//! Turns a flat list of fare quotes into adjacency lists over airports.
//! Fares are treated as undirected, so each quote yields an edge in each
//! direction.

mod error;
mod fare_graph;
mod row;

pub use error::BuildError;
pub use fare_graph::{FareEdge, FareGraph, NodeIndex};
pub use row::FareRow;
