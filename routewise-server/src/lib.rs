//! Airport meeting-point planner.
//!
//! Given a table of fares between airport pairs, finds the airport where a
//! group of travelers flying from different origins can meet for the
//! lowest combined fare. Exposed as a library, a CLI and an HTTP API.

pub mod cache;
pub mod domain;
pub mod fares;
pub mod graph;
pub mod planner;
pub mod web;
