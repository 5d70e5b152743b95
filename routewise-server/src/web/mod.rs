//! Web layer for the meeting-point planner.
//!
//! Provides HTTP endpoints for meeting-point and single-route queries.

mod config;
mod dto;
mod routes;
mod state;

pub use config::ServerConfig;
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
