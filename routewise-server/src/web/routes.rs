//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::domain::AirportId;
use crate::graph::FareGraph;
use crate::planner::{MeetingConfig, SearchError, plan_meeting, shortest_path};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/airports", get(list_airports))
        .route("/api/meeting", post(find_meeting))
        .route("/api/path", get(find_path))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the airports of the fare graph.
async fn list_airports(State(state): State<AppState>) -> Json<AirportsResponse> {
    let airports = state.graph.airports().map(AirportId::to_string).collect();
    Json(AirportsResponse { airports })
}

/// Find the cheapest meeting point for a group of travelers.
async fn find_meeting(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: MeetingRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(&body), "Rejected meeting request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let origins = parse_origins(&req.airports, state.server.max_origins)?;

    if let Some(plan) = state.cache.get(&origins).await {
        return Ok(Json(MeetingResponse::from_plan(&plan)).into_response());
    }

    let key = origins.clone();
    let plan = run_search(&state, move |graph, config| {
        plan_meeting(graph, &origins, config)
    })
    .await?;

    let plan = Arc::new(plan);
    state.cache.insert(key, plan.clone()).await;

    Ok(Json(MeetingResponse::from_plan(&plan)).into_response())
}

/// Find the cheapest route between two airports.
async fn find_path(
    State(state): State<AppState>,
    Query(req): Query<PathRequest>,
) -> Result<Json<PathResponse>, AppError> {
    let from = AirportId::parse_normalized(&req.from).map_err(|e| AppError::BadRequest {
        message: format!("Invalid origin airport {:?}: {e}", req.from),
    })?;
    let to = AirportId::parse_normalized(&req.to).map_err(|e| AppError::BadRequest {
        message: format!("Invalid destination airport {:?}: {e}", req.to),
    })?;

    let (source, target) = (from.clone(), to.clone());
    let route = run_search(&state, move |graph, _| shortest_path(graph, &source, &target)).await?;

    Ok(Json(PathResponse::from_route(&from, &to, &route)))
}

/// Validate and normalize the origins of a meeting request.
fn parse_origins(airports: &[String], max_origins: usize) -> Result<Vec<AirportId>, AppError> {
    if airports.is_empty() {
        return Err(AppError::BadRequest {
            message: SearchError::NoOrigins.to_string(),
        });
    }

    if airports.len() > max_origins {
        return Err(AppError::BadRequest {
            message: format!(
                "Too many airports: {} given, at most {max_origins} allowed",
                airports.len()
            ),
        });
    }

    airports
        .iter()
        .map(|code| {
            AirportId::parse_normalized(code).map_err(|e| AppError::BadRequest {
                message: format!("Invalid airport {code:?}: {e}"),
            })
        })
        .collect()
}

/// Run a search on the blocking pool, bounded by the configured timeout.
///
/// A search that times out keeps running on its blocking thread until it
/// finishes; only the response is abandoned.
async fn run_search<T, F>(state: &AppState, search: F) -> Result<T, AppError>
where
    F: FnOnce(&FareGraph, &MeetingConfig) -> Result<T, SearchError> + Send + 'static,
    T: Send + 'static,
{
    let graph = state.graph.clone();
    let config = state.meeting.clone();
    let task = tokio::task::spawn_blocking(move || search(&graph, &config));

    match tokio::time::timeout(state.server.search_timeout, task).await {
        Ok(Ok(result)) => result.map_err(AppError::from),
        Ok(Err(join_error)) => Err(AppError::Internal {
            message: format!("Search task failed: {join_error}"),
        }),
        Err(_) => Err(AppError::Timeout {
            message: format!(
                "Search did not finish within {:?}",
                state.server.search_timeout
            ),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    Timeout { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        let message = e.to_string();
        match e {
            SearchError::NoOrigins => AppError::BadRequest { message },
            SearchError::UnknownNode(_) => AppError::NotFound { message },
            SearchError::NoReachableMeetingPoint => AppError::Unprocessable { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::cache::CacheConfig;
    use crate::domain::{Fare, FareRecord};
    use crate::web::ServerConfig;

    fn id(s: &str) -> AirportId {
        AirportId::parse(s).unwrap()
    }

    fn test_graph() -> FareGraph {
        let edges = [
            ("MSP", "ORD", 100.0),
            ("DCA", "ORD", 120.0),
            ("MIA", "ORD", 150.0),
            ("MSP", "DCA", 300.0),
            ("SEA", "LAX", 90.0),
        ];
        FareGraph::build(
            edges
                .iter()
                .map(|&(a, b, fare)| FareRecord::new(id(a), id(b), Fare::new(fare).unwrap())),
        )
    }

    fn test_state(max_origins: usize) -> AppState {
        AppState::new(
            test_graph(),
            MeetingConfig::default(),
            ServerConfig::new(max_origins, Duration::from_secs(30)),
            &CacheConfig::default(),
        )
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_meeting(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/meeting")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = create_router(test_state(10))
            .oneshot(get("/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn lists_airports_in_dataset_order() {
        let (status, body) = send(test_state(10), get("/api/airports")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "airports": ["MSP", "ORD", "DCA", "MIA", "SEA", "LAX"] })
        );
    }

    #[tokio::test]
    async fn finds_hub_as_meeting_point() {
        let (status, body) = send(
            test_state(10),
            post_meeting(json!({ "airports": ["msp", "DCA", " mia "] })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meeting"], "ORD");
        assert_eq!(body["total_cost"], 370.0);

        let itineraries = body["itineraries"].as_array().unwrap();
        assert_eq!(itineraries.len(), 3);
        assert_eq!(
            itineraries[0],
            json!({ "origin": "MSP", "path": ["MSP", "ORD"], "cost": 100.0 })
        );
        assert_eq!(itineraries[2]["origin"], "MIA");
    }

    #[tokio::test]
    async fn meeting_answer_is_cached() {
        let state = test_state(10);
        let origins = vec![id("MSP"), id("DCA")];
        assert!(state.cache.get(&origins).await.is_none());

        let (status, _) = send(
            state.clone(),
            post_meeting(json!({ "airports": ["MSP", "DCA"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let cached = state.cache.get(&origins).await.unwrap();
        assert_eq!(cached.meeting.total_cost, 220.0);

        let (status, body) = send(state, post_meeting(json!({ "airports": ["MSP", "DCA"] }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_cost"], 220.0);
    }

    #[tokio::test]
    async fn empty_airport_list_is_bad_request() {
        let (status, body) = send(test_state(10), post_meeting(json!({ "airports": [] }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn too_many_airports_is_bad_request() {
        let (status, _) = send(
            test_state(2),
            post_meeting(json!({ "airports": ["MSP", "DCA", "MIA"] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_airport_is_bad_request() {
        let (status, _) = send(
            test_state(10),
            post_meeting(json!({ "airports": ["MSP", "  "] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/meeting")
            .body(Body::from("{ not json"))
            .unwrap();
        let (status, body) = send(test_state(10), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn unknown_airport_is_not_found() {
        let (status, body) = send(
            test_state(10),
            post_meeting(json!({ "airports": ["MSP", "JFK"] })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "unknown airport: JFK");
    }

    #[tokio::test]
    async fn disconnected_origins_are_unprocessable() {
        let (status, _) = send(
            test_state(10),
            post_meeting(json!({ "airports": ["MSP", "SEA"] })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn path_through_hub() {
        let (status, body) = send(test_state(10), get("/api/path?from=msp&to=DCA")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "from": "MSP", "to": "DCA", "path": ["MSP", "ORD", "DCA"], "cost": 220.0 })
        );
    }

    #[tokio::test]
    async fn unreachable_path_has_null_cost() {
        let (status, body) = send(test_state(10), get("/api/path?from=MSP&to=LAX")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"], json!([]));
        assert_eq!(body["cost"], Value::Null);
    }

    #[tokio::test]
    async fn path_to_unknown_airport_is_not_found() {
        let (status, _) = send(test_state(10), get("/api/path?from=MSP&to=JFK")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn search_errors_map_to_status_codes() {
        let cases = [
            (SearchError::NoOrigins, StatusCode::BAD_REQUEST),
            (SearchError::UnknownNode(id("JFK")), StatusCode::NOT_FOUND),
            (
                SearchError::NoReachableMeetingPoint,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, expected) in cases {
            let response = AppError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn timeout_is_gateway_timeout() {
        let response = AppError::Timeout {
            message: "slow".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
