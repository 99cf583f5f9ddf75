//! REST API handlers for submitted orders

use super::models::StatusInput;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::json;

/// Creates routes for order lookups and status changes.
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", put(update_status))
}

/// Endpoint: GET /orders/:id
async fn get_order(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    match state.orders.get(&id) {
        Some(order) => Json(order.summary()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no order with id {id}") })),
        )
            .into_response(),
    }
}

/// Endpoint: PUT /orders/:id/status
/// Transitions are unconditional among the status set.
async fn update_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusInput>,
) -> Response {
    match state.orders.get_mut(&id) {
        Some(mut order) => {
            order.update_status(payload.status);
            Json(order.summary()).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no order with id {id}") })),
        )
            .into_response(),
    }
}
