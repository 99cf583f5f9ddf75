//! REST API handlers for catalogue operations
//!
//! Thin pass-throughs over `Catalog`; validation failures come back as a
//! field-keyed error map with HTTP 422.

use super::models::{ProductDraft, ProductUpdate};
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

/// Creates routes for catalogue operations.
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Endpoint: GET /products
async fn list_products(State(state): State<SharedState>) -> Response {
    Json(state.catalog.read().products()).into_response()
}

/// Endpoint: GET /products/:id
async fn get_product(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    match state.catalog.read().by_id(&id) {
        Some(product) => Json(product.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no product with id {id}") })),
        )
            .into_response(),
    }
}

/// Endpoint: POST /products
async fn create_product(
    State(state): State<SharedState>,
    Json(draft): Json<ProductDraft>,
) -> Response {
    match state.catalog.write().add_product(draft) {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": errors })),
        )
            .into_response(),
    }
}

/// Endpoint: PUT /products/:id
async fn update_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(update): Json<ProductUpdate>,
) -> Response {
    match state.catalog.write().modify_product(&id, update) {
        Ok(product) => Json(product).into_response(),
        Err(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": errors })),
        )
            .into_response(),
    }
}

/// Endpoint: DELETE /products/:id
async fn delete_product(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    match state.catalog.write().remove_product(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}
