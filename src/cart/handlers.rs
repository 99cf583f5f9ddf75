//! REST API handlers for cart operations
//!
//! Every endpoint resolves the visitor's session cookie, mutates the
//! session's cart, and reports the post-state. New sessions get a
//! `Set-Cookie` on the way out.

use super::models::{AddItemInput, CartResponse, QuantityInput, SyncCartInput};
use crate::session::{attach_session_cookie, resolve_session_id};
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};

/// Creates routes for cart operations.
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(view_cart))
        .route("/cart/sync", post(sync_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", put(update_quantity).delete(remove_item))
}

/// Builds the standard cart response, pushing the fresh item count into
/// any active checkout session.
fn cart_response(state: &SharedState, status: &str, session_id: String, is_new: bool) -> Response {
    let (lines, item_count) = {
        let cart = state.cart_entry(&session_id);
        (cart.items().to_vec(), cart.item_count())
    };
    state.sync_cart_count(&session_id, item_count);

    let mut response = Json(CartResponse {
        status: status.to_string(),
        cart_id: session_id.clone(),
        lines,
        item_count,
    })
    .into_response();

    if is_new {
        attach_session_cookie(&mut response, &session_id);
    }
    response
}

/// Endpoint: GET /cart
async fn view_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    cart_response(&state, "ok", session_id, is_new)
}

/// Endpoint: POST /cart/sync
/// Replaces the backend cart with the frontend (widget) state exactly.
async fn sync_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<SyncCartInput>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    state.cart_entry(&session_id).replace_lines(payload.lines);
    cart_response(&state, "updated", session_id, is_new)
}

/// Endpoint: POST /cart/items
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemInput>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    state
        .cart_entry(&session_id)
        .add_product(&payload.product_id, payload.quantity);
    cart_response(&state, "added", session_id, is_new)
}

/// Endpoint: PUT /cart/items/:id
/// Sets a line's quantity, capped at available stock when increasing.
async fn update_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
    Json(payload): Json<QuantityInput>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let products = state.catalog.read().products();
    let accepted = state.cart_entry(&session_id).modify_quantity(
        &product_id,
        payload.quantity,
        Some(&products),
    );
    let status = if accepted { "updated" } else { "rejected" };
    cart_response(&state, status, session_id, is_new)
}

/// Endpoint: DELETE /cart/items/:id
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let changed = state.cart_entry(&session_id).remove_product(&product_id);
    let status = if changed { "removed" } else { "not_in_cart" };
    cart_response(&state, status, session_id, is_new)
}
