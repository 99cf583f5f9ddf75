//! REST API handlers for the checkout flow
//!
//! Quote -> (optional select) -> payment details -> submit. Each step feeds
//! the session's validity aggregator; submit refuses until shipping and
//! payment are valid and the cart holds at least one unit.

use super::models::{PaymentCheckResponse, QuoteInput, QuoteResponse, SelectOptionInput};
use crate::cart::helpers::{format_line_summary, products_in_cart, total_price};
use crate::order::models::{Order, PaymentInfo};
use crate::payment::models::CardDetails;
use crate::payment::validate::{mask_card_number, validate_card_format};
use crate::session::{attach_session_cookie, resolve_session_id};
use crate::shipping::models::ShippingError;
use crate::shipping::{resolver, tables};
use crate::state::SharedState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::info;

/// Creates routes for the checkout flow.
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/checkout/quote", post(quote_shipping))
        .route("/checkout/select", post(select_option))
        .route("/checkout/payment", post(payment_details))
        .route("/checkout/submit", post(submit_checkout))
}

fn with_session_cookie(mut response: Response, session_id: &str, is_new: bool) -> Response {
    if is_new {
        attach_session_cookie(&mut response, session_id);
    }
    response
}

/// Endpoint: POST /checkout/quote
/// Resolves priced delivery options for the session's cart.
async fn quote_shipping(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<QuoteInput>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);

    let products = state.catalog.read().products();
    let (subtotal, item_count) = {
        let cart = state.cart_entry(&session_id);
        (total_price(cart.items(), &products), cart.item_count())
    };

    let carriers = tables::default_carriers();
    let outcome = resolver::resolve_options(&carriers, &payload.address, &payload.package, subtotal);

    let mut session = state.checkout_entry(&session_id);
    session.aggregator.set_cart_item_count(item_count);

    let response = match outcome {
        Ok(options) => {
            session.address = Some(payload.address);
            session.package = Some(payload.package);
            session.selected = Some(options[0].clone());
            session.quoted = options.clone();
            session.aggregator.set_shipping_valid(true);
            Json(QuoteResponse {
                status: "quoted".to_string(),
                options,
            })
            .into_response()
        }
        Err(err) => {
            session.aggregator.set_shipping_valid(false);
            session.quoted.clear();
            session.selected = None;
            let body = match err {
                ShippingError::InvalidAddress { issues } => json!({ "issues": issues }),
                other => json!({ "error": other.to_string() }),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
    };
    with_session_cookie(response, &session_id, is_new)
}

/// Endpoint: POST /checkout/select
/// Switches the selected delivery option among the quoted ones.
async fn select_option(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<SelectOptionInput>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let mut session = state.checkout_entry(&session_id);

    let response = match session
        .quoted
        .iter()
        .find(|option| option.carrier_id == payload.carrier_id)
        .cloned()
    {
        Some(option) => {
            session.selected = Some(option.clone());
            Json(json!({ "status": "selected", "option": option })).into_response()
        }
        None => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "carrier was not quoted for this address" })),
        )
            .into_response(),
    };
    with_session_cookie(response, &session_id, is_new)
}

/// Endpoint: POST /checkout/payment
/// Validates card details (format only, no charge) and stores them for
/// submission. The CVV never appears in any response.
async fn payment_details(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(card): Json<CardDetails>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let mut session = state.checkout_entry(&session_id);

    let response = match validate_card_format(&card) {
        Ok(_) => {
            session.card = Some(card);
            session.aggregator.set_payment_valid(true);
            Json(PaymentCheckResponse {
                valid: true,
                error: None,
            })
            .into_response()
        }
        Err(err) => {
            session.card = None;
            session.aggregator.set_payment_valid(false);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(PaymentCheckResponse {
                    valid: false,
                    error: Some(err.to_string()),
                }),
            )
                .into_response()
        }
    };
    with_session_cookie(response, &session_id, is_new)
}

/// Endpoint: POST /checkout/submit
/// Charges the card and assembles the order from the session state.
async fn submit_checkout(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);

    let products = state.catalog.read().products();
    let (lines, subtotal, item_count) = {
        let cart = state.cart_entry(&session_id);
        (
            cart.items().to_vec(),
            total_price(cart.items(), &products),
            cart.item_count(),
        )
    };

    // Gather everything the order needs while the session lock is held.
    let gathered = {
        let mut session = state.checkout_entry(&session_id);
        session.aggregator.set_cart_item_count(item_count);
        if !session.aggregator.is_checkout_valid() {
            None
        } else {
            match (
                session.address.clone(),
                session.selected.clone(),
                session.card.clone(),
            ) {
                (Some(address), Some(option), Some(card)) => Some((address, option, card)),
                _ => None,
            }
        }
    };

    let Some((address, option, card)) = gathered else {
        let response = (
            StatusCode::CONFLICT,
            Json(json!({ "error": "checkout is not ready to submit" })),
        )
            .into_response();
        return with_session_cookie(response, &session_id, is_new);
    };

    let total = subtotal + option.price;
    let receipt = match state.ledger.lock().charge(&card, total) {
        Ok(receipt) => receipt,
        Err(err) => {
            let response = (
                StatusCode::PAYMENT_REQUIRED,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
            return with_session_cookie(response, &session_id, is_new);
        }
    };

    let mut order = Order::new();
    order.add_items(products_in_cart(&lines, &products));
    order.set_shipping(address, option.price);
    order.set_payment(PaymentInfo {
        masked_card: mask_card_number(&card.card_number),
        transaction_id: receipt.transaction_id.clone(),
    });

    if !order.submit() {
        // Cart lines all pointed at vanished products; payment went
        // through, so this is reported rather than silently dropped.
        let response = (
            StatusCode::CONFLICT,
            Json(json!({ "error": "cart items are no longer available" })),
        )
            .into_response();
        return with_session_cookie(response, &session_id, is_new);
    }

    info!(
        order_id = order.order_id(),
        items = %format_line_summary(&lines),
        "checkout submitted"
    );

    let summary = order.summary();
    state.orders.insert(order.order_id().to_string(), order);
    state.cart_entry(&session_id).clear();
    state.checkouts.remove(&session_id); // discards the card details

    let response = Json(json!({
        "status": "submitted",
        "order": summary,
        "receipt": receipt,
    }))
    .into_response();
    with_session_cookie(response, &session_id, is_new)
}
