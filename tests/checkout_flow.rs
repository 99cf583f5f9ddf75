//! Integration tests for the storefront checkout flow
//!
//! These tests cover the complete path twice:
//! - directly against the library types (catalogue -> cart -> aggregator ->
//!   shipping -> payment -> order)
//! - over the REST surface, including session cookies

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use storefront_core::cart::helpers::{products_in_cart, total_price};
use storefront_core::cart::state::Cart;
use storefront_core::catalog::models::ProductDraft;
use storefront_core::catalog::state::Catalog;
use storefront_core::checkout::aggregator::CheckoutAggregator;
use storefront_core::order::models::{Order, OrderStatus, PaymentInfo};
use storefront_core::payment::ledger::CardLedger;
use storefront_core::payment::models::CardDetails;
use storefront_core::payment::validate::mask_card_number;
use storefront_core::router::create_app_router;
use storefront_core::shipping::models::{Address, Dimensions, Package};
use storefront_core::shipping::{resolver, tables};
use storefront_core::state::AppState;

fn draft(id: &str, name: &str, price: &str, qty: &str) -> ProductDraft {
    ProductDraft {
        id: Some(id.into()),
        name: name.into(),
        price: price.into(),
        description: format!("{name} for testing."),
        available: true,
        qty: qty.into(),
    }
}

fn melbourne() -> Address {
    Address {
        street: "1 Collins St".into(),
        town: "Melbourne".into(),
        state: "VIC".into(),
        postcode: "3000".into(),
        country: "AU".into(),
    }
}

fn small_package() -> Package {
    Package {
        weight_kg: Decimal::new(20, 1), // 2.0 kg
        dimensions: Dimensions {
            length_cm: Decimal::from(30),
            width_cm: Decimal::from(20),
            height_cm: Decimal::from(10),
        },
        is_fragile: false,
    }
}

#[test]
fn library_end_to_end_cart_to_order() {
    // Catalogue: A at 10.00, B at 5.00.
    let mut catalog = Catalog::in_memory();
    catalog.add_product(draft("1", "Product A", "10.00", "10")).unwrap();
    catalog.add_product(draft("2", "Product B", "5.00", "10")).unwrap();
    let products = catalog.products();

    // Cart: 2x A + 1x B = 25.00.
    let mut cart = Cart::new();
    cart.add_product("1", 2);
    cart.add_product("2", 1);
    let subtotal = total_price(cart.items(), &products);
    assert_eq!(subtotal, Decimal::new(2500, 2));

    // Aggregator flips to valid once all three inputs are in.
    let mut aggregator = CheckoutAggregator::new();
    aggregator.set_cart_item_count(cart.item_count());
    assert!(!aggregator.is_checkout_valid());

    // Shipping: threshold of 100 not met, kanga quotes 8.99 x 1.0.
    let carriers = tables::default_carriers();
    let options =
        resolver::resolve_options(&carriers, &melbourne(), &small_package(), subtotal).unwrap();
    let selected = &options[0];
    assert_eq!(selected.carrier_id, "kanga");
    assert_eq!(selected.price, Decimal::new(899, 2));
    assert!(!selected.free_shipping);
    aggregator.set_shipping_valid(true);

    // Payment: 33.99 total, charged with the 3% fee.
    let card = CardDetails {
        card_number: "4242424242424242".into(),
        expiry: "12/27".into(),
        cvv: "123".into(),
    };
    aggregator.set_payment_valid(true);
    assert!(aggregator.is_checkout_valid());

    let total = subtotal + selected.price;
    assert_eq!(total, Decimal::new(3399, 2));

    let mut ledger = CardLedger::with_default_records();
    let receipt = ledger.charge(&card, total).unwrap();
    assert_eq!(receipt.amount_charged, Decimal::new(350097, 4).round_dp(2));

    // Order: frozen snapshot, submits into Processing.
    let mut order = Order::new();
    order.add_items(products_in_cart(cart.items(), &products));
    order.set_shipping(melbourne(), selected.price);
    order.set_payment(PaymentInfo {
        masked_card: mask_card_number(&card.card_number),
        transaction_id: receipt.transaction_id.clone(),
    });
    assert!(order.submit());
    assert_eq!(order.status(), OrderStatus::Processing);

    let summary = order.summary();
    assert_eq!(summary.subtotal, Decimal::new(2500, 2));
    assert_eq!(summary.total, Decimal::new(3399, 2));
    assert_eq!(summary.payment.unwrap().masked_card, "**** **** **** 4242");

    cart.clear();
    assert!(cart.is_empty());
}

// =============================================================================
// REST surface
// =============================================================================

/// Helper function to create a test app instance
fn create_test_app() -> axum::Router {
    let state = Arc::new(AppState::new());
    create_app_router(state)
}

/// Sends a JSON request, returning status, parsed body, and any session
/// cookie issued by the server.
async fn send_request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => Body::from(serde_json::to_string(&json).unwrap()),
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(String::from);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body, set_cookie)
}

#[tokio::test]
async fn rest_checkout_happy_path() {
    let app = create_test_app();

    // Catalogue setup.
    let (status, product, _) = send_request(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": "Product A",
            "price": "10.00",
            "description": "Ten dollars.",
            "qty": "10"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["id"], "1");

    send_request(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": "Product B",
            "price": "5.00",
            "description": "Five dollars.",
            "qty": "10"
        })),
        None,
    )
    .await;

    // First cart touch issues the session cookie.
    let (status, body, cookie) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({ "productId": "1", "quantity": 2 })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itemCount"], 2);
    let cookie = cookie.expect("first cart call should set a session cookie");

    let (_, body, _) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({ "productId": "2" })), // quantity defaults to 1
        Some(&cookie),
    )
    .await;
    assert_eq!(body["itemCount"], 3);

    // Shipping quote.
    let (status, body, _) = send_request(
        &app,
        "POST",
        "/checkout/quote",
        Some(json!({
            "address": {
                "street": "1 Collins St",
                "town": "Melbourne",
                "state": "VIC",
                "postcode": "3000",
                "country": "AU"
            },
            "package": {
                "weightKg": "2.0",
                "dimensions": { "lengthCm": "30", "widthCm": "20", "heightCm": "10" },
                "isFragile": false
            }
        })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["options"][0]["carrierId"], "kanga");
    assert_eq!(body["options"][0]["price"], "8.99");

    // Payment details.
    let (status, body, _) = send_request(
        &app,
        "POST",
        "/checkout/payment",
        Some(json!({ "cardNumber": "4242424242424242", "expiry": "12/27", "cvv": "123" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);

    // Submit: 25.00 + 8.99 shipping.
    let (status, body, _) =
        send_request(&app, "POST", "/checkout/submit", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "submitted");
    assert_eq!(body["order"]["total"], "33.99");
    assert_eq!(body["order"]["status"], "processing");
    assert_eq!(
        body["order"]["payment"]["maskedCard"],
        "**** **** **** 4242"
    );
    let order_id = body["order"]["orderId"].as_str().unwrap().to_string();

    // Cart is cleared by submission.
    let (_, body, _) = send_request(&app, "GET", "/cart", None, Some(&cookie)).await;
    assert_eq!(body["itemCount"], 0);

    // Order lookup and status change.
    let (status, body, _) =
        send_request(&app, "GET", &format!("/orders/{order_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "processing");

    let (status, body, _) = send_request(
        &app,
        "PUT",
        &format!("/orders/{order_id}/status"),
        Some(json!({ "status": "shipped" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "shipped");
}

#[tokio::test]
async fn rest_product_validation_reports_field_errors() {
    let app = create_test_app();

    let (status, body, _) = send_request(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": "   ",
            "price": "free",
            "description": "ok",
            "qty": "2"
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["name"], "must not be empty");
    assert_eq!(body["errors"]["price"], "must be a positive number");
}

#[tokio::test]
async fn rest_quantity_increase_is_capped_at_stock() {
    let app = create_test_app();

    send_request(
        &app,
        "POST",
        "/products",
        Some(json!({
            "id": "7",
            "name": "Scarce",
            "price": "3.00",
            "description": "Only five.",
            "qty": "5"
        })),
        None,
    )
    .await;

    let (_, _, cookie) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({ "productId": "7", "quantity": 5 })),
        None,
    )
    .await;
    let cookie = cookie.unwrap();

    let (status, body, _) = send_request(
        &app,
        "PUT",
        "/cart/items/7",
        Some(json!({ "quantity": 6 })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["itemCount"], 5);

    // Zero removes the line.
    let (_, body, _) = send_request(
        &app,
        "PUT",
        "/cart/items/7",
        Some(json!({ "quantity": 0 })),
        Some(&cookie),
    )
    .await;
    assert_eq!(body["itemCount"], 0);
}

#[tokio::test]
async fn rest_unserviceable_address_fails_with_issues() {
    let app = create_test_app();

    let (_, _, cookie) = send_request(&app, "GET", "/cart", None, None).await;
    let cookie = cookie.unwrap();

    let (status, body, _) = send_request(
        &app,
        "POST",
        "/checkout/quote",
        Some(json!({
            "address": {
                "street": "1 Somewhere",
                "town": "Nowhere",
                "state": "VIC",
                "postcode": "99",
                "country": "AU"
            },
            "package": {
                "weightKg": "1.0",
                "dimensions": { "lengthCm": "10", "widthCm": "10", "heightCm": "10" },
                "isFragile": false
            }
        })),
        Some(&cookie),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["issues"][0], "postcode must be 4 digits");
}

#[tokio::test]
async fn rest_submit_refuses_until_checkout_is_valid() {
    let app = create_test_app();

    let (_, _, cookie) = send_request(&app, "GET", "/cart", None, None).await;
    let cookie = cookie.unwrap();

    // Empty cart, no shipping, no payment.
    let (status, body, _) =
        send_request(&app, "POST", "/checkout/submit", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "checkout is not ready to submit");
}

#[tokio::test]
async fn rest_declined_card_leaves_cart_intact() {
    let app = create_test_app();

    send_request(
        &app,
        "POST",
        "/products",
        Some(json!({
            "id": "1",
            "name": "Pricey",
            "price": "500.00",
            "description": "Too expensive for the low-balance card.",
            "qty": "3"
        })),
        None,
    )
    .await;

    let (_, _, cookie) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({ "productId": "1" })),
        None,
    )
    .await;
    let cookie = cookie.unwrap();

    send_request(
        &app,
        "POST",
        "/checkout/quote",
        Some(json!({
            "address": {
                "street": "1 Collins St",
                "town": "Melbourne",
                "state": "VIC",
                "postcode": "3000",
                "country": "AU"
            },
            "package": {
                "weightKg": "1.0",
                "dimensions": { "lengthCm": "10", "widthCm": "10", "heightCm": "10" },
                "isFragile": false
            }
        })),
        Some(&cookie),
    )
    .await;

    // Low-balance ledger card: 15.50 cannot cover 500.00 free-shipped.
    send_request(
        &app,
        "POST",
        "/checkout/payment",
        Some(json!({ "cardNumber": "4000056655665556", "expiry": "03/27", "cvv": "999" })),
        Some(&cookie),
    )
    .await;

    let (status, body, _) =
        send_request(&app, "POST", "/checkout/submit", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["error"], "insufficient funds");

    // Nothing was consumed: the cart still holds the item.
    let (_, body, _) = send_request(&app, "GET", "/cart", None, Some(&cookie)).await;
    assert_eq!(body["itemCount"], 1);
}
