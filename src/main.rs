use std::net::SocketAddr;
use std::sync::Arc;
use storefront_core::catalog::models::ProductDraft;
use storefront_core::router::create_app_router;
use storefront_core::state::{spawn_autosave, AppState};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Puts a few products on the shelf so a fresh instance is browsable.
fn seed_catalogue(state: &AppState) {
    let drafts = [
        ("Enamel Mug", "14.50", "350ml camp mug, speckled finish.", "25"),
        ("Linen Tea Towel", "9.95", "Stonewashed linen, 50x70cm.", "40"),
        ("Beeswax Candle", "22.00", "Hand-poured pillar candle.", "12"),
    ];
    let mut catalog = state.catalog.write();
    for (name, price, description, qty) in drafts {
        let draft = ProductDraft {
            id: None,
            name: name.into(),
            price: price.into(),
            description: description.into(),
            available: true,
            qty: qty.into(),
        };
        if let Err(errors) = catalog.add_product(draft) {
            warn!(name, %errors, "seed product rejected");
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize application state
    let state = Arc::new(AppState::new());
    seed_catalogue(&state);

    // Fallback persistence sweep behind the per-mutation write-through
    spawn_autosave(state.clone(), std::time::Duration::from_secs(30));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Configure the server address
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    info!("Server running on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
