//! Application state
//!
//! Explicitly constructed, dependency-injected services owned by one
//! context and passed by handle to whoever needs them; there is no ambient
//! global access. Per-session maps use `DashMap` so handlers can mutate
//! without an external mutex; the catalogue and ledger are single shared
//! instances behind their own locks.

use crate::cart::state::Cart;
use crate::catalog::state::Catalog;
use crate::checkout::state::{CheckoutSession, VALIDITY_DEBOUNCE};
use crate::directory::{NullDirectory, ProductDirectory};
use crate::order::models::Order;
use crate::payment::ledger::CardLedger;
use crate::persistence::{self, KeyValueStore, MemoryStore};
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::info;

/// Shared application state that can be safely passed between threads.
pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub catalog: RwLock<Catalog>,
    /// Carts keyed by session id.
    pub carts: DashMap<String, Cart>,
    /// Checkout sessions keyed by session id.
    pub checkouts: DashMap<String, CheckoutSession>,
    /// Submitted orders keyed by order id.
    pub orders: DashMap<String, Order>,
    pub ledger: Mutex<CardLedger>,
    pub store: Arc<dyn KeyValueStore>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// State backed by the in-memory store and the stand-in directory.
    pub fn new() -> Self {
        Self::with_collaborators(Arc::new(MemoryStore::new()), Arc::new(NullDirectory::new()))
    }

    /// State wired to explicit collaborators (dependency injection seam).
    pub fn with_collaborators(
        store: Arc<dyn KeyValueStore>,
        directory: Arc<dyn ProductDirectory>,
    ) -> Self {
        Self {
            catalog: RwLock::new(Catalog::new(store.clone(), directory)),
            carts: DashMap::new(),
            checkouts: DashMap::new(),
            orders: DashMap::new(),
            ledger: Mutex::new(CardLedger::with_default_records()),
            store,
        }
    }

    /// Fetches the session's cart, restoring it from the store on first
    /// touch and subscribing the persistence write-through to its change
    /// notifications.
    pub fn cart_entry(&self, session_id: &str) -> RefMut<'_, String, Cart> {
        self.carts
            .entry(session_id.to_string())
            .or_insert_with(|| {
                let lines =
                    persistence::load_cart(self.store.as_ref(), session_id).unwrap_or_default();
                let mut cart = Cart::from_lines(lines);
                let store = self.store.clone();
                let key = session_id.to_string();
                cart.subscribe(Box::new(move |lines| {
                    persistence::save_cart(store.as_ref(), &key, lines);
                }));
                cart
            })
    }

    /// Fetches the session's checkout state, creating it on first touch
    /// with debounced validity logging.
    pub fn checkout_entry(&self, session_id: &str) -> RefMut<'_, String, CheckoutSession> {
        self.checkouts.entry(session_id.to_string()).or_insert_with(|| {
            CheckoutSession::debounced(VALIDITY_DEBOUNCE, |valid| {
                info!(valid, "checkout validity changed");
            })
        })
    }

    /// Pushes the current cart size into the session's validity aggregator,
    /// if a checkout has started.
    pub fn sync_cart_count(&self, session_id: &str, count: u32) {
        if let Some(mut session) = self.checkouts.get_mut(session_id) {
            session.aggregator.set_cart_item_count(count);
        }
    }
}

/// Periodic fallback save: re-serializes the catalogue and every live cart
/// as a safety net against missed write-through calls. Idempotent; needs no
/// cancellation guarantee beyond process shutdown.
pub fn spawn_autosave(
    state: SharedState,
    period: std::time::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await; // the first tick completes immediately
        loop {
            ticker.tick().await;
            persistence::save_catalogue(state.store.as_ref(), &state.catalog.read().products());
            for entry in state.carts.iter() {
                persistence::save_cart(state.store.as_ref(), entry.key(), entry.value().items());
            }
        }
    })
}
