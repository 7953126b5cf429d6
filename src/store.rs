//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{EnrichedChallenge, Event};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Events from the last successful load
    pub events: Vec<Event>,
    /// Aggregated challenge collection, already joined with organizations
    pub challenges: Vec<EnrichedChallenge>,
    /// Root fetch failure, rendered as a retry-prompting banner
    pub load_error: Option<String>,
    /// A load pass is in flight
    pub loading: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace both collections after a successful load pass
pub fn store_set_loaded(store: &AppStore, events: Vec<Event>, challenges: Vec<EnrichedChallenge>) {
    *store.events().write() = events;
    *store.challenges().write() = challenges;
    *store.load_error().write() = None;
    *store.loading().write() = false;
}

/// Record a fatal root-fetch failure
pub fn store_set_error(store: &AppStore, message: String) {
    *store.load_error().write() = Some(message);
    *store.loading().write() = false;
}

/// Find an event by id in the store
pub fn store_event(store: &AppStore, event_id: u32) -> Option<Event> {
    store.events().read().iter().find(|e| e.event_id == event_id).cloned()
}
