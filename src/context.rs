//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// Which page the portal is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Events,
    EventDetail(u32),
    Challenges,
    Register(u32),
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to re-run the page load (retry after a fatal fetch) - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to re-run the page load - write
    set_reload_trigger: WriteSignal<u32>,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        page: (ReadSignal<Page>, WriteSignal<Page>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            page: page.0,
            set_page: page.1,
        }
    }

    /// Re-run the portal data load
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Navigate to another page
    pub fn goto(&self, page: Page) {
        self.set_page.set(page);
    }
}
