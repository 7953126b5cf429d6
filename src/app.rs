//! HackHub Frontend App
//!
//! Top-level component: page switching, the cached data load, and the
//! page-wide scroll-spy instance.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use leptos_scrollspy::{bind_global_scroll, create_scrollspy_signals};

use crate::aggregate::{aggregate, RestSource};
use crate::api::{self, ApiError};
use crate::cache::{
    SessionStore, ViewCache, CACHE_TTL_MS, CHALLENGES_CACHE_KEY, EVENTS_CACHE_KEY,
};
use crate::components::{
    ChallengeBoard, EventDetail, EventList, RegistrationForm, StatusBanner,
};
use crate::context::{AppContext, Page};
use crate::store::{store_set_error, store_set_loaded, AppState, AppStateStoreFields, AppStore};

/// One load pass: events through their cache, then the challenge aggregation
/// through its own. The root event fetch is the only fatal failure.
async fn load_portal_data(store: AppStore) {
    let cache = ViewCache::new(SessionStore);
    let now = js_sys::Date::now();

    let events = match cache
        .read_through(EVENTS_CACHE_KEY, CACHE_TTL_MS, now, api::list_events)
        .await
    {
        Ok(events) => events,
        Err(err) => {
            web_sys::console::warn_1(&format!("[APP] event load failed: {}", err).into());
            store_set_error(&store, err.to_string());
            return;
        }
    };

    let roots = events.clone();
    let challenges = match cache
        .read_through(CHALLENGES_CACHE_KEY, CACHE_TTL_MS, now, || async move {
            let agg = aggregate(&RestSource, &roots).await;
            if !agg.event_gaps.is_empty() || !agg.organization_gaps.is_empty() {
                web_sys::console::warn_1(
                    &format!(
                        "[APP] aggregation gaps: events {:?}, organizations {:?}",
                        agg.event_gaps, agg.organization_gaps
                    )
                    .into(),
                );
            }
            Ok::<_, ApiError>(agg.challenges)
        })
        .await
    {
        Ok(challenges) => challenges,
        Err(err) => {
            store_set_error(&store, err.to_string());
            return;
        }
    };

    web_sys::console::log_1(
        &format!("[APP] Loaded {} events, {} challenges", events.len(), challenges.len()).into(),
    );
    store_set_loaded(&store, events, challenges);
}

#[component]
pub fn App() -> impl IntoView {
    // State
    let store = Store::new(AppState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (page, set_page) = signal(Page::Events);

    // One scroll-spy instance per page; one window listener for the app lifetime
    let spy = create_scrollspy_signals();
    bind_global_scroll(spy);

    // Provide context to all children
    provide_context(store);
    provide_context(AppContext::new((reload_trigger, set_reload_trigger), (page, set_page)));
    provide_context(spy);

    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    // Load (or reload) portal data; cache expiry decides whether the network
    // is touched
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        web_sys::console::log_1(&format!("[APP] Loading portal data, trigger={}", trigger).into());
        *store.loading().write() = true;
        spawn_local(async move {
            load_portal_data(store).await;
        });
    });

    view! {
        <div class="app-layout">
            // Sticky header; the scroll-spy's 200px offset accounts for it
            <header class="top-bar">
                <h1 class="brand" on:click=move |_| ctx.goto(Page::Events)>"HackHub"</h1>
                <nav>
                    <button
                        class=move || if page.get() == Page::Events { "nav-link active" } else { "nav-link" }
                        on:click=move |_| ctx.goto(Page::Events)
                    >
                        "Events"
                    </button>
                    <button
                        class=move || if page.get() == Page::Challenges { "nav-link active" } else { "nav-link" }
                        on:click=move |_| ctx.goto(Page::Challenges)
                    >
                        "Challenges"
                    </button>
                </nav>
            </header>

            <StatusBanner />

            <main class="main-content">
                {move || match page.get() {
                    Page::Events => view! { <EventList /> }.into_any(),
                    Page::EventDetail(id) => view! { <EventDetail event_id=id /> }.into_any(),
                    Page::Challenges => view! { <ChallengeBoard /> }.into_any(),
                    Page::Register(id) => view! { <RegistrationForm event_id=id /> }.into_any(),
                }}
            </main>
        </div>
    }
}
