//! Search Bar Component
//!
//! Debounced text search; the projection only re-runs once typing pauses.

use leptos::prelude::*;
use leptos::task::spawn_local;

use gloo_timers::future::TimeoutFuture;

const SEARCH_DEBOUNCE_MS: u32 = 200;

#[component]
pub fn SearchBar(
    set_search: WriteSignal<String>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    let (text, set_text) = signal(String::new());
    // Only the newest pending edit may land
    let (generation, set_generation) = signal(0u32);

    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        set_text.set(value.clone());
        let current = generation.get_untracked() + 1;
        set_generation.set(current);

        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.get_untracked() == current {
                set_search.set(value);
            }
        });
    };

    view! {
        <input
            class="search-bar"
            type="search"
            placeholder=if placeholder.is_empty() { "Search..." } else { placeholder }
            prop:value=move || text.get()
            on:input=on_input
        />
    }
}
