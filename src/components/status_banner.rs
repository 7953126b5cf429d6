//! Status Banner Component
//!
//! Load progress and the retry-prompting error state for fatal root fetches.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn StatusBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    view! {
        {move || {
            if store.loading().get() {
                view! { <div class="status-banner loading">"Loading events..."</div> }.into_any()
            } else if let Some(message) = store.load_error().get() {
                view! {
                    <div class="status-banner error">
                        <span>{format!("Could not load events: {}", message)}</span>
                        <button on:click=move |_| ctx.reload()>"Retry"</button>
                    </div>
                }.into_any()
            } else {
                view! { <div></div> }.into_any()
            }
        }}
    }
}
