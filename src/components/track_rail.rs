//! Track Rail Component
//!
//! In-page jump-link rail, one entry per track group, highlighted by the
//! scroll-spy's active section.

use leptos::prelude::*;
use leptos_scrollspy::ScrollSpySignals;

use crate::projection::{track_anchor_id, Projection};

fn jump_to(name: &str) {
    let anchor = track_anchor_id(name);
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id(&anchor) {
            el.scroll_into_view();
        }
    }
}

#[component]
pub fn TrackRail(projection: Memo<Projection>) -> impl IntoView {
    let spy = use_context::<ScrollSpySignals>().expect("ScrollSpySignals should be provided");

    view! {
        <nav class="track-rail">
            <For
                each=move || projection.get().groups
                key=|group| group.name.clone()
                children=move |group| {
                    let name = group.name.clone();
                    let label = group.name.clone();
                    let count = group.challenges.len();
                    let is_active = {
                        let name = name.clone();
                        move || spy.active_read.get().as_deref() == Some(name.as_str())
                    };
                    view! {
                        <button
                            class=move || if is_active() { "track-rail-link active" } else { "track-rail-link" }
                            on:click=move |_| jump_to(&name)
                        >
                            <span class="track-rail-name">{label}</span>
                            <span class="track-rail-count">{count}</span>
                        </button>
                    }
                }
            />
        </nav>
    }
}
