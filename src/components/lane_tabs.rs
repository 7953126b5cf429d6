//! Lane Tabs Component
//!
//! Main/Side switch for the challenge board.

use leptos::prelude::*;

use crate::projection::Lane;

#[component]
pub fn LaneTabs(lane: ReadSignal<Lane>, set_lane: WriteSignal<Lane>) -> impl IntoView {
    let tab = move |target: Lane, label: &'static str| {
        let is_active = move || lane.get() == target;
        view! {
            <button
                class=move || if is_active() { "lane-tab active" } else { "lane-tab" }
                on:click=move |_| set_lane.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="lane-tabs">
            {tab(Lane::Main, "Main Stage")}
            {tab(Lane::Side, "Side Quests")}
        </div>
    }
}
