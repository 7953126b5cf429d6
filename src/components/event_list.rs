//! Event List Component
//!
//! Upcoming/Past tabs over the event collection, with debounced search and
//! the asymmetric date ordering (upcoming ascending, past descending).

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::context::{AppContext, Page};
use crate::markdown::resolve_media_url;
use crate::models::{Event, EventStatus};
use crate::projection::split_events;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::components::SearchBar;

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

fn status_label(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Published => "Published",
        EventStatus::Ongoing => "Ongoing",
        EventStatus::Cancelled => "Cancelled",
        EventStatus::Other => "",
    }
}

#[component]
fn EventCard(event: Event) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let id = event.event_id;

    let dates = match (&event.start_date, &event.end_date) {
        (Some(start), Some(end)) => format!("{} — {}", start, end),
        (Some(start), None) => start.clone(),
        _ => String::new(),
    };
    let cover = event.cover_image_url.as_deref().map(resolve_media_url);
    let label = status_label(event.status);

    view! {
        <article class="event-card" on:click=move |_| ctx.goto(Page::EventDetail(id))>
            {cover.map(|url| view! { <img class="event-cover" src=url /> })}
            <div class="event-card-body">
                <h3>{event.name.clone()}</h3>
                {(!label.is_empty()).then(|| view! {
                    <span class=format!("event-status {}", label.to_lowercase())>{label}</span>
                })}
                {(!dates.is_empty()).then(|| view! { <p class="event-dates">{dates}</p> })}
                {event.location.clone().map(|loc| view! { <p class="event-location">{loc}</p> })}
            </div>
        </article>
    }
}

#[component]
pub fn EventList() -> impl IntoView {
    let store = use_app_store();

    let (search, set_search) = signal(String::new());
    let (show_past, set_show_past) = signal(false);

    let split = Memo::new(move |_| split_events(&store.events().get(), &search.get(), today()));
    let shown = Memo::new(move |_| {
        let split = split.get();
        if show_past.get() { split.past } else { split.active }
    });

    view! {
        <div class="event-list">
            <div class="event-list-controls">
                <div class="event-tabs">
                    <button
                        class=move || if !show_past.get() { "event-tab active" } else { "event-tab" }
                        on:click=move |_| set_show_past.set(false)
                    >
                        "Upcoming"
                    </button>
                    <button
                        class=move || if show_past.get() { "event-tab active" } else { "event-tab" }
                        on:click=move |_| set_show_past.set(true)
                    >
                        "Past"
                    </button>
                </div>
                <SearchBar set_search=set_search placeholder="Search events..." />
            </div>

            <div class="event-cards">
                <For
                    each=move || shown.get()
                    key=|event| event.event_id
                    children=move |event| view! { <EventCard event=event /> }
                />
            </div>

            {move || shown.get().is_empty().then(|| view! {
                <p class="empty-events">"No events here yet."</p>
            })}
        </div>
    }
}
