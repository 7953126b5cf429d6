//! Event Detail Component
//!
//! One event's header, rendered description, and its challenges grouped by
//! track, plus the register and submit entry points.

use leptos::prelude::*;

use crate::context::{AppContext, Page};
use crate::markdown::{parse_markdown, resolve_media_url};
use crate::projection::group_by_track;
use crate::store::{store_event, use_app_store, AppStateStoreFields};
use crate::components::ProjectSubmitForm;

#[component]
pub fn EventDetail(event_id: u32) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let event = Memo::new(move |_| store_event(&store, event_id));
    let groups = Memo::new(move |_| {
        let challenges = store.challenges().get();
        let own: Vec<_> = challenges
            .iter()
            .filter(|ch| ch.challenge.event_id == event_id)
            .collect();
        group_by_track(&own)
    });

    let (submitting, set_submitting) = signal(false);

    view! {
        <div class="event-detail">
            <button class="back-link" on:click=move |_| ctx.goto(Page::Events)>
                "< All events"
            </button>

            {move || match event.get() {
                None => view! { <p class="missing-event">"Unknown event."</p> }.into_any(),
                Some(event) => {
                    let cover = event.cover_image_url.as_deref().map(resolve_media_url);
                    let description = event
                        .description
                        .as_deref()
                        .map(parse_markdown)
                        .unwrap_or_default();
                    view! {
                        <div class="event-detail-main">
                            <header class="event-detail-header">
                                {cover.map(|url| view! { <img class="event-cover" src=url /> })}
                                <h1>{event.name.clone()}</h1>
                                {event.location.clone().map(|loc| view! { <p class="event-location">{loc}</p> })}
                                <button
                                    class="register-cta"
                                    on:click=move |_| ctx.goto(Page::Register(event_id))
                                >
                                    "Register"
                                </button>
                            </header>
                            <div class="event-description" inner_html=description></div>
                        </div>
                    }
                    .into_any()
                }
            }}

            <section class="event-challenges">
                <h2>"Challenges"</h2>
                <For
                    each=move || groups.get()
                    key=|group| group.name.clone()
                    children=move |group| {
                        view! {
                            <div class="detail-track">
                                <h3>{group.name.clone()}</h3>
                                <ul>
                                    <For
                                        each=move || group.challenges.clone()
                                        key=|ch| ch.challenge.challenge_id
                                        children=move |ch| {
                                            view! { <li>{ch.challenge.name.clone()}</li> }
                                        }
                                    />
                                </ul>
                            </div>
                        }
                    }
                />
                {move || groups.get().is_empty().then(|| view! {
                    <p class="empty-challenges">"No challenges published yet."</p>
                })}
            </section>

            <section class="event-submit">
                {move || if submitting.get() {
                    view! {
                        <ProjectSubmitForm
                            event_id=event_id
                            on_done=move || set_submitting.set(false)
                        />
                    }
                    .into_any()
                } else {
                    view! {
                        <button class="submit-toggle" on:click=move |_| set_submitting.set(true)>
                            "Submit a project"
                        </button>
                    }
                    .into_any()
                }}
            </section>
        </div>
    }
}
