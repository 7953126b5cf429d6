//! Challenge Board Component
//!
//! Track-grouped challenge cards with lane tabs, debounced search, and the
//! scroll-spied jump rail. All three read from one shared projection.

use leptos::prelude::*;
use leptos_scrollspy::{register_anchors, ScrollSpySignals, SectionAnchor};

use crate::markdown::parse_markdown_inline;
use crate::models::EnrichedChallenge;
use crate::projection::{
    project_challenges, track_anchor_id, track_name, ChallengeFilter, Lane, Projection,
};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::components::{LaneTabs, SearchBar, TrackRail};

#[component]
fn ChallengeCard(challenge: EnrichedChallenge) -> impl IntoView {
    let teaser = challenge
        .challenge
        .description
        .as_deref()
        .map(parse_markdown_inline)
        .unwrap_or_default();
    let track = track_name(&challenge).to_string();

    view! {
        <article class="challenge-card">
            <header>
                <h3>{challenge.challenge.name.clone()}</h3>
                <span class="challenge-track-badge">{track}</span>
            </header>
            <p class="challenge-event">{challenge.event.name.clone()}</p>
            <div class="challenge-teaser" inner_html=teaser></div>
        </article>
    }
}

#[component]
pub fn ChallengeBoard() -> impl IntoView {
    let store = use_app_store();
    let spy = use_context::<ScrollSpySignals>().expect("ScrollSpySignals should be provided");

    let (search, set_search) = signal(String::new());
    let (lane, set_lane) = signal(Lane::Main);

    let projection = Memo::new(move |_| {
        project_challenges(
            &store.challenges().get(),
            &ChallengeFilter { lane: lane.get(), search: search.get() },
        )
    });

    // Swap the registered anchor set whenever the grouping changes; anchors
    // for the old grouping no longer exist in the DOM
    Effect::new(move |_| {
        let anchors: Vec<SectionAnchor> = projection
            .get()
            .groups
            .iter()
            .map(|group| SectionAnchor {
                key: group.name.clone(),
                anchor_id: track_anchor_id(&group.name),
            })
            .collect();
        register_anchors(&spy, anchors);
    });

    view! {
        <div class="challenge-board">
            <div class="board-controls">
                <LaneTabs lane=lane set_lane=set_lane />
                <SearchBar set_search=set_search placeholder="Search challenges..." />
            </div>

            <div class="board-body">
                <TrackRail projection=projection />

                <div class="track-sections">
                    <For
                        each=move || projection.get().groups
                        key=|group| group.name.clone()
                        children=move |group| {
                            let anchor = track_anchor_id(&group.name);
                            view! {
                                <section class="track-section" id=anchor>
                                    <h2>{group.name.clone()}</h2>
                                    <For
                                        each=move || group.challenges.clone()
                                        key=|ch| ch.challenge.challenge_id
                                        children=move |ch| view! { <ChallengeCard challenge=ch /> }
                                    />
                                </section>
                            }
                        }
                    />

                    {move || {
                        let p = projection.get();
                        if p.groups.is_empty() {
                            view! { <p class="empty-board">"No challenges match."</p> }.into_any()
                        } else {
                            view! {
                                <p class="board-count">{format!("{} challenges shown", p.flat_count)}</p>
                            }
                            .into_any()
                        }
                    }}
                </div>
            </div>
        </div>
    }
}
