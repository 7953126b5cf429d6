//! Project Submission Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::{self, SubmitProjectArgs};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ProjectSubmitForm<F>(event_id: u32, on_done: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let store = use_app_store();

    let own_challenges = Memo::new(move |_| {
        store
            .challenges()
            .get()
            .into_iter()
            .filter(|ch| ch.challenge.event_id == event_id)
            .collect::<Vec<_>>()
    });

    let (challenge_id, set_challenge_id) = signal::<Option<u32>>(None);
    let (project_name, set_project_name) = signal(String::new());
    let (repo_url, set_repo_url) = signal(String::new());
    let (summary, set_summary) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(challenge) = challenge_id.get() else { return };
        let name = project_name.get();
        let repo = repo_url.get();
        if name.is_empty() || repo.is_empty() {
            return;
        }
        let text = summary.get();

        spawn_local(async move {
            let args = SubmitProjectArgs {
                challenge_id: challenge,
                project_name: &name,
                repo_url: &repo,
                summary: (!text.is_empty()).then_some(text.as_str()),
            };
            match api::submit_project(event_id, &args).await {
                Ok(()) => on_done(),
                Err(err) => set_error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <form class="project-submit-form" on:submit=submit>
            <label>
                "Challenge"
                <select on:change=move |ev| {
                    let target = ev.target().unwrap();
                    let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                    set_challenge_id.set(select.value().parse().ok());
                }>
                    <option value="">"Pick a challenge"</option>
                    <For
                        each=move || own_challenges.get()
                        key=|ch| ch.challenge.challenge_id
                        children=move |ch| {
                            view! {
                                <option value=ch.challenge.challenge_id.to_string()>
                                    {ch.challenge.name.clone()}
                                </option>
                            }
                        }
                    />
                </select>
            </label>
            <label>
                "Project name"
                <input
                    type="text"
                    prop:value=move || project_name.get()
                    on:input=move |ev| set_project_name.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Repository URL"
                <input
                    type="url"
                    prop:value=move || repo_url.get()
                    on:input=move |ev| set_repo_url.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Summary (optional)"
                <textarea
                    prop:value=move || summary.get()
                    on:input=move |ev| set_summary.set(event_target_value(&ev))
                ></textarea>
            </label>
            {move || error.get().map(|msg| view! {
                <p class="form-error">{format!("Submission failed: {}", msg)}</p>
            })}
            <button type="submit">"Submit"</button>
            <button type="button" on:click=move |_| on_done()>"Cancel"</button>
        </form>
    }
}
