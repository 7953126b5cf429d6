//! Registration Form Component
//!
//! Multi-step participant registration: profile, team, review. All
//! validation lives server-side; the form only collects and posts.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, RegisterArgs};
use crate::context::{AppContext, Page};
use crate::store::{store_event, use_app_store};

/// Registration steps in order
#[derive(Clone, Copy, PartialEq, Eq)]
enum Step {
    Profile,
    Team,
    Review,
}

#[component]
pub fn RegistrationForm(event_id: u32) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let event_name = Memo::new(move |_| {
        store_event(&store, event_id).map(|e| e.name).unwrap_or_default()
    });

    let (step, set_step) = signal(Step::Profile);
    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (team_name, set_team_name) = signal(String::new());
    let (looking_for_team, set_looking_for_team) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (done, set_done) = signal(false);

    let submit = move |_| {
        let name = full_name.get();
        let mail = email.get();
        let team = team_name.get();
        let looking = looking_for_team.get();

        spawn_local(async move {
            let args = RegisterArgs {
                event_id,
                full_name: &name,
                email: &mail,
                team_name: (!team.is_empty()).then_some(team.as_str()),
                looking_for_team: looking,
            };
            match api::register(&args).await {
                Ok(()) => set_done.set(true),
                Err(err) => set_error.set(Some(err.to_string())),
            }
        });
    };

    let profile_complete = move || !full_name.get().is_empty() && !email.get().is_empty();

    view! {
        <div class="registration-form">
            <h1>{move || format!("Register for {}", event_name.get())}</h1>

            {move || if done.get() {
                view! {
                    <div class="registration-done">
                        <p>"You're in! See you at the kickoff."</p>
                        <button on:click=move |_| ctx.goto(Page::EventDetail(event_id))>
                            "Back to event"
                        </button>
                    </div>
                }
                .into_any()
            } else {
                match step.get() {
                    Step::Profile => view! {
                        <div class="registration-step">
                            <label>
                                "Full name"
                                <input
                                    type="text"
                                    prop:value=move || full_name.get()
                                    on:input=move |ev| set_full_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Email"
                                <input
                                    type="email"
                                    prop:value=move || email.get()
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                />
                            </label>
                            <button
                                disabled=move || !profile_complete()
                                on:click=move |_| set_step.set(Step::Team)
                            >
                                "Next"
                            </button>
                        </div>
                    }
                    .into_any(),
                    Step::Team => view! {
                        <div class="registration-step">
                            <label>
                                "Team name (optional)"
                                <input
                                    type="text"
                                    prop:value=move || team_name.get()
                                    on:input=move |ev| set_team_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="checkbox-row">
                                <input
                                    type="checkbox"
                                    prop:checked=move || looking_for_team.get()
                                    on:change=move |_| set_looking_for_team.update(|v| *v = !*v)
                                />
                                "I'm looking for a team"
                            </label>
                            <button on:click=move |_| set_step.set(Step::Profile)>"Back"</button>
                            <button on:click=move |_| set_step.set(Step::Review)>"Next"</button>
                        </div>
                    }
                    .into_any(),
                    Step::Review => view! {
                        <div class="registration-step review">
                            <dl>
                                <dt>"Name"</dt>
                                <dd>{full_name.get()}</dd>
                                <dt>"Email"</dt>
                                <dd>{email.get()}</dd>
                                <dt>"Team"</dt>
                                <dd>
                                    {move || {
                                        let team = team_name.get();
                                        if team.is_empty() {
                                            if looking_for_team.get() {
                                                "Looking for a team".to_string()
                                            } else {
                                                "Solo".to_string()
                                            }
                                        } else {
                                            team
                                        }
                                    }}
                                </dd>
                            </dl>
                            {move || error.get().map(|msg| view! {
                                <p class="form-error">{format!("Registration failed: {}", msg)}</p>
                            })}
                            <button on:click=move |_| set_step.set(Step::Team)>"Back"</button>
                            <button class="register-cta" on:click=submit>"Confirm registration"</button>
                        </div>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}
