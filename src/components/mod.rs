//! UI Components
//!
//! Reusable Leptos components.

mod challenge_board;
mod event_detail;
mod event_list;
mod lane_tabs;
mod project_submit;
mod registration_form;
mod search_bar;
mod status_banner;
mod track_rail;

pub use challenge_board::ChallengeBoard;
pub use event_detail::EventDetail;
pub use event_list::EventList;
pub use lane_tabs::LaneTabs;
pub use project_submit::ProjectSubmitForm;
pub use registration_form::RegistrationForm;
pub use search_bar::SearchBar;
pub use status_banner::StatusBanner;
pub use track_rail::TrackRail;
