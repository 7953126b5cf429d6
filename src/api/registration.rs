//! Registration And Submission Endpoints
//!
//! Thin POST wrappers; the proxy owns all validation.

use serde::Serialize;

use super::{post_json, ApiError};

/// Payload assembled by the multi-step registration form
#[derive(Serialize)]
pub struct RegisterArgs<'a> {
    pub event_id: u32,
    pub full_name: &'a str,
    pub email: &'a str,
    pub team_name: Option<&'a str>,
    pub looking_for_team: bool,
}

/// Payload for a project submission against an event
#[derive(Serialize)]
pub struct SubmitProjectArgs<'a> {
    pub challenge_id: u32,
    pub project_name: &'a str,
    pub repo_url: &'a str,
    pub summary: Option<&'a str>,
}

pub async fn register(args: &RegisterArgs<'_>) -> Result<(), ApiError> {
    let _ = post_json("/registrations", args).await?;
    Ok(())
}

pub async fn submit_project(event_id: u32, args: &SubmitProjectArgs<'_>) -> Result<(), ApiError> {
    let _ = post_json(&format!("/events/{}/projects", event_id), args).await?;
    Ok(())
}
