//! Frontend Models
//!
//! Data structures mirroring the REST proxy entities. The client only ever
//! holds read-only snapshots; everything is created and destroyed server-side.

use serde::{Deserialize, Serialize};

/// Event lifecycle status as reported by the proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Published,
    Ongoing,
    Cancelled,
    /// Statuses the proxy may add without notice
    #[serde(other)]
    Other,
}

/// Hackathon event (matches proxy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: u32,
    pub name: String,
    pub slug: String,
    pub status: EventStatus,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Challenge belonging to exactly one event, at most one organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub challenge_id: u32,
    pub event_id: u32,
    pub organization_id: Option<u32>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Organization referenced, never owned, by challenges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub organization_id: u32,
    pub name: String,
    pub slug: String,
}

/// The slice of an event a challenge carries after aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub event_id: u32,
    pub name: String,
}

/// Challenge joined with its organization and owning event.
/// Built once per aggregation pass, discarded on re-fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedChallenge {
    #[serde(flatten)]
    pub challenge: Challenge,
    pub organization: Option<Organization>,
    pub event: EventSummary,
}
