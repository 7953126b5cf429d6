//! Challenge Endpoints

use crate::models::Challenge;
use super::{fetch_collection, ApiError};

/// All challenges attached to one event
pub async fn list_event_challenges(event_id: u32) -> Result<Vec<Challenge>, ApiError> {
    fetch_collection(&format!("/events/{}/challenges", event_id)).await
}
