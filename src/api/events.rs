//! Event Endpoints

use crate::models::Event;
use super::{fetch_collection, ApiError};

/// Root event list. A failure here is fatal for the whole page load.
pub async fn list_events() -> Result<Vec<Event>, ApiError> {
    fetch_collection("/events").await
}
