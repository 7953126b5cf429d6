//! Organization Endpoints

use crate::models::Organization;
use super::{fetch_collection, ApiError};

/// Single organization lookup
pub async fn get_organization(organization_id: u32) -> Result<Organization, ApiError> {
    let orgs: Vec<Organization> =
        fetch_collection(&format!("/organizations/{}", organization_id)).await?;
    orgs.into_iter()
        .next()
        .ok_or_else(|| ApiError::Decode("empty organization response".to_string()))
}
