use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateInterestRequest {
    pub listing_id: Uuid,
}

/// Replacement values for every mutable column of an interest.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReplaceInterestRequest {
    pub user_id: Uuid,
    pub listing_id: Uuid,
}
