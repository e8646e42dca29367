use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::ClubStatus;

/// Request payload for registering a new club
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterClubRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Club name must be between 1 and 150 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, max = 150, message = "Representative is required"))]
    pub representative: String,

    #[validate(email(message = "Representative email must be a valid address"))]
    #[validate(length(max = 100))]
    pub representative_email: String,

    #[validate(length(max = 15))]
    pub phone: Option<String>,

    #[validate(length(max = 250))]
    pub address: Option<String>,
}

/// Request payload for updating a club's descriptive fields.
///
/// Every field is overwritten; uniqueness is not re-checked.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateClubRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: String,

    #[validate(length(min = 1, max = 150))]
    pub representative: String,

    #[validate(email)]
    #[validate(length(max = 100))]
    pub representative_email: String,

    #[validate(length(max = 15))]
    pub phone: Option<String>,

    #[validate(length(max = 250))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApproveClubRequest {
    pub admin_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RejectClubRequest {
    pub admin_id: i32,

    #[validate(length(max = 2000))]
    pub observations: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClubListQuery {
    /// Only return clubs in this state
    pub status: Option<ClubStatus>,
}
