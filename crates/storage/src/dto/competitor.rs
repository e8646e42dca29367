use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for enrolling a competitor
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EnrollCompetitorRequest {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,

    #[validate(length(min = 1, max = 8, message = "Identity document must have 1 to 8 characters"))]
    pub identity_document: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(range(min = 0, max = 120))]
    pub age: Option<i32>,

    #[validate(email)]
    #[validate(length(max = 100))]
    pub email: Option<String>,

    #[validate(length(max = 15))]
    pub phone: Option<String>,

    pub club_id: i32,

    pub category_id: i32,

    #[validate(length(max = 100))]
    pub robot_name: Option<String>,
}

/// Request payload for updating a competitor's personal data.
///
/// Club and category are fixed at enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompetitorRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 1, max = 8))]
    pub identity_document: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(range(min = 0, max = 120))]
    pub age: Option<i32>,

    #[validate(email)]
    #[validate(length(max = 100))]
    pub email: Option<String>,

    #[validate(length(max = 15))]
    pub phone: Option<String>,

    #[validate(length(max = 100))]
    pub robot_name: Option<String>,
}
