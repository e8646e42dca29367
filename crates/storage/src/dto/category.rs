use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::default_active;

/// Request payload for creating or replacing a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Category name must be between 1 and 100 characters"
    ))]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 0, max = 120))]
    pub min_age: Option<i32>,

    #[validate(range(min = 0, max = 120))]
    pub max_age: Option<i32>,

    #[serde(default = "default_active")]
    pub active: bool,
}
