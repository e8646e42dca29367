use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::default_active;

/// Request payload for creating a platform user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: String,

    #[validate(email)]
    #[validate(length(max = 100))]
    pub email: String,

    /// Plain secret; hashed before it is stored
    pub password: Option<String>,

    #[validate(length(min = 1, max = 15))]
    pub phone: String,

    pub role_id: i32,

    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignRoleRequest {
    pub role_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    pub description: Option<String>,
}
