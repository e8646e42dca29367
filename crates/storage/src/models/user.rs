use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct User {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    /// One-way digest; never leaves the service.
    #[serde(skip)]
    pub password_hash: String,
    pub phone: String,
    pub role_id: i32,
    pub active: bool,
    pub last_access_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role_id: i32,
    pub active: bool,
}

impl NewUser {
    pub fn into_user(self, user_id: i32) -> User {
        User {
            user_id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            phone: self.phone,
            role_id: self.role_id,
            active: self.active,
            last_access_at: None,
        }
    }
}
