//! Persistence gateway.
//!
//! Each entity gets a store trait so the registry services can run against
//! PostgreSQL or the in-memory backend alike. `insert` assigns the id, `save`
//! overwrites an existing row, and `delete_by_id` is silent when the row is
//! already gone.

use async_trait::async_trait;

use crate::error::{Result, StorageError};
use crate::models::{
    Category, Club, ClubStatus, Competitor, NewCategory, NewClub, NewCompetitor, NewRole, NewUser,
    Role, User,
};

pub mod category;
pub mod club;
pub mod competitor;
pub mod memory;
pub mod role;
pub mod user;

pub use category::CategoryRepository;
pub use club::ClubRepository;
pub use competitor::CompetitorRepository;
pub use role::RoleRepository;
pub use user::UserRepository;

#[async_trait]
pub trait ClubStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Club>>;
    async fn find_all(&self) -> Result<Vec<Club>>;
    async fn find_by_status(&self, status: ClubStatus) -> Result<Vec<Club>>;
    async fn exists_by_id(&self, id: i32) -> Result<bool>;
    async fn exists_by_name(&self, name: &str) -> Result<bool>;
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
    async fn insert(&self, club: NewClub) -> Result<Club>;
    async fn save(&self, club: &Club) -> Result<Club>;
    /// Overwrite a club only while its stored status is still `expected`.
    /// `None` when the row is gone or has already moved on.
    async fn save_if_status(&self, club: &Club, expected: ClubStatus) -> Result<Option<Club>>;
    async fn delete_by_id(&self, id: i32) -> Result<()>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;
    async fn find_all(&self) -> Result<Vec<Category>>;
    async fn find_active(&self) -> Result<Vec<Category>>;
    async fn exists_by_id(&self, id: i32) -> Result<bool>;
    async fn exists_by_name(&self, name: &str) -> Result<bool>;
    async fn insert(&self, category: NewCategory) -> Result<Category>;
    async fn save(&self, category: &Category) -> Result<Category>;
    async fn delete_by_id(&self, id: i32) -> Result<()>;
}

#[async_trait]
pub trait CompetitorStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Competitor>>;
    async fn find_all(&self) -> Result<Vec<Competitor>>;
    async fn find_active(&self) -> Result<Vec<Competitor>>;
    async fn find_by_club(&self, club_id: i32) -> Result<Vec<Competitor>>;
    async fn find_by_category(&self, category_id: i32) -> Result<Vec<Competitor>>;
    async fn exists_by_id(&self, id: i32) -> Result<bool>;
    async fn exists_by_document(&self, document: &str) -> Result<bool>;
    async fn insert(&self, competitor: NewCompetitor) -> Result<Competitor>;
    async fn save(&self, competitor: &Competitor) -> Result<Competitor>;
    async fn delete_by_id(&self, id: i32) -> Result<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_all(&self) -> Result<Vec<User>>;
    async fn find_active(&self) -> Result<Vec<User>>;
    async fn find_by_role(&self, role_id: i32) -> Result<Vec<User>>;
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
    async fn exists_by_phone(&self, phone: &str) -> Result<bool>;
    async fn insert(&self, user: NewUser) -> Result<User>;
    async fn save(&self, user: &User) -> Result<User>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>>;
    async fn find_all(&self) -> Result<Vec<Role>>;
    async fn exists_by_name(&self, name: &str) -> Result<bool>;
    async fn insert(&self, role: NewRole) -> Result<Role>;
}

/// Translate key violations raised by PostgreSQL: unique keys into
/// `ConstraintViolation`, foreign keys into `ReferenceViolation`.
pub(crate) fn map_constraint(error: sqlx::Error, unique: &str, reference: &str) -> StorageError {
    let error = StorageError::from(error);
    if error.is_unique_violation() {
        return StorageError::ConstraintViolation(unique.to_string());
    }
    if error.is_foreign_key_violation() {
        return StorageError::ReferenceViolation(reference.to_string());
    }
    error
}
