use std::fmt;

use thiserror::Error;

use crate::models::ClubStatus;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Still referenced: {0}")]
    ReferenceViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }
}

/// Entities managed by the registry, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Club,
    Category,
    Competitor,
    User,
    Role,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Club => "Club",
            Entity::Category => "Category",
            Entity::Competitor => "Competitor",
            Entity::User => "User",
            Entity::Role => "Role",
        };
        f.write_str(name)
    }
}

/// Coarse classification of registry failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DuplicateConstraint,
    InvalidTransition,
    InvalidRange,
    MissingField,
    Unauthenticated,
    StillReferenced,
    System,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::DuplicateConstraint => "duplicate_constraint",
            ErrorKind::InvalidTransition => "invalid_transition",
            ErrorKind::InvalidRange => "invalid_range",
            ErrorKind::MissingField => "missing_field",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::StillReferenced => "still_referenced",
            ErrorKind::System => "system",
        }
    }
}

/// Failures raised by the registration and enrollment rules.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i32 },

    #[error("{entity} '{name}' not found")]
    NamedNotFound { entity: Entity, name: String },

    #[error("Club {0} not found")]
    ClubNotFound(i32),

    #[error("Club {id} is not active (status: {status}); it must be approved first")]
    ClubNotActive { id: i32, status: ClubStatus },

    #[error("Category {0} not found")]
    CategoryNotFound(i32),

    #[error("Category {0} is not active")]
    CategoryInactive(i32),

    #[error("Age {age} is outside the category range ({min}-{max} years)")]
    AgeOutOfRange { age: i32, min: i32, max: i32 },

    #[error("Minimum age {min} is greater than maximum age {max}")]
    InvalidAgeBounds { min: i32, max: i32 },

    #[error("{entity} with {field} '{value}' already exists")]
    Duplicate {
        entity: Entity,
        field: &'static str,
        value: String,
    },

    #[error("Club {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: i32,
        from: ClubStatus,
        to: ClubStatus,
    },

    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid credentials")]
    Unauthenticated,

    #[error("Credential hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    pub fn duplicate(entity: Entity, field: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            field,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. }
            | Self::NamedNotFound { .. }
            | Self::ClubNotFound(_)
            | Self::CategoryNotFound(_)
            | Self::Storage(StorageError::NotFound) => ErrorKind::NotFound,
            Self::Storage(StorageError::ConstraintViolation(_)) => ErrorKind::DuplicateConstraint,
            Self::Storage(StorageError::ReferenceViolation(_)) => ErrorKind::StillReferenced,
            Self::Duplicate { .. } => ErrorKind::DuplicateConstraint,
            Self::InvalidTransition { .. }
            | Self::ClubNotActive { .. }
            | Self::CategoryInactive(_) => ErrorKind::InvalidTransition,
            Self::AgeOutOfRange { .. } | Self::InvalidAgeBounds { .. } => ErrorKind::InvalidRange,
            Self::MissingField(_) => ErrorKind::MissingField,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::Hashing(_) | Self::Storage(_) => ErrorKind::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_failures_map_to_taxonomy() {
        assert_eq!(RegistryError::ClubNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(
            RegistryError::ClubNotActive {
                id: 1,
                status: ClubStatus::Pending
            }
            .kind(),
            ErrorKind::InvalidTransition
        );
        assert_eq!(
            RegistryError::AgeOutOfRange {
                age: 16,
                min: 10,
                max: 15
            }
            .kind(),
            ErrorKind::InvalidRange
        );
        assert_eq!(
            RegistryError::duplicate(Entity::Competitor, "identity_document", "12345678").kind(),
            ErrorKind::DuplicateConstraint
        );
    }

    #[test]
    fn test_storage_failures_keep_their_meaning() {
        let err = RegistryError::from(StorageError::ConstraintViolation("Club name".into()));
        assert_eq!(err.kind(), ErrorKind::DuplicateConstraint);

        let err = RegistryError::from(StorageError::ReferenceViolation("Club in use".into()));
        assert_eq!(err.kind(), ErrorKind::StillReferenced);

        assert_eq!(
            RegistryError::from(StorageError::NotFound).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            RegistryError::from(StorageError::Database(sqlx::Error::PoolTimedOut)).kind(),
            ErrorKind::System
        );
    }

    #[test]
    fn test_named_lookup_names_the_entity() {
        let err = RegistryError::NamedNotFound {
            entity: Entity::Role,
            name: "judge".into(),
        };
        assert_eq!(err.to_string(), "Role 'judge' not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_duplicate_message_names_entity_and_field() {
        let err = RegistryError::duplicate(Entity::Club, "name", "RoboX");
        assert_eq!(err.to_string(), "Club with name 'RoboX' already exists");
    }
}
