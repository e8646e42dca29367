use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::{ErrorKind, RegistryError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Registry(RegistryError),
    Validation(ValidationErrors),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(e) => write!(f, "Registry error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Registry(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::DuplicateConstraint => StatusCode::CONFLICT,
                ErrorKind::InvalidTransition => StatusCode::CONFLICT,
                ErrorKind::StillReferenced => StatusCode::CONFLICT,
                ErrorKind::InvalidRange => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::MissingField => StatusCode::BAD_REQUEST,
                ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
                ErrorKind::System => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Registry(e) if e.kind() == ErrorKind::System => {
                tracing::error!("Registry error: {:?}", e);
                json!({
                    "error": "An internal error occurred",
                    "kind": ErrorKind::System.as_str()
                })
            }
            Self::Registry(e) => {
                json!({
                    "error": e.to_string(),
                    "kind": e.kind().as_str()
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<RegistryError> for WebError {
    fn from(error: RegistryError) -> Self {
        Self::Registry(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type ApiResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use storage::error::{Entity, StorageError};
    use storage::models::ClubStatus;

    fn status(err: RegistryError) -> StatusCode {
        WebError::from(err).status_code()
    }

    async fn kind_of(err: WebError) -> String {
        let bytes = to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["kind"].as_str().unwrap_or_default().to_string()
    }

    #[test]
    fn test_registry_errors_map_to_status_codes() {
        assert_eq!(
            status(RegistryError::NotFound {
                entity: Entity::Club,
                id: 1
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(RegistryError::duplicate(Entity::Club, "name", "RoboX")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(RegistryError::InvalidTransition {
                id: 1,
                from: ClubStatus::Rejected,
                to: ClubStatus::Active
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(RegistryError::AgeOutOfRange {
                age: 16,
                min: 10,
                max: 15
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(RegistryError::MissingField("password")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(RegistryError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(RegistryError::Hashing("bad salt".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_lost_uniqueness_race_is_a_conflict() {
        let err = WebError::from(RegistryError::Storage(StorageError::ConstraintViolation(
            "Club name already exists".into(),
        )));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(kind_of(err).await, "duplicate_constraint");
    }

    #[tokio::test]
    async fn test_blocked_delete_is_not_reported_as_duplicate() {
        let err = WebError::from(RegistryError::Storage(StorageError::ReferenceViolation(
            "Club still has enrolled competitors".into(),
        )));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(kind_of(err).await, "still_referenced");
    }

    #[tokio::test]
    async fn test_body_kind_agrees_with_registry_kind() {
        let errors = [
            RegistryError::Storage(StorageError::NotFound),
            RegistryError::NamedNotFound {
                entity: Entity::Role,
                name: "judge".into(),
            },
            RegistryError::MissingField("password"),
            RegistryError::Hashing("bad salt".into()),
        ];
        for err in errors {
            let expected = err.kind().as_str();
            assert_eq!(kind_of(WebError::from(err)).await, expected);
        }
    }
}
