use axum::Router;

use crate::features::{auth, categories, clubs, competitors, health, users};
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

pub fn router(state: AppState, api_keys: ApiKeys) -> Router {
    Router::new()
        .nest("/api/clubs", clubs::routes::routes(api_keys.clone()))
        .nest("/api/categories", categories::routes::routes(api_keys.clone()))
        .nest("/api/competitors", competitors::routes::routes(api_keys.clone()))
        .nest("/api/users", users::routes::routes(api_keys.clone()))
        .nest("/api/roles", users::routes::role_routes(api_keys))
        .nest("/api/auth", auth::routes::routes())
        .merge(health::routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use storage::Database;
    use tower::ServiceExt;

    use super::*;

    const KEY: &str = "test-key";

    fn app() -> Router {
        let state = AppState::new(Database::in_memory(), false);
        router(state, ApiKeys::from_comma_separated(KEY))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {KEY}"));
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn club_body(name: &str, email: &str) -> Value {
        json!({
            "name": name,
            "representative": "Ana Torres",
            "representative_email": email,
        })
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, body) = send(&app(), Method::GET, "/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");
        assert_eq!(body["status"], "OK");
    }

    #[tokio::test]
    async fn test_mutations_require_api_key() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/clubs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(club_body("RoboX", "a@x.org").to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, Method::GET, "/api/clubs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_register_club_lands_in_pending() {
        let app = app();
        let (status, club) = send(
            &app,
            Method::POST,
            "/api/clubs",
            Some(club_body("RoboX", "a@x.org")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(club["status"], "pending");

        let (_, pending) = send(&app, Method::GET, "/api/clubs/pending", None).await;
        assert_eq!(pending.as_array().map(Vec::len), Some(1));

        let (_, filtered) = send(&app, Method::GET, "/api/clubs?status=active", None).await;
        assert_eq!(filtered, json!([]));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/clubs",
            Some(club_body("RoboX", "b@x.org")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["kind"], "duplicate_constraint");
    }

    #[tokio::test]
    async fn test_invalid_payload_is_rejected() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/clubs",
            Some(club_body("RoboX", "not-an-email")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
    }

    #[tokio::test]
    async fn test_missing_club_is_not_found() {
        let (status, body) = send(&app(), Method::GET, "/api/clubs/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_enrollment_into_pending_club_conflicts() {
        let app = app();
        let (_, club) = send(
            &app,
            Method::POST,
            "/api/clubs",
            Some(club_body("RoboX", "a@x.org")),
        )
        .await;
        let (status, category) = send(
            &app,
            Method::POST,
            "/api/categories",
            Some(json!({ "name": "Sumo", "min_age": 10, "max_age": 15 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/competitors",
            Some(json!({
                "first_name": "Luis",
                "last_name": "Quispe",
                "age": 12,
                "club_id": club["club_id"],
                "category_id": category["category_id"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["kind"], "invalid_transition");
    }

    #[tokio::test]
    async fn test_login_with_unknown_account_is_unauthorized() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "ghost@x.org", "password": "secret" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_unknown_role_name_is_named_in_the_error() {
        let (status, body) = send(&app(), Method::GET, "/api/roles/name/judge", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");
        assert_eq!(body["error"], "Role 'judge' not found");
    }
}
