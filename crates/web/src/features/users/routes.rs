use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use super::handlers::{
    assign_user_role, create_role, create_user, get_role_by_name, get_user, list_active_users,
    list_roles, list_users, list_users_by_role, set_user_status,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_user))
        .route("/:id/role", put(assign_user_role))
        .route("/:id/status", patch(set_user_status))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_users))
        .route("/active", get(list_active_users))
        .route("/role/:role_id", get(list_users_by_role))
        .route("/:id", get(get_user))
        .merge(protected)
}

pub fn role_routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_role))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_roles))
        .route("/name/:name", get(get_role_by_name))
        .merge(protected)
}
