use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    approve_club, delete_club, get_club, list_active_clubs, list_clubs, list_pending_clubs,
    register_club, reject_club, update_club,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(register_club))
        .route("/:id", put(update_club).delete(delete_club))
        .route("/:id/approve", put(approve_club))
        .route("/:id/reject", put(reject_club))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_clubs))
        .route("/pending", get(list_pending_clubs))
        .route("/active", get(list_active_clubs))
        .route("/:id", get(get_club))
        .merge(protected)
}
