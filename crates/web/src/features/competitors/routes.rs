use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use super::handlers::{
    delete_competitor, enroll_competitor, get_competitor, list_active_competitors,
    list_competitors, list_competitors_by_category, list_competitors_by_club,
    set_competitor_status, update_competitor,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(enroll_competitor))
        .route("/:id", put(update_competitor).delete(delete_competitor))
        .route("/:id/status", patch(set_competitor_status))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_competitors))
        .route("/active", get(list_active_competitors))
        .route("/club/:club_id", get(list_competitors_by_club))
        .route("/category/:category_id", get(list_competitors_by_category))
        .route("/:id", get(get_competitor))
        .merge(protected)
}
