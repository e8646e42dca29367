use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use super::handlers::{
    create_category, delete_category, get_category, list_active_categories, list_categories,
    set_category_status, update_category,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_category))
        .route("/:id", put(update_category).delete(delete_category))
        .route("/:id/status", patch(set_category_status))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_categories))
        .route("/active", get(list_active_categories))
        .route("/:id", get(get_category))
        .merge(protected)
}
