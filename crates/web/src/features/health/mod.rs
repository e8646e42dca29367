use axum::{Json, Router, routing::get};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/ping",
    responses(
        (status = 200, description = "Service is up", body = PingResponse)
    ),
    tag = "health"
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong",
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}
