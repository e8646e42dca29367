use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::auth::{LoginRequest, LoginResponse};

use crate::error::ApiResult;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Response> {
    let user = state.users().authenticate(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user,
    })
    .into_response())
}
