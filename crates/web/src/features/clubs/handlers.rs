use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::club::{
        ApproveClubRequest, ClubListQuery, RegisterClubRequest, RejectClubRequest,
        UpdateClubRequest,
    },
    models::Club,
    services::ClubService,
};
use validator::Validate;

use crate::error::ApiResult;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/clubs",
    params(ClubListQuery),
    responses(
        (status = 200, description = "Clubs, optionally filtered by status", body = Vec<Club>)
    ),
    tag = "clubs"
)]
pub async fn list_clubs(
    State(state): State<AppState>,
    Query(query): Query<ClubListQuery>,
) -> ApiResult<Response> {
    let clubs = ClubService::new(&state.db).list(query.status).await?;

    Ok(Json(clubs).into_response())
}

#[utoipa::path(
    get,
    path = "/api/clubs/pending",
    responses(
        (status = 200, description = "Clubs awaiting validation", body = Vec<Club>)
    ),
    tag = "clubs"
)]
pub async fn list_pending_clubs(State(state): State<AppState>) -> ApiResult<Response> {
    let clubs = ClubService::new(&state.db).list_pending().await?;

    Ok(Json(clubs).into_response())
}

#[utoipa::path(
    get,
    path = "/api/clubs/active",
    responses(
        (status = 200, description = "Approved clubs", body = Vec<Club>)
    ),
    tag = "clubs"
)]
pub async fn list_active_clubs(State(state): State<AppState>) -> ApiResult<Response> {
    let clubs = ClubService::new(&state.db).list_active().await?;

    Ok(Json(clubs).into_response())
}

#[utoipa::path(
    get,
    path = "/api/clubs/{id}",
    params(
        ("id" = i32, Path, description = "Club id")
    ),
    responses(
        (status = 200, description = "Club found", body = Club),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn get_club(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Response> {
    let club = ClubService::new(&state.db).get(id).await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    post,
    path = "/api/clubs",
    request_body = RegisterClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Club registered as pending", body = Club),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Name or representative email already registered")
    ),
    tag = "clubs"
)]
pub async fn register_club(
    State(state): State<AppState>,
    Json(req): Json<RegisterClubRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let club = ClubService::new(&state.db).register(&req).await?;

    Ok((StatusCode::CREATED, Json(club)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/clubs/{id}",
    params(
        ("id" = i32, Path, description = "Club id")
    ),
    request_body = UpdateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Club updated", body = Club),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn update_club(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateClubRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let club = ClubService::new(&state.db).update(id, &req).await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    put,
    path = "/api/clubs/{id}/approve",
    params(
        ("id" = i32, Path, description = "Club id")
    ),
    request_body = ApproveClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Club approved", body = Club),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club or admin not found"),
        (status = 409, description = "Club is not pending")
    ),
    tag = "clubs"
)]
pub async fn approve_club(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<ApproveClubRequest>,
) -> ApiResult<Response> {
    let club = ClubService::new(&state.db).approve(id, req.admin_id).await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    put,
    path = "/api/clubs/{id}/reject",
    params(
        ("id" = i32, Path, description = "Club id")
    ),
    request_body = RejectClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Club rejected", body = Club),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club or admin not found")
    ),
    tag = "clubs"
)]
pub async fn reject_club(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<RejectClubRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let club = ClubService::new(&state.db)
        .reject(id, req.admin_id, req.observations)
        .await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/clubs/{id}",
    params(
        ("id" = i32, Path, description = "Club id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Club deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club not found"),
        (status = 409, description = "Club still has enrolled competitors")
    ),
    tag = "clubs"
)]
pub async fn delete_club(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Response> {
    ClubService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
