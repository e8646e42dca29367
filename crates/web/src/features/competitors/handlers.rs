use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::SetActiveRequest,
        competitor::{EnrollCompetitorRequest, UpdateCompetitorRequest},
    },
    models::{Competitor, CompetitorDetail},
    services::CompetitorService,
};
use validator::Validate;

use crate::error::ApiResult;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/competitors",
    responses(
        (status = 200, description = "All competitors", body = Vec<Competitor>)
    ),
    tag = "competitors"
)]
pub async fn list_competitors(State(state): State<AppState>) -> ApiResult<Response> {
    let competitors = CompetitorService::new(&state.db).list().await?;

    Ok(Json(competitors).into_response())
}

#[utoipa::path(
    get,
    path = "/api/competitors/active",
    responses(
        (status = 200, description = "Active competitors", body = Vec<Competitor>)
    ),
    tag = "competitors"
)]
pub async fn list_active_competitors(State(state): State<AppState>) -> ApiResult<Response> {
    let competitors = CompetitorService::new(&state.db).list_active().await?;

    Ok(Json(competitors).into_response())
}

#[utoipa::path(
    get,
    path = "/api/competitors/club/{club_id}",
    params(
        ("club_id" = i32, Path, description = "Club id")
    ),
    responses(
        (status = 200, description = "Competitors of a club", body = Vec<Competitor>)
    ),
    tag = "competitors"
)]
pub async fn list_competitors_by_club(
    State(state): State<AppState>,
    Path(club_id): Path<i32>,
) -> ApiResult<Response> {
    let competitors = CompetitorService::new(&state.db)
        .list_by_club(club_id)
        .await?;

    Ok(Json(competitors).into_response())
}

#[utoipa::path(
    get,
    path = "/api/competitors/category/{category_id}",
    params(
        ("category_id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Competitors in a category", body = Vec<Competitor>)
    ),
    tag = "competitors"
)]
pub async fn list_competitors_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> ApiResult<Response> {
    let competitors = CompetitorService::new(&state.db)
        .list_by_category(category_id)
        .await?;

    Ok(Json(competitors).into_response())
}

#[utoipa::path(
    get,
    path = "/api/competitors/{id}",
    params(
        ("id" = i32, Path, description = "Competitor id")
    ),
    responses(
        (status = 200, description = "Competitor with club and category", body = CompetitorDetail),
        (status = 404, description = "Competitor not found")
    ),
    tag = "competitors"
)]
pub async fn get_competitor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Response> {
    let competitor = CompetitorService::new(&state.db).get(id).await?;

    Ok(Json(competitor).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitors",
    request_body = EnrollCompetitorRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Competitor enrolled", body = CompetitorDetail),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club or category not found"),
        (status = 409, description = "Club or category not open, or document already registered"),
        (status = 422, description = "Age outside the category range")
    ),
    tag = "competitors"
)]
pub async fn enroll_competitor(
    State(state): State<AppState>,
    Json(req): Json<EnrollCompetitorRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let competitor = CompetitorService::new(&state.db).enroll(&req).await?;

    Ok((StatusCode::CREATED, Json(competitor)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/competitors/{id}",
    params(
        ("id" = i32, Path, description = "Competitor id")
    ),
    request_body = UpdateCompetitorRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competitor updated", body = Competitor),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competitor not found")
    ),
    tag = "competitors"
)]
pub async fn update_competitor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateCompetitorRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let competitor = CompetitorService::new(&state.db).update(id, &req).await?;

    Ok(Json(competitor).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/competitors/{id}/status",
    params(
        ("id" = i32, Path, description = "Competitor id")
    ),
    request_body = SetActiveRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competitor state changed", body = Competitor),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competitor not found")
    ),
    tag = "competitors"
)]
pub async fn set_competitor_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<SetActiveRequest>,
) -> ApiResult<Response> {
    let competitor = CompetitorService::new(&state.db)
        .set_active(id, req.active)
        .await?;

    Ok(Json(competitor).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/competitors/{id}",
    params(
        ("id" = i32, Path, description = "Competitor id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Competitor deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competitor not found")
    ),
    tag = "competitors"
)]
pub async fn delete_competitor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Response> {
    CompetitorService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
