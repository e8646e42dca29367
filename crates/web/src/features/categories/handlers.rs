use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{category::CategoryRequest, common::SetActiveRequest},
    models::Category,
};
use validator::Validate;

use crate::error::ApiResult;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    ),
    tag = "categories"
)]
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Response> {
    let categories = state.categories().list().await?;

    Ok(Json(categories).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/active",
    responses(
        (status = 200, description = "Categories open for enrollment", body = Vec<Category>)
    ),
    tag = "categories"
)]
pub async fn list_active_categories(State(state): State<AppState>) -> ApiResult<Response> {
    let categories = state.categories().list_active().await?;

    Ok(Json(categories).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Response> {
    let category = state.categories().get(id).await?;

    Ok(Json(category).into_response())
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Category name already exists"),
        (status = 422, description = "Minimum age above maximum age (strict mode)")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let category = state.categories().create(&req).await?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    request_body = CategoryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category name already exists")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<CategoryRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let category = state.categories().update(id, &req).await?;

    Ok(Json(category).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/categories/{id}/status",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    request_body = SetActiveRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Category state changed", body = Category),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn set_category_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<SetActiveRequest>,
) -> ApiResult<Response> {
    let category = state.categories().set_active(id, req.active).await?;

    Ok(Json(category).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has enrolled competitors")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Response> {
    state.categories().delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
