use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::SetActiveRequest,
        user::{AssignRoleRequest, CreateRoleRequest, CreateUserRequest},
    },
    models::{Role, User},
};
use validator::Validate;

use crate::error::ApiResult;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>)
    ),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Response> {
    let users = state.users().list().await?;

    Ok(Json(users).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/active",
    responses(
        (status = 200, description = "Active users", body = Vec<User>)
    ),
    tag = "users"
)]
pub async fn list_active_users(State(state): State<AppState>) -> ApiResult<Response> {
    let users = state.users().list_active().await?;

    Ok(Json(users).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/role/{role_id}",
    params(
        ("role_id" = i32, Path, description = "Role id")
    ),
    responses(
        (status = 200, description = "Users holding a role", body = Vec<User>)
    ),
    tag = "users"
)]
pub async fn list_users_by_role(
    State(state): State<AppState>,
    Path(role_id): Path<i32>,
) -> ApiResult<Response> {
    let users = state.users().list_by_role(role_id).await?;

    Ok(Json(users).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = i32, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Response> {
    let user = state.users().get(id).await?;

    Ok(Json(user).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error or missing password"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Role not found"),
        (status = 409, description = "Email or phone already registered")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let user = state.users().create(&req).await?;

    Ok((StatusCode::CREATED, Json(user)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    params(
        ("id" = i32, Path, description = "User id")
    ),
    request_body = AssignRoleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Role assigned", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User or role not found")
    ),
    tag = "users"
)]
pub async fn assign_user_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<AssignRoleRequest>,
) -> ApiResult<Response> {
    let user = state.users().assign_role(id, req.role_id).await?;

    Ok(Json(user).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/status",
    params(
        ("id" = i32, Path, description = "User id")
    ),
    request_body = SetActiveRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "User state changed", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn set_user_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<SetActiveRequest>,
) -> ApiResult<Response> {
    let user = state.users().set_active(id, req.active).await?;

    Ok(Json(user).into_response())
}

#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "All roles", body = Vec<Role>)
    ),
    tag = "roles"
)]
pub async fn list_roles(State(state): State<AppState>) -> ApiResult<Response> {
    let roles = state.users().list_roles().await?;

    Ok(Json(roles).into_response())
}

#[utoipa::path(
    get,
    path = "/api/roles/name/{name}",
    params(
        ("name" = String, Path, description = "Role name")
    ),
    responses(
        (status = 200, description = "Role found", body = Role),
        (status = 404, description = "Role not found")
    ),
    tag = "roles"
)]
pub async fn get_role_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let role = state.users().get_role_by_name(&name).await?;

    Ok(Json(role).into_response())
}

#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = CreateRoleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Role name already exists")
    ),
    tag = "roles"
)]
pub async fn create_role(
    State(state): State<AppState>,
    Json(req): Json<CreateRoleRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let role = state.users().create_role(&req).await?;

    Ok((StatusCode::CREATED, Json(role)).into_response())
}
