use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::role::{CreateRoleDto, RoleDto, UpdateRoleDto},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::role::{CreateRoleParams, Role, UpdateRoleParams},
        service::role::RoleService,
        state::AppState,
        util::validation::ValidatedJson,
    },
};

/// Create a role.
///
/// # Returns
/// - `201 Created` - Role created
/// - `400 Bad Request` - Name empty, longer than 50 characters or outside `[A-Za-z0-9_-]`
/// - `409 Conflict` - Name already taken
pub async fn create_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let role = RoleService::new(&state.db)
        .create(CreateRoleParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(role.into_dto())))
}

pub async fn get_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let roles = RoleService::new(&state.db).find_all().await?;

    Ok((
        StatusCode::OK,
        Json(roles.into_iter().map(Role::into_dto).collect::<Vec<RoleDto>>()),
    ))
}

pub async fn get_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let role = RoleService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

pub async fn update_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let role = RoleService::new(&state.db)
        .update(id, UpdateRoleParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

pub async fn delete_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    RoleService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
