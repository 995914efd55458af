use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::PageQueryDto,
        user::{CreateUserDto, UpdateUserDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::user::{paginated_users_dto, CreateUserParams, UpdateUserParams},
        service::user::UserService,
        state::AppState,
        util::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            validation::ValidatedJson,
        },
    },
};

/// Register a new local user.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `201 Created` - User created
/// - `400 Bad Request` - Invalid body
/// - `409 Conflict` - Email already registered
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db)
        .create(CreateUserParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// List users, newest first.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `200 OK` - `{users, total, page, limit, total_pages}`
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let page = UserService::new(&state.db).get_paginated(request).await?;

    Ok((StatusCode::OK, Json(paginated_users_dto(page))))
}

/// Get the authenticated caller's own profile.
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    Ok((StatusCode::OK, Json(caller.into_dto())))
}

/// Get a user by id.
///
/// # Returns
/// - `200 OK` - User profile
/// - `404 Not Found` - No such user
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let user = UserService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Update the caller's own profile.
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `403 Forbidden` - Target is another user
/// - `409 Conflict` - Email already in use
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let user = UserService::new(&state.db)
        .update(caller.id, id, UpdateUserParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Delete the caller's own account and everything it owns.
///
/// # Returns
/// - `204 No Content` - Account deleted
/// - `403 Forbidden` - Target is another user
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    UserService::new(&state.db).delete(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
