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
        health_log::{CreateHealthLogDto, DateRangeQuery, HealthLogDto, UpdateHealthLogDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::health_log::{
            paginated_health_logs_dto, CreateHealthLogParams, HealthLog, UpdateHealthLogParams,
        },
        service::health_log::HealthLogService,
        state::AppState,
        util::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            validation::ValidatedJson,
        },
    },
};

/// Record the caller's health log for a day.
///
/// # Returns
/// - `201 Created` - Log created
/// - `409 Conflict` - A log for that date already exists
pub async fn create_health_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateHealthLogDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let log = HealthLogService::new(&state.db)
        .create(CreateHealthLogParams::from_dto(caller.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(log.into_dto())))
}

pub async fn get_user_health_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let page = HealthLogService::new(&state.db)
        .find_by_user(caller.id, user_id, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_health_logs_dto(page))))
}

/// Averages over the user's logs, optionally bounded by `start_date` and `end_date`.
pub async fn get_health_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let stats = HealthLogService::new(&state.db)
        .stats(caller.id, user_id, query.start_date, query.end_date)
        .await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

/// Logs between `start_date` and `end_date` inclusive.
///
/// # Returns
/// - `200 OK` - Logs ordered by date ascending
/// - `400 Bad Request` - Missing bound or inverted range
pub async fn get_health_logs_in_range(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let logs = HealthLogService::new(&state.db)
        .find_range(caller.id, user_id, query.start_date, query.end_date)
        .await?;

    Ok((
        StatusCode::OK,
        Json(logs.into_iter().map(HealthLog::into_dto).collect::<Vec<HealthLogDto>>()),
    ))
}

pub async fn get_health_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let log = HealthLogService::new(&state.db).get(caller.id, id).await?;

    Ok((StatusCode::OK, Json(log.into_dto())))
}

pub async fn update_health_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateHealthLogDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let log = HealthLogService::new(&state.db)
        .update(caller.id, id, UpdateHealthLogParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(log.into_dto())))
}

pub async fn delete_health_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    HealthLogService::new(&state.db).remove(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
