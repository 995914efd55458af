use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::reminder::{
        CreateReminderDto, ReminderDto, ReminderListQuery, SnoozeReminderDto, UpdateReminderDto,
        UpdateReminderStatusDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::reminder::{
            paginated_reminders_dto, CreateReminderParams, Reminder, ReminderFilter,
            UpdateReminderParams,
        },
        service::reminder::ReminderService,
        state::AppState,
        util::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            validation::ValidatedJson,
        },
    },
};

/// Create a reminder for the caller.
///
/// # Returns
/// - `201 Created` - Reminder created
/// - `400 Bad Request` - Invalid body, including a malformed `time`
/// - `409 Conflict` - `end_date` on or before `start_date`
pub async fn create_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateReminderDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let reminder = ReminderService::new(&state.db)
        .create(CreateReminderParams::from_dto(caller.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(reminder.into_dto())))
}

pub async fn get_user_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ReminderListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let filter = ReminderFilter {
        status: query.status,
        reminder_type: query.reminder_type,
    };

    let page = ReminderService::new(&state.db)
        .find_by_user(caller.id, user_id, filter, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_reminders_dto(page))))
}

/// Active reminders with notifications enabled, ordered by time of day.
pub async fn get_upcoming_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let reminders = ReminderService::new(&state.db)
        .upcoming(caller.id, user_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(
            reminders
                .into_iter()
                .map(Reminder::into_dto)
                .collect::<Vec<ReminderDto>>(),
        ),
    ))
}

pub async fn get_reminder_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let stats = ReminderService::new(&state.db)
        .stats(caller.id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

pub async fn get_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let reminder = ReminderService::new(&state.db).get(caller.id, id).await?;

    Ok((StatusCode::OK, Json(reminder.into_dto())))
}

pub async fn update_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateReminderDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let reminder = ReminderService::new(&state.db)
        .update(caller.id, id, UpdateReminderParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(reminder.into_dto())))
}

pub async fn update_reminder_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateReminderStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let reminder = ReminderService::new(&state.db)
        .update_status(caller.id, id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(reminder.into_dto())))
}

/// Snooze a reminder for 1 to 1440 minutes.
pub async fn snooze_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SnoozeReminderDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let reminder = ReminderService::new(&state.db)
        .snooze(caller.id, id, payload.minutes)
        .await?;

    Ok((StatusCode::OK, Json(reminder.into_dto())))
}

pub async fn delete_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    ReminderService::new(&state.db).remove(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
