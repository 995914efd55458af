use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use entity::{notification::NotificationType, notification_preference::DeliveryChannel};
use uuid::Uuid;

use crate::{
    model::{
        api::UpdatedCountDto,
        notification::{
            AchievementNotificationDto, BulkNotificationDto, CreateNotificationDto,
            CreatedCountDto, NotificationListQuery, SocialNotificationDto,
            SocialNotificationQuery, UpdateNotificationDto, UpdatePreferenceDto,
            UpsertPreferenceDto, WorkoutReminderDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::notification::{
            paginated_notifications_dto, CreateNotificationParams, NotificationFilter, Preference,
        },
        service::notification::NotificationService,
        state::AppState,
        util::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            validation::ValidatedJson,
        },
    },
};

/// Send a notification to a user.
///
/// # Returns
/// - `201 Created` - Notification stored, delivered now unless `scheduled_for` is set
/// - `404 Not Found` - Recipient or triggering user does not exist
pub async fn create_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateNotificationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let notification = NotificationService::new(&state.db)
        .create(CreateNotificationParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(notification.into_dto())))
}

pub async fn create_bulk_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<BulkNotificationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let created_count = NotificationService::new(&state.db)
        .create_bulk(CreateNotificationParams::for_recipients(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedCountDto { created_count })))
}

/// List the caller's notifications with the unread count.
///
/// Supports `unread_only` and `category` filters.
pub async fn get_user_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(query): Query<NotificationListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let filter = NotificationFilter {
        unread_only: query.unread_only.unwrap_or(false),
        category: query.category.filter(|c| !c.trim().is_empty()),
    };

    let (page, unread_count) = NotificationService::new(&state.db)
        .find_by_user(caller.id, user_id, filter, request)
        .await?;

    Ok((
        StatusCode::OK,
        Json(paginated_notifications_dto(page, unread_count)),
    ))
}

pub async fn get_notification_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let stats = NotificationService::new(&state.db)
        .stats(caller.id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

pub async fn upsert_preference(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<UpsertPreferenceDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let preference = NotificationService::new(&state.db)
        .upsert_preference(caller.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(preference.into_dto())))
}

pub async fn get_preferences(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let preferences = NotificationService::new(&state.db)
        .preferences(caller.id, user_id)
        .await?;
    let preferences: Vec<_> = preferences.into_iter().map(Preference::into_dto).collect();

    Ok((StatusCode::OK, Json(preferences)))
}

/// Enable, disable or reconfigure one type and channel combination.
pub async fn update_preference(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, notification_type, delivery_channel)): Path<(
        Uuid,
        NotificationType,
        DeliveryChannel,
    )>,
    ValidatedJson(payload): ValidatedJson<UpdatePreferenceDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let preference = NotificationService::new(&state.db)
        .update_preference(
            caller.id,
            user_id,
            notification_type,
            delivery_channel,
            payload,
        )
        .await?;

    Ok((StatusCode::OK, Json(preference.into_dto())))
}

pub async fn get_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let notification = NotificationService::new(&state.db)
        .get(caller.id, id)
        .await?;

    Ok((StatusCode::OK, Json(notification.into_dto())))
}

pub async fn update_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateNotificationDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let notification = NotificationService::new(&state.db)
        .update(caller.id, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(notification.into_dto())))
}

pub async fn mark_as_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let notification = NotificationService::new(&state.db)
        .mark_as_read(caller.id, id)
        .await?;

    Ok((StatusCode::OK, Json(notification.into_dto())))
}

pub async fn mark_all_as_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let updated_count = NotificationService::new(&state.db)
        .mark_all_as_read(caller.id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(UpdatedCountDto { updated_count })))
}

pub async fn delete_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    NotificationService::new(&state.db)
        .remove(caller.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn send_workout_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<WorkoutReminderDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let notification = NotificationService::new(&state.db)
        .create(CreateNotificationParams::workout_reminder(user_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(notification.into_dto())))
}

pub async fn send_achievement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AchievementNotificationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let notification = NotificationService::new(&state.db)
        .create(CreateNotificationParams::achievement(user_id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(notification.into_dto())))
}

/// Notify a user about another user's activity, named by `?triggered_by=`.
pub async fn send_social(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(query): Query<SocialNotificationQuery>,
    ValidatedJson(payload): ValidatedJson<SocialNotificationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let notification = NotificationService::new(&state.db)
        .create(CreateNotificationParams::social(
            user_id,
            query.triggered_by,
            payload,
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(notification.into_dto())))
}
