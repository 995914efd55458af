use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use entity::analytics::PeriodType;
use uuid::Uuid;

use crate::{
    model::analytics::{
        AnalyticsListQuery, CreateAnalyticsDto, DashboardQuery, SaveDashboardSettingsDto,
        UpdateAnalyticsDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::analytics::{
            paginated_analytics_dto, AnalyticsFilter, CreateAnalyticsParams, UpdateAnalyticsParams,
        },
        service::analytics::AnalyticsService,
        state::AppState,
        util::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            validation::ValidatedJson,
        },
    },
};

pub async fn create_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateAnalyticsDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let analytics = AnalyticsService::new(&state.db)
        .create(CreateAnalyticsParams::from_dto(caller.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(analytics.into_dto())))
}

/// List the caller's analytics, latest period first.
///
/// `start_date` and `end_date` bound `period_start` inclusively.
pub async fn get_user_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(query): Query<AnalyticsListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let filter = AnalyticsFilter {
        analytics_type: query.analytics_type,
        period_type: query.period_type,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let page = AnalyticsService::new(&state.db)
        .find_by_user(caller.id, user_id, filter, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_analytics_dto(page))))
}

/// Dashboard summary for the last day, week, month or year (weekly by default).
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let dashboard = AnalyticsService::new(&state.db)
        .dashboard(caller.id, user_id, query.period.unwrap_or(PeriodType::Weekly))
        .await?;

    Ok((StatusCode::OK, Json(dashboard.into_dto())))
}

pub async fn get_dashboard_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let settings = AnalyticsService::new(&state.db)
        .settings(caller.id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(settings.into_dto())))
}

pub async fn save_dashboard_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<SaveDashboardSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let settings = AnalyticsService::new(&state.db)
        .save_settings(caller.id, payload)
        .await?;

    Ok((StatusCode::OK, Json(settings.into_dto())))
}

pub async fn get_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let analytics = AnalyticsService::new(&state.db).get(caller.id, id).await?;

    Ok((StatusCode::OK, Json(analytics.into_dto())))
}

pub async fn update_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateAnalyticsDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let analytics = AnalyticsService::new(&state.db)
        .update(caller.id, id, UpdateAnalyticsParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(analytics.into_dto())))
}

pub async fn delete_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    AnalyticsService::new(&state.db).remove(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
