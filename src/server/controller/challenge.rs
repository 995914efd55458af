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
        challenge::{
            ChallengeListQuery, CreateChallengeDto, LeaderboardEntryDto, RecordProgressDto,
            UpdateChallengeDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::challenge::{
            paginated_challenges_dto, user_progress_dto, ChallengeFilter, CreateChallengeParams,
            LeaderboardEntry, RecordProgressParams, UpdateChallengeParams,
        },
        service::challenge::ChallengeService,
        state::AppState,
        util::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            validation::ValidatedJson,
        },
    },
};

/// Create a challenge.
///
/// # Returns
/// - `201 Created` - Challenge created with computed `end_date`
/// - `400 Bad Request` - Invalid body or start date in the past
pub async fn create_challenge(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateChallengeDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let challenge = ChallengeService::new(&state.db)
        .create(CreateChallengeParams::from_dto(caller.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(challenge.into_dto())))
}

pub async fn get_public_challenges(
    State(state): State<AppState>,
    Query(query): Query<ChallengeListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let filter = ChallengeFilter {
        challenge_type: query.challenge_type,
        difficulty: query.difficulty,
        status: query.status,
    };

    let page = ChallengeService::new(&state.db)
        .find_public(filter, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_challenges_dto(page))))
}

pub async fn get_creator_challenges(
    State(state): State<AppState>,
    Path(creator_id): Path<Uuid>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let page = ChallengeService::new(&state.db)
        .find_by_creator(creator_id, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_challenges_dto(page))))
}

/// List challenges a user participates in.
pub async fn get_user_challenges(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let page = ChallengeService::new(&state.db)
        .find_by_user(user_id, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_challenges_dto(page))))
}

pub async fn get_challenge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let challenge = ChallengeService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(challenge.into_dto())))
}

/// Update a challenge.
///
/// # Access Control
/// - Creator only. Active challenges with participants are locked.
pub async fn update_challenge(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateChallengeDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let challenge = ChallengeService::new(&state.db)
        .update(caller.id, id, UpdateChallengeParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(challenge.into_dto())))
}

pub async fn delete_challenge(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    ChallengeService::new(&state.db).remove(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn join_challenge(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let challenge = ChallengeService::new(&state.db).join(caller.id, id).await?;

    Ok((StatusCode::OK, Json(challenge.into_dto())))
}

pub async fn leave_challenge(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    ChallengeService::new(&state.db).leave(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Record the caller's progress for one day of a challenge.
///
/// # Returns
/// - `200 OK` - Entry stored; repeating a date replaces the earlier entry
/// - `400 Bad Request` - Date outside the challenge period
/// - `409 Conflict` - Caller is not a participant
pub async fn record_progress(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RecordProgressDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let progress = ChallengeService::new(&state.db)
        .record_progress(RecordProgressParams {
            challenge_id: id,
            user_id: caller.id,
            date: payload.date,
            progress_data: payload.progress_data,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::OK, Json(progress.into_dto())))
}

pub async fn get_user_progress(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let entries = ChallengeService::new(&state.db)
        .user_progress(id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(user_progress_dto(entries))))
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let board = ChallengeService::new(&state.db).leaderboard(id).await?;

    Ok((
        StatusCode::OK,
        Json(
            board
                .into_iter()
                .map(LeaderboardEntry::into_dto)
                .collect::<Vec<LeaderboardEntryDto>>(),
        ),
    ))
}
