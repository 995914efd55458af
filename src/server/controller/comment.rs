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
        comment::{CreateCommentDto, UpdateCommentDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::comment::{
            paginated_comments_dto, CreateCommentParams, UpdateCommentParams, COMMENT_PAGE_LIMIT,
        },
        service::comment::CommentService,
        state::AppState,
        util::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            validation::ValidatedJson,
        },
    },
};

/// Comment on a post, or reply to another comment.
///
/// # Returns
/// - `201 Created` - Comment created
/// - `400 Bad Request` - Invalid body or parent on another post
/// - `404 Not Found` - Post or parent comment not found
pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateCommentDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let comment = CommentService::new(&state.db)
        .create(CreateCommentParams::from_dto(caller.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into_dto())))
}

/// List top-level comments of a post with their reply counts.
pub async fn get_post_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, COMMENT_PAGE_LIMIT)?;
    let page = CommentService::new(&state.db)
        .find_by_post(post_id, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_comments_dto(page))))
}

pub async fn get_comment_replies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let page = CommentService::new(&state.db)
        .find_replies(id, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_comments_dto(page))))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let comment = CommentService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(comment.into_dto())))
}

pub async fn update_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCommentDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let comment = CommentService::new(&state.db)
        .update(caller.id, id, UpdateCommentParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(comment.into_dto())))
}

/// Soft delete one of the caller's comments.
pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    CommentService::new(&state.db).remove(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_comment_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let toggle = CommentService::new(&state.db)
        .toggle_like(caller.id, id)
        .await?;

    Ok((StatusCode::OK, Json(toggle.into_dto("Comment"))))
}
