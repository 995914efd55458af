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
        post::{CreatePostDto, PublicPostsQuery, SearchPostsQuery, UpdatePostDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::post::{paginated_posts_dto, CreatePostParams, UpdatePostParams},
        service::post::PostService,
        state::AppState,
        util::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            validation::ValidatedJson,
        },
    },
};

/// Create a post authored by the caller.
///
/// # Returns
/// - `201 Created` - Post created
/// - `400 Bad Request` - Invalid body
/// - `401 Unauthorized` - Missing or invalid token
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreatePostDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let post = PostService::new(&state.db)
        .create(CreatePostParams::from_dto(caller.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(post.into_dto())))
}

/// List public posts, optionally filtered by `type`.
pub async fn get_public_posts(
    State(state): State<AppState>,
    Query(query): Query<PublicPostsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let page = PostService::new(&state.db)
        .find_public(query.post_type, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_posts_dto(page))))
}

/// Search public posts by content and tags.
///
/// # Returns
/// - `200 OK` - Matching posts
/// - `400 Bad Request` - Missing `q`
pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchPostsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let page = PostService::new(&state.db)
        .search(&query.q, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_posts_dto(page))))
}

/// List a user's posts.
///
/// # Access Control
/// - Optional authentication. The author also sees non-public posts.
pub async fn get_user_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, state.identity.as_ref())
        .optional(&headers)
        .await?;

    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let page = PostService::new(&state.db)
        .find_by_user(viewer.map(|v| v.id), user_id, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_posts_dto(page))))
}

/// Get a single post.
///
/// # Returns
/// - `200 OK` - Post
/// - `403 Forbidden` - Private post of another user
/// - `404 Not Found` - Missing or deleted
pub async fn get_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, state.identity.as_ref())
        .optional(&headers)
        .await?;

    let post = PostService::new(&state.db)
        .get(viewer.map(|v| v.id), id)
        .await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

/// Get interaction counters for a post.
pub async fn get_post_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let stats = PostService::new(&state.db).stats(id).await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

/// Update one of the caller's posts.
pub async fn update_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePostDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let post = PostService::new(&state.db)
        .update(caller.id, id, UpdatePostParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

/// Soft delete one of the caller's posts.
pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    PostService::new(&state.db).remove(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Like or unlike a post.
pub async fn toggle_post_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let toggle = PostService::new(&state.db)
        .toggle_like(caller.id, id)
        .await?;

    Ok((StatusCode::OK, Json(toggle.into_dto("Post"))))
}
