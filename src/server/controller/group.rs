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
        group::{CreateGroupDto, GroupListQuery, JoinGroupDto, UpdateGroupDto, UpdateMemberRoleDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::group::{
            paginated_groups_dto, paginated_members_dto, CreateGroupParams, GroupFilter,
            UpdateGroupParams,
        },
        service::group::GroupService,
        state::AppState,
        util::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            validation::ValidatedJson,
        },
    },
};

/// Create a group owned by the caller.
pub async fn create_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateGroupDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let group = GroupService::new(&state.db)
        .create(CreateGroupParams::from_dto(caller.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(group.into_dto())))
}

/// List active groups filtered by `category`, `type` and `search`.
pub async fn get_groups(
    State(state): State<AppState>,
    Query(query): Query<GroupListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let filter = GroupFilter {
        category: query.category,
        group_type: query.group_type,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    let page = GroupService::new(&state.db)
        .find_many(filter, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_groups_dto(page))))
}

/// Get a group with its active members.
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let group = GroupService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(group.into_dto())))
}

/// Update a group.
///
/// # Access Control
/// - Group owner or an active admin
pub async fn update_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateGroupDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let group = GroupService::new(&state.db)
        .update(caller.id, id, UpdateGroupParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(group.into_dto())))
}

pub async fn delete_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    GroupService::new(&state.db).remove(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Join a group, or request to join a non-public one.
///
/// # Returns
/// - `201 Created` - Membership created, active or pending
/// - `404 Not Found` - Group not found
/// - `409 Conflict` - Already a member or group is full
pub async fn join_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<JoinGroupDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let member = GroupService::new(&state.db)
        .join(caller.id, id, payload.join_message)
        .await?;

    Ok((StatusCode::CREATED, Json(member.into_dto())))
}

pub async fn leave_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    GroupService::new(&state.db).leave(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_group_members(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    let page = GroupService::new(&state.db).members(id, request).await?;

    Ok((StatusCode::OK, Json(paginated_members_dto(page))))
}

/// Change a member's role and optionally approve, ban or remove them.
pub async fn update_member_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<UpdateMemberRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let member = GroupService::new(&state.db)
        .update_member_role(caller.id, id, user_id, payload.role, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(member.into_dto())))
}
