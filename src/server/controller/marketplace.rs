use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::{MessageDto, PageQueryDto},
        marketplace::{
            CreateItemDto, CreateOrderDto, CreateReviewDto, ItemListQuery, UpdateItemDto,
            UpdateOrderStatusDto, UserItemsQuery,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::marketplace::{
            paginated_items_dto, paginated_orders_dto, paginated_reviews_dto, CreateItemParams,
            CreateOrderParams, ItemFilter, UpdateItemParams,
        },
        service::marketplace::MarketplaceService,
        state::AppState,
        util::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            validation::ValidatedJson,
        },
    },
};

/// Default page size for item reviews.
const REVIEW_PAGE_LIMIT: u64 = 10;

/// List an item for sale.
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let item = MarketplaceService::new(&state.db)
        .create(CreateItemParams::from_dto(caller.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(item.into_dto())))
}

/// Browse active listings.
///
/// Supports `category`, `min_price`, `max_price`, `location`, `search`, `is_digital` and
/// `is_featured` filters, sorted by `sort_by` in `sort_order` (newest first by default).
pub async fn get_items(
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(AppError::BadRequest(
                "min_price cannot exceed max_price".to_string(),
            ));
        }
    }

    let filter = ItemFilter {
        category: query.category,
        min_price: query.min_price,
        max_price: query.max_price,
        location: query.location.filter(|s| !s.trim().is_empty()),
        search: query.search.filter(|s| !s.trim().is_empty()),
        is_digital: query.is_digital,
        is_featured: query.is_featured,
        sort_by: query.sort_by.unwrap_or_default(),
        sort_order: query.sort_order.unwrap_or_default(),
    };

    let page = MarketplaceService::new(&state.db)
        .find_many(filter, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_items_dto(page))))
}

pub async fn get_marketplace_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = MarketplaceService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

/// List a seller's items, optionally narrowed to one `status`.
pub async fn get_user_items(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<UserItemsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;

    let page = MarketplaceService::new(&state.db)
        .find_by_user(user_id, query.status, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_items_dto(page))))
}

/// Get an item. Each call counts as a view.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let item = MarketplaceService::new(&state.db).find_one(id).await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

/// Update a listing.
///
/// # Access Control
/// - Seller only
pub async fn update_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let item = MarketplaceService::new(&state.db)
        .update(caller.id, id, UpdateItemParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

pub async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    MarketplaceService::new(&state.db).remove(caller.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Review an item.
///
/// # Returns
/// - `201 Created` - Review stored and item rating refreshed
/// - `403 Forbidden` - Caller is the seller
/// - `409 Conflict` - Caller already reviewed this item
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let review = MarketplaceService::new(&state.db)
        .create_review(caller.id, id, payload.rating, payload.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(review.into_dto())))
}

pub async fn get_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, REVIEW_PAGE_LIMIT)?;

    let (page, average_rating) = MarketplaceService::new(&state.db)
        .reviews(id, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_reviews_dto(page, average_rating))))
}

pub async fn add_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    MarketplaceService::new(&state.db)
        .add_favorite(caller.id, id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageDto {
            message: "Item added to favorites".to_string(),
        }),
    ))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    MarketplaceService::new(&state.db)
        .remove_favorite(caller.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;

    let page = MarketplaceService::new(&state.db)
        .favorites(user_id, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_items_dto(page))))
}

/// Order units of an item.
///
/// # Returns
/// - `201 Created` - Pending order
/// - `403 Forbidden` - Caller is the seller
/// - `404 Not Found` - Item not found
/// - `409 Conflict` - Item not active or not enough slots
pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let order = MarketplaceService::new(&state.db)
        .create_order(CreateOrderParams {
            item_id: id,
            buyer_id: caller.id,
            quantity: payload.quantity,
            shipping_address: payload.shipping_address,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(order.into_dto())))
}

/// List the caller's purchases.
pub async fn get_my_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;
    let request = PageRequest::new(query.page, query.limit, DEFAULT_LIMIT)?;

    let page = MarketplaceService::new(&state.db)
        .my_orders(caller.id, request)
        .await?;

    Ok((StatusCode::OK, Json(paginated_orders_dto(page))))
}

/// Advance or cancel an order.
///
/// # Access Control
/// - Seller confirms, ships and delivers
/// - Buyer or seller cancels before shipping
pub async fn update_order_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, state.identity.as_ref())
        .require(&headers)
        .await?;

    let order = MarketplaceService::new(&state.db)
        .update_order_status(caller.id, id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(order.into_dto())))
}
