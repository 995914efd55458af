//! Marketplace listings, reviews and orders.
//!
//! Prices are stored as `f64` and rounded to cents wherever they are derived.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use entity::{
    marketplace_item::{ItemCategory, ItemCondition, ItemStatus},
    marketplace_order::OrderStatus,
};
use sea_orm::ActiveEnum;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    model::marketplace::{
        CreateItemDto, ItemDto, ItemSortField, MarketplaceStatsDto, OrderDto, PaginatedItemsDto,
        PaginatedOrdersDto, PaginatedReviewsDto, ReviewDto, SortOrder, UpdateItemDto,
    },
    server::{
        model::user::UserSummary,
        util::{json::string_list, pagination::Page, round2},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub price: f64,
    pub available_slots: i32,
    pub sold_count: i32,
    pub condition: ItemCondition,
    pub status: ItemStatus,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub is_digital: bool,
    pub is_featured: bool,
    pub specifications: Option<Value>,
    pub brand: Option<String>,
    pub shipping_info: Option<String>,
    pub shipping_cost: f64,
    pub views_count: i32,
    pub favorites_count: i32,
    pub rating: f64,
    pub reviews_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn from_entity(entity: entity::marketplace_item::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            description: entity.description,
            category: entity.category,
            price: entity.price,
            available_slots: entity.available_slots,
            sold_count: entity.sold_count,
            condition: entity.condition,
            status: entity.status,
            images: string_list(&entity.images),
            tags: string_list(&entity.tags),
            location: entity.location,
            is_digital: entity.is_digital,
            is_featured: entity.is_featured,
            specifications: entity.specifications,
            brand: entity.brand,
            shipping_info: entity.shipping_info,
            shipping_cost: entity.shipping_cost,
            views_count: entity.views_count,
            favorites_count: entity.favorites_count,
            rating: entity.rating,
            reviews_count: entity.reviews_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ItemDto {
        ItemDto {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            category: self.category,
            price: self.price,
            available_slots: self.available_slots,
            sold_count: self.sold_count,
            condition: self.condition,
            status: self.status,
            images: self.images,
            tags: self.tags,
            location: self.location,
            is_digital: self.is_digital,
            is_featured: self.is_featured,
            specifications: self.specifications,
            brand: self.brand,
            shipping_info: self.shipping_info,
            shipping_cost: self.shipping_cost,
            views_count: self.views_count,
            favorites_count: self.favorites_count,
            rating: self.rating,
            reviews_count: self.reviews_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Status an item should have once its stock is `available_slots`.
///
/// Active items with no stock become sold out, and sold out items that get stock
/// back become active. Any other status is left to the seller.
pub fn status_for_stock(status: ItemStatus, available_slots: i32) -> ItemStatus {
    match status {
        ItemStatus::Active if available_slots <= 0 => ItemStatus::SoldOut,
        ItemStatus::SoldOut if available_slots > 0 => ItemStatus::Active,
        other => other,
    }
}

/// Price of `quantity` units, rounded to cents. Shipping is charged separately.
pub fn order_total(unit_price: f64, quantity: i32) -> f64 {
    round2(unit_price * f64::from(quantity))
}

/// Mean review rating rounded to two decimals, or 0 without reviews.
pub fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    round2(ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64)
}

/// Which side of an order is asking for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderActor {
    Buyer,
    Seller,
}

/// Whether `actor` may move an order from `from` to `to`.
///
/// Sellers advance orders one step at a time through confirmed, shipped and delivered.
/// Either side may cancel an order that has not shipped yet.
pub fn transition_allowed(from: OrderStatus, to: OrderStatus, actor: OrderActor) -> bool {
    use OrderStatus::*;

    match (from, to) {
        (Pending | Confirmed, Cancelled) => true,
        (Pending, Confirmed) | (Confirmed, Shipped) | (Shipped, Delivered) => {
            actor == OrderActor::Seller
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketplaceStats {
    pub total_items: u64,
    pub active_items: u64,
    pub total_sold: i64,
    pub average_price: f64,
    pub by_category: BTreeMap<String, u64>,
}

impl MarketplaceStats {
    /// # Arguments
    /// - `items` - Every listing that has not been removed
    pub fn from_items(items: &[Item]) -> Self {
        let mut stats = Self {
            total_items: items.len() as u64,
            ..Default::default()
        };

        for item in items {
            if item.status == ItemStatus::Active {
                stats.active_items += 1;
            }
            stats.total_sold += i64::from(item.sold_count);
            *stats.by_category.entry(item.category.to_value()).or_insert(0) += 1;
        }

        if !items.is_empty() {
            stats.average_price =
                round2(items.iter().map(|i| i.price).sum::<f64>() / items.len() as f64);
        }

        stats
    }

    pub fn into_dto(self) -> MarketplaceStatsDto {
        MarketplaceStatsDto {
            total_items: self.total_items,
            active_items: self.active_items,
            total_sold: self.total_sold,
            average_price: self.average_price,
            by_category: self.by_category,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub category: Option<ItemCategory>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub location: Option<String>,
    /// Case-insensitive substring matched against title, description and brand.
    pub search: Option<String>,
    pub is_digital: Option<bool>,
    pub is_featured: Option<bool>,
    pub sort_by: ItemSortField,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone)]
pub struct CreateItemParams {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub price: f64,
    pub available_slots: i32,
    pub condition: ItemCondition,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub is_digital: bool,
    pub specifications: Option<Value>,
    pub brand: Option<String>,
    pub shipping_info: Option<String>,
    pub shipping_cost: f64,
}

impl CreateItemParams {
    /// Stock defaults to one slot and condition to `new`. Prices are rounded to cents.
    pub fn from_dto(user_id: Uuid, dto: CreateItemDto) -> Self {
        Self {
            user_id,
            title: dto.title,
            description: dto.description,
            category: dto.category,
            price: round2(dto.price),
            available_slots: dto.available_slots.unwrap_or(1),
            condition: dto.condition.unwrap_or(ItemCondition::New),
            images: dto.images,
            tags: dto.tags,
            location: dto.location,
            is_digital: dto.is_digital.unwrap_or(false),
            specifications: dto.specifications,
            brand: dto.brand,
            shipping_info: dto.shipping_info,
            shipping_cost: round2(dto.shipping_cost.unwrap_or(0.0)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateItemParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<ItemCategory>,
    pub price: Option<f64>,
    pub available_slots: Option<i32>,
    pub condition: Option<ItemCondition>,
    pub status: Option<ItemStatus>,
    pub images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    pub is_digital: Option<bool>,
    pub specifications: Option<Value>,
    pub brand: Option<String>,
    pub shipping_info: Option<String>,
    pub shipping_cost: Option<f64>,
}

impl UpdateItemParams {
    pub fn from_dto(dto: UpdateItemDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            category: dto.category,
            price: dto.price.map(round2),
            available_slots: dto.available_slots,
            condition: dto.condition,
            status: dto.status,
            images: dto.images,
            tags: dto.tags,
            location: dto.location,
            is_digital: dto.is_digital,
            specifications: dto.specifications,
            brand: dto.brand,
            shipping_info: dto.shipping_info,
            shipping_cost: dto.shipping_cost.map(round2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub item_id: Uuid,
    pub user_id: Uuid,
    pub user: UserSummary,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn from_entity(entity: entity::marketplace_review::Model, user: UserSummary) -> Self {
        Self {
            id: entity.id,
            item_id: entity.item_id,
            user_id: entity.user_id,
            user,
            rating: entity.rating,
            comment: entity.comment,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            item_id: self.item_id,
            user_id: self.user_id,
            user: self.user.into_dto(),
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub item_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
    pub shipping_cost: f64,
    pub total_price: f64,
    pub status: OrderStatus,
    pub shipping_address: Option<Value>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn from_entity(entity: entity::marketplace_order::Model) -> Self {
        Self {
            id: entity.id,
            item_id: entity.item_id,
            buyer_id: entity.buyer_id,
            seller_id: entity.seller_id,
            quantity: entity.quantity,
            unit_price: entity.unit_price,
            shipping_cost: entity.shipping_cost,
            total_price: entity.total_price,
            status: entity.status,
            shipping_address: entity.shipping_address,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> OrderDto {
        OrderDto {
            id: self.id,
            item_id: self.item_id,
            buyer_id: self.buyer_id,
            seller_id: self.seller_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            shipping_cost: self.shipping_cost,
            total_price: self.total_price,
            status: self.status,
            shipping_address: self.shipping_address,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// The caller's role in this order, if any.
    pub fn actor(&self, user_id: Uuid) -> Option<OrderActor> {
        if user_id == self.seller_id {
            Some(OrderActor::Seller)
        } else if user_id == self.buyer_id {
            Some(OrderActor::Buyer)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOrderParams {
    pub item_id: Uuid,
    pub buyer_id: Uuid,
    pub quantity: i32,
    pub shipping_address: Option<Value>,
    pub notes: Option<String>,
}

pub fn paginated_items_dto(page: Page<Item>) -> PaginatedItemsDto {
    let page = page.map(Item::into_dto);

    PaginatedItemsDto {
        items: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

pub fn paginated_reviews_dto(page: Page<Review>, average_rating: f64) -> PaginatedReviewsDto {
    let page = page.map(Review::into_dto);

    PaginatedReviewsDto {
        reviews: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
        average_rating,
    }
}

pub fn paginated_orders_dto(page: Page<Order>) -> PaginatedOrdersDto {
    let page = page.map(Order::into_dto);

    PaginatedOrdersDto {
        orders: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected: two units at 45.99 cost 91.98
    #[test]
    fn order_total_rounds_to_cents() {
        assert_eq!(order_total(45.99, 2), 91.98);
        assert_eq!(order_total(0.1, 3), 0.3);
    }

    #[test]
    fn average_rating_of_reviews() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[5, 4, 4]), 4.33);
    }

    #[test]
    fn stock_changes_toggle_sold_out() {
        assert_eq!(status_for_stock(ItemStatus::Active, 0), ItemStatus::SoldOut);
        assert_eq!(status_for_stock(ItemStatus::SoldOut, 2), ItemStatus::Active);
        assert_eq!(status_for_stock(ItemStatus::Inactive, 0), ItemStatus::Inactive);
        assert_eq!(status_for_stock(ItemStatus::Active, 3), ItemStatus::Active);
    }

    /// Expected: only sellers advance orders, both sides cancel before shipping
    #[test]
    fn order_transitions_by_actor() {
        use OrderStatus::*;

        assert!(transition_allowed(Pending, Confirmed, OrderActor::Seller));
        assert!(!transition_allowed(Pending, Confirmed, OrderActor::Buyer));
        assert!(transition_allowed(Confirmed, Cancelled, OrderActor::Buyer));
        assert!(transition_allowed(Pending, Cancelled, OrderActor::Seller));
        assert!(!transition_allowed(Shipped, Cancelled, OrderActor::Seller));
        assert!(!transition_allowed(Pending, Delivered, OrderActor::Seller));
        assert!(!transition_allowed(Delivered, Refunded, OrderActor::Seller));
    }
}
