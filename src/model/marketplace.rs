use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use entity::{
    marketplace_item::{ItemCategory, ItemCondition, ItemStatus},
    marketplace_order::OrderStatus,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::{model::api::UserSummaryDto, server::util::validation::validate_url_list};

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateItemDto {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 10))]
    pub description: String,
    pub category: ItemCategory,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub available_slots: Option<i32>,
    pub condition: Option<ItemCondition>,
    #[serde(default)]
    #[validate(length(max = 10), custom(function = "validate_url_list"))]
    pub images: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub is_digital: Option<bool>,
    pub specifications: Option<Value>,
    #[validate(length(max = 100))]
    pub brand: Option<String>,
    pub shipping_info: Option<String>,
    #[validate(range(min = 0.0))]
    pub shipping_cost: Option<f64>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdateItemDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 10))]
    pub description: Option<String>,
    pub category: Option<ItemCategory>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub available_slots: Option<i32>,
    pub condition: Option<ItemCondition>,
    pub status: Option<ItemStatus>,
    #[validate(length(max = 10), custom(function = "validate_url_list"))]
    pub images: Option<Vec<String>>,
    #[validate(length(max = 20))]
    pub tags: Option<Vec<String>>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub is_digital: Option<bool>,
    pub specifications: Option<Value>,
    #[validate(length(max = 100))]
    pub brand: Option<String>,
    pub shipping_info: Option<String>,
    #[validate(range(min = 0.0))]
    pub shipping_cost: Option<f64>,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemSortField {
    #[default]
    CreatedAt,
    Price,
    ViewsCount,
    FavoritesCount,
    Rating,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ItemListQuery {
    pub category: Option<ItemCategory>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub is_digital: Option<bool>,
    pub is_featured: Option<bool>,
    pub sort_by: Option<ItemSortField>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct UserItemsQuery {
    pub status: Option<ItemStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ItemDto {
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

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedItemsDto {
    pub items: Vec<ItemDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MarketplaceStatsDto {
    pub total_items: u64,
    pub active_items: u64,
    pub total_sold: i64,
    pub average_price: f64,
    pub by_category: BTreeMap<String, u64>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateReviewDto {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReviewDto {
    pub id: Uuid,
    pub item_id: Uuid,
    pub user_id: Uuid,
    pub user: UserSummaryDto,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedReviewsDto {
    pub reviews: Vec<ReviewDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub average_rating: f64,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateOrderDto {
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub shipping_address: Option<Value>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct UpdateOrderStatusDto {
    pub status: OrderStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderDto {
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

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedOrdersDto {
    pub orders: Vec<OrderDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}
