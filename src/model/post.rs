use chrono::{DateTime, Utc};
use entity::post::{PostType, PostVisibility};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::api::UserSummaryDto,
    server::util::validation::{validate_non_empty_object, validate_url_list},
};

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreatePostDto {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: Option<PostType>,
    pub visibility: Option<PostVisibility>,
    #[serde(default)]
    #[validate(length(max = 10), custom(function = "validate_url_list"))]
    pub media_urls: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,
    #[validate(custom(function = "validate_non_empty_object"))]
    pub metadata: Option<Value>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdatePostDto {
    #[validate(length(min = 1, max = 5000))]
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub post_type: Option<PostType>,
    pub visibility: Option<PostVisibility>,
    #[validate(length(max = 10), custom(function = "validate_url_list"))]
    pub media_urls: Option<Vec<String>>,
    #[validate(length(max = 20))]
    pub tags: Option<Vec<String>>,
    #[validate(custom(function = "validate_non_empty_object"))]
    pub metadata: Option<Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PostDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author: UserSummaryDto,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub visibility: PostVisibility,
    pub media_urls: Vec<String>,
    pub tags: Vec<String>,
    pub metadata: Option<Value>,
    pub likes_count: i32,
    pub comments_count: i32,
    pub shares_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedPostsDto {
    pub posts: Vec<PostDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PostStatsDto {
    pub likes_count: i32,
    pub comments_count: i32,
    pub shares_count: i32,
    pub engagement_rate: f64,
}

#[derive(Deserialize, Debug, Default)]
pub struct PublicPostsQuery {
    #[serde(rename = "type")]
    pub post_type: Option<PostType>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchPostsQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
