use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{model::api::UserSummaryDto, server::util::validation::validate_url_list};

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateCommentDto {
    pub post_id: Uuid,
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
    pub parent_comment_id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(max = 10), custom(function = "validate_url_list"))]
    pub media_urls: Vec<String>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdateCommentDto {
    #[validate(length(min = 1, max = 1000))]
    pub content: Option<String>,
    #[validate(length(max = 10), custom(function = "validate_url_list"))]
    pub media_urls: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CommentDto {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub author: UserSummaryDto,
    pub parent_comment_id: Option<Uuid>,
    pub content: String,
    pub media_urls: Vec<String>,
    pub likes_count: i32,
    /// Number of active direct replies, present on top-level listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replies_count: Option<u64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedCommentsDto {
    pub comments: Vec<CommentDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}
