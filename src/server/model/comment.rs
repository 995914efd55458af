//! Comment domain models and parameters.
//!
//! Comments form one-level-at-a-time reply threads through `parent_comment_id`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::comment::{CommentDto, CreateCommentDto, PaginatedCommentsDto, UpdateCommentDto},
    server::{
        model::user::UserSummary,
        util::{json::string_list, pagination::Page},
    },
};

/// Default page size for comment listings.
pub const COMMENT_PAGE_LIMIT: u64 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub author: UserSummary,
    pub parent_comment_id: Option<Uuid>,
    pub content: String,
    pub media_urls: Vec<String>,
    pub likes_count: i32,
    pub replies_count: Option<u64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn from_entity(entity: entity::comment::Model, author: UserSummary) -> Self {
        Self {
            id: entity.id,
            post_id: entity.post_id,
            user_id: entity.user_id,
            author,
            parent_comment_id: entity.parent_comment_id,
            content: entity.content,
            media_urls: string_list(&entity.media_urls),
            likes_count: entity.likes_count,
            replies_count: None,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CommentDto {
        CommentDto {
            id: self.id,
            post_id: self.post_id,
            user_id: self.user_id,
            author: self.author.into_dto(),
            parent_comment_id: self.parent_comment_id,
            content: self.content,
            media_urls: self.media_urls,
            likes_count: self.likes_count,
            replies_count: self.replies_count,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCommentParams {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
    pub content: String,
    pub media_urls: Vec<String>,
}

impl CreateCommentParams {
    pub fn from_dto(user_id: Uuid, dto: CreateCommentDto) -> Self {
        Self {
            post_id: dto.post_id,
            user_id,
            parent_comment_id: dto.parent_comment_id,
            content: dto.content,
            media_urls: dto.media_urls,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCommentParams {
    pub content: Option<String>,
    pub media_urls: Option<Vec<String>>,
}

impl UpdateCommentParams {
    pub fn from_dto(dto: UpdateCommentDto) -> Self {
        Self {
            content: dto.content,
            media_urls: dto.media_urls,
        }
    }
}

pub fn paginated_comments_dto(page: Page<Comment>) -> PaginatedCommentsDto {
    let page = page.map(Comment::into_dto);

    PaginatedCommentsDto {
        comments: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}
