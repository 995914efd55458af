//! Post domain models and parameters.
//!
//! Posts are soft-deleted content rows carrying denormalized like, comment and share
//! counters. Every post is returned with a summary of its author.

use chrono::{DateTime, Utc};
use entity::post::{PostType, PostVisibility};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    model::{
        api::LikeToggleDto,
        post::{CreatePostDto, PaginatedPostsDto, PostDto, PostStatsDto, UpdatePostDto},
    },
    server::{
        model::user::UserSummary,
        util::{json::string_list, pagination::Page, round2},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author: UserSummary,
    pub content: String,
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

impl Post {
    /// Converts an entity model to a post domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - Post row
    /// - `author` - Summary of the user referenced by `entity.user_id`
    pub fn from_entity(entity: entity::post::Model, author: UserSummary) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            author,
            content: entity.content,
            post_type: entity.post_type,
            visibility: entity.visibility,
            media_urls: string_list(&entity.media_urls),
            tags: string_list(&entity.tags),
            metadata: entity.metadata,
            likes_count: entity.likes_count,
            comments_count: entity.comments_count,
            shares_count: entity.shares_count,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> PostDto {
        PostDto {
            id: self.id,
            user_id: self.user_id,
            author: self.author.into_dto(),
            content: self.content,
            post_type: self.post_type,
            visibility: self.visibility,
            media_urls: self.media_urls,
            tags: self.tags,
            metadata: self.metadata,
            likes_count: self.likes_count,
            comments_count: self.comments_count,
            shares_count: self.shares_count,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn stats(&self) -> PostStats {
        PostStats {
            likes_count: self.likes_count,
            comments_count: self.comments_count,
            shares_count: self.shares_count,
            engagement_rate: engagement_rate(
                self.likes_count,
                self.comments_count,
                self.shares_count,
            ),
        }
    }
}

/// Engagement score shown on post stats.
///
/// Plain sum of the interaction counters. Kept as a standalone function so the
/// weighting can change without touching storage or the stats shape.
pub fn engagement_rate(likes: i32, comments: i32, shares: i32) -> f64 {
    round2(f64::from(likes) + f64::from(comments) + f64::from(shares))
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostStats {
    pub likes_count: i32,
    pub comments_count: i32,
    pub shares_count: i32,
    pub engagement_rate: f64,
}

impl PostStats {
    pub fn into_dto(self) -> PostStatsDto {
        PostStatsDto {
            likes_count: self.likes_count,
            comments_count: self.comments_count,
            shares_count: self.shares_count,
            engagement_rate: self.engagement_rate,
        }
    }
}

/// Filters applied to post list queries. Only active posts are ever listed.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Restrict to `visibility = public`.
    pub public_only: bool,
    pub user_id: Option<Uuid>,
    pub post_type: Option<PostType>,
    /// Case-insensitive substring matched against content and tags.
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub user_id: Uuid,
    pub content: String,
    pub post_type: PostType,
    pub visibility: PostVisibility,
    pub media_urls: Vec<String>,
    pub tags: Vec<String>,
    pub metadata: Option<Value>,
}

impl CreatePostParams {
    /// Builds creation parameters with the caller as author.
    ///
    /// Type defaults to `text` and visibility to `public`.
    pub fn from_dto(user_id: Uuid, dto: CreatePostDto) -> Self {
        Self {
            user_id,
            content: dto.content,
            post_type: dto.post_type.unwrap_or(PostType::Text),
            visibility: dto.visibility.unwrap_or(PostVisibility::Public),
            media_urls: dto.media_urls,
            tags: dto.tags,
            metadata: dto.metadata,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePostParams {
    pub content: Option<String>,
    pub post_type: Option<PostType>,
    pub visibility: Option<PostVisibility>,
    pub media_urls: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<Value>,
}

impl UpdatePostParams {
    pub fn from_dto(dto: UpdatePostDto) -> Self {
        Self {
            content: dto.content,
            post_type: dto.post_type,
            visibility: dto.visibility,
            media_urls: dto.media_urls,
            tags: dto.tags,
            metadata: dto.metadata,
        }
    }
}

/// Outcome of liking or unliking a post or comment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LikeToggle {
    pub liked: bool,
    pub likes_count: i32,
}

impl LikeToggle {
    /// # Arguments
    /// - `subject` - `"Post"` or `"Comment"`, used in the message
    pub fn into_dto(self, subject: &str) -> LikeToggleDto {
        let verb = if self.liked { "liked" } else { "unliked" };

        LikeToggleDto {
            message: format!("{} {}", subject, verb),
            liked: self.liked,
            likes_count: self.likes_count,
        }
    }
}

pub fn paginated_posts_dto(page: Page<Post>) -> PaginatedPostsDto {
    let page = page.map(Post::into_dto);

    PaginatedPostsDto {
        posts: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_rate_sums_counters() {
        assert_eq!(engagement_rate(10, 4, 1), 15.0);
        assert_eq!(engagement_rate(0, 0, 0), 0.0);
    }

    #[test]
    fn like_toggle_message() {
        let liked = LikeToggle {
            liked: true,
            likes_count: 3,
        };
        let unliked = LikeToggle {
            liked: false,
            likes_count: 2,
        };

        assert_eq!(liked.into_dto("Post").message, "Post liked");
        assert_eq!(unliked.into_dto("Comment").message, "Comment unliked");
    }
}
