//! Post and comment factories.

use chrono::{DateTime, Utc};
use entity::post::{PostType, PostVisibility};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::json;
use uuid::Uuid;

use crate::factory::helpers::next_id;

/// Factory for creating posts.
///
/// Defaults to an active public text post with zeroed counters.
pub struct PostFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: Uuid,
    content: String,
    post_type: PostType,
    visibility: PostVisibility,
    tags: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl<'a> PostFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: Uuid) -> Self {
        Self {
            db,
            user_id,
            content: format!("Post number {}", next_id()),
            post_type: PostType::Text,
            visibility: PostVisibility::Public,
            tags: Vec::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn post_type(mut self, post_type: PostType) -> Self {
        self.post_type = post_type;
        self
    }

    pub fn visibility(mut self, visibility: PostVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub async fn build(self) -> Result<entity::post::Model, DbErr> {
        entity::post::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(self.user_id),
            content: ActiveValue::Set(self.content),
            post_type: ActiveValue::Set(self.post_type),
            visibility: ActiveValue::Set(self.visibility),
            media_urls: ActiveValue::Set(json!([])),
            tags: ActiveValue::Set(json!(self.tags)),
            metadata: ActiveValue::Set(None),
            likes_count: ActiveValue::Set(0),
            comments_count: ActiveValue::Set(0),
            shares_count: ActiveValue::Set(0),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active public text post for `user_id`.
pub async fn create_post(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<entity::post::Model, DbErr> {
    PostFactory::new(db, user_id).build().await
}

/// Inserts an active comment without touching the post's `comments_count`.
///
/// # Arguments
/// - `db` - Database connection
/// - `post_id` - Post the comment belongs to
/// - `user_id` - Author
/// - `parent_comment_id` - Parent comment for replies, `None` for top-level
pub async fn create_comment(
    db: &DatabaseConnection,
    post_id: Uuid,
    user_id: Uuid,
    parent_comment_id: Option<Uuid>,
) -> Result<entity::comment::Model, DbErr> {
    let now = Utc::now();
    entity::comment::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        post_id: ActiveValue::Set(post_id),
        user_id: ActiveValue::Set(user_id),
        parent_comment_id: ActiveValue::Set(parent_comment_id),
        content: ActiveValue::Set(format!("Comment {}", next_id())),
        media_urls: ActiveValue::Set(json!([])),
        likes_count: ActiveValue::Set(0),
        is_active: ActiveValue::Set(true),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory::create_user};

    #[tokio::test]
    async fn creates_post_and_reply() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_social_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;
        let post = PostFactory::new(db, user.id).tags(&["run"]).build().await?;
        let parent = create_comment(db, post.id, user.id, None).await?;
        let reply = create_comment(db, post.id, user.id, Some(parent.id)).await?;

        assert_eq!(post.tags, json!(["run"]));
        assert_eq!(reply.parent_comment_id, Some(parent.id));

        Ok(())
    }
}
