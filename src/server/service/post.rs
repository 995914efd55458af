use entity::post::{PostType, PostVisibility};
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{post::PostRepository, user::UserRepository},
    error::AppError,
    model::post::{CreatePostParams, LikeToggle, Post, PostFilter, PostStats, UpdatePostParams},
    util::pagination::{Page, PageRequest},
};

pub struct PostService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a post authored by the caller.
    pub async fn create(&self, params: CreatePostParams) -> Result<Post, AppError> {
        Ok(PostRepository::new(self.db).create(params).await?)
    }

    /// Lists public active posts, optionally of one type.
    pub async fn find_public(
        &self,
        post_type: Option<PostType>,
        request: PageRequest,
    ) -> Result<Page<Post>, AppError> {
        let filter = PostFilter {
            public_only: true,
            post_type,
            ..Default::default()
        };

        Ok(PostRepository::new(self.db).find_many(&filter, request).await?)
    }

    /// Lists a user's active posts.
    ///
    /// Authors see all of their own active posts. Everyone else sees only public ones.
    ///
    /// # Returns
    /// - `Ok(Page<Post>)` - Visible posts
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn find_by_user(
        &self,
        viewer_id: Option<Uuid>,
        user_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Post>, AppError> {
        if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("User"));
        }

        let filter = PostFilter {
            public_only: viewer_id != Some(user_id),
            user_id: Some(user_id),
            ..Default::default()
        };

        Ok(PostRepository::new(self.db).find_many(&filter, request).await?)
    }

    /// Searches public active posts by content and tags.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Empty search term
    pub async fn search(&self, term: &str, request: PageRequest) -> Result<Page<Post>, AppError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::BadRequest("Search query is required".to_string()));
        }

        let filter = PostFilter {
            public_only: true,
            search: Some(term.to_string()),
            ..Default::default()
        };

        Ok(PostRepository::new(self.db).find_many(&filter, request).await?)
    }

    /// Gets an active post visible to `viewer_id`.
    ///
    /// # Returns
    /// - `Ok(Post)` - Post found
    /// - `Err(AppError::NotFound)` - Missing or soft-deleted
    /// - `Err(AppError::Forbidden)` - Private post of another user
    pub async fn get(&self, viewer_id: Option<Uuid>, id: Uuid) -> Result<Post, AppError> {
        let post = self.get_active(id).await?;

        if post.visibility == PostVisibility::Private && viewer_id != Some(post.user_id) {
            return Err(AppError::Forbidden("This post is private".to_string()));
        }

        Ok(post)
    }

    pub async fn stats(&self, id: Uuid) -> Result<PostStats, AppError> {
        Ok(self.get_active(id).await?.stats())
    }

    /// Updates a post owned by the caller.
    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        params: UpdatePostParams,
    ) -> Result<Post, AppError> {
        let post = self.get_active(id).await?;
        ensure_author(&post, caller_id, "You can only update your own posts")?;

        Ok(PostRepository::new(self.db).update(id, params).await?)
    }

    /// Soft deletes a post owned by the caller.
    pub async fn remove(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let post = self.get_active(id).await?;
        ensure_author(&post, caller_id, "You can only delete your own posts")?;

        PostRepository::new(self.db).deactivate(id).await?;

        Ok(())
    }

    /// Likes the post, or removes the caller's like if one exists.
    ///
    /// The like row and `likes_count` change in the same transaction.
    pub async fn toggle_like(&self, caller_id: Uuid, id: Uuid) -> Result<LikeToggle, AppError> {
        let txn = self.db.begin().await?;
        let repo = PostRepository::new(&txn);

        match repo.find_by_id(id).await? {
            Some(post) if post.is_active => {}
            _ => return Err(AppError::not_found("Post")),
        }

        let liked = match repo.find_like(id, caller_id).await? {
            Some(like) => {
                repo.delete_like(like.id).await?;
                false
            }
            None => {
                repo.create_like(id, caller_id).await?;
                true
            }
        };
        let likes_count = repo.adjust_likes_count(id, if liked { 1 } else { -1 }).await?;

        txn.commit().await?;

        Ok(LikeToggle { liked, likes_count })
    }

    async fn get_active(&self, id: Uuid) -> Result<Post, AppError> {
        PostRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| AppError::not_found("Post"))
    }
}

fn ensure_author(post: &Post, caller_id: Uuid, message: &str) -> Result<(), AppError> {
    if post.user_id != caller_id {
        return Err(AppError::Forbidden(message.to_string()));
    }
    Ok(())
}
