use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{comment::CommentRepository, post::PostRepository},
    error::AppError,
    model::{
        comment::{Comment, CreateCommentParams, UpdateCommentParams},
        post::LikeToggle,
    },
    util::pagination::{Page, PageRequest},
};

pub struct CommentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a comment or reply to an active post.
    ///
    /// The comment insert and the post's `comments_count` increment share a transaction.
    ///
    /// # Returns
    /// - `Ok(Comment)` - Created comment
    /// - `Err(AppError::NotFound)` - Post or parent comment missing or inactive
    /// - `Err(AppError::BadRequest)` - Parent comment belongs to another post
    pub async fn create(&self, params: CreateCommentParams) -> Result<Comment, AppError> {
        let txn = self.db.begin().await?;
        let post_repo = PostRepository::new(&txn);
        let comment_repo = CommentRepository::new(&txn);

        match post_repo.find_by_id(params.post_id).await? {
            Some(post) if post.is_active => {}
            _ => return Err(AppError::not_found("Post")),
        }

        if let Some(parent_id) = params.parent_comment_id {
            let parent = comment_repo
                .find_by_id(parent_id)
                .await?
                .filter(|c| c.is_active)
                .ok_or_else(|| AppError::not_found("Parent comment"))?;

            if parent.post_id != params.post_id {
                return Err(AppError::BadRequest(
                    "Parent comment belongs to a different post".to_string(),
                ));
            }
        }

        let post_id = params.post_id;
        let comment = comment_repo.create(params).await?;
        post_repo.adjust_comments_count(post_id, 1).await?;

        txn.commit().await?;

        Ok(comment)
    }

    /// Lists active top-level comments of an active post.
    pub async fn find_by_post(
        &self,
        post_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Comment>, AppError> {
        match PostRepository::new(self.db).find_by_id(post_id).await? {
            Some(post) if post.is_active => {}
            _ => return Err(AppError::not_found("Post")),
        }

        Ok(CommentRepository::new(self.db)
            .find_top_level(post_id, request)
            .await?)
    }

    pub async fn find_replies(
        &self,
        id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Comment>, AppError> {
        self.get(id).await?;

        Ok(CommentRepository::new(self.db).find_replies(id, request).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Comment, AppError> {
        CommentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| AppError::not_found("Comment"))
    }

    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        params: UpdateCommentParams,
    ) -> Result<Comment, AppError> {
        let comment = self.get(id).await?;
        ensure_author(&comment, caller_id, "You can only update your own comments")?;

        Ok(CommentRepository::new(self.db).update(id, params).await?)
    }

    /// Soft deletes a comment and its replies, and takes them out of the post's
    /// `comments_count`.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Missing or already removed
    /// - `Err(AppError::Forbidden)` - Caller is not the author
    pub async fn remove(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let comment_repo = CommentRepository::new(&txn);

        let comment = comment_repo
            .find_by_id(id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| AppError::not_found("Comment"))?;
        ensure_author(&comment, caller_id, "You can only delete your own comments")?;

        let removed = comment_repo.deactivate_thread(id).await?;
        if removed == 0 {
            return Err(AppError::not_found("Comment"));
        }
        PostRepository::new(&txn)
            .adjust_comments_count(comment.post_id, -(removed as i32))
            .await?;

        txn.commit().await?;

        Ok(())
    }

    /// Likes the comment, or removes the caller's like if one exists.
    pub async fn toggle_like(&self, caller_id: Uuid, id: Uuid) -> Result<LikeToggle, AppError> {
        let txn = self.db.begin().await?;
        let repo = CommentRepository::new(&txn);

        match repo.find_by_id(id).await? {
            Some(comment) if comment.is_active => {}
            _ => return Err(AppError::not_found("Comment")),
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
}

fn ensure_author(comment: &Comment, caller_id: Uuid, message: &str) -> Result<(), AppError> {
    if comment.user_id != caller_id {
        return Err(AppError::Forbidden(message.to_string()));
    }
    Ok(())
}
