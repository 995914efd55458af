use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    data::user::{summary_or_unknown, UserRepository},
    model::comment::{Comment, CreateCommentParams, UpdateCommentParams},
    util::{
        json::to_json_list,
        pagination::{Page, PageRequest},
    },
};

pub struct CommentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateCommentParams) -> Result<Comment, DbErr> {
        let now = Utc::now();

        let entity = entity::comment::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            post_id: ActiveValue::Set(params.post_id),
            user_id: ActiveValue::Set(params.user_id),
            parent_comment_id: ActiveValue::Set(params.parent_comment_id),
            content: ActiveValue::Set(params.content),
            media_urls: ActiveValue::Set(to_json_list(&params.media_urls)),
            likes_count: ActiveValue::Set(0),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(self.with_authors(vec![entity]).await?.remove(0))
    }

    /// Finds a comment by id regardless of its active flag.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DbErr> {
        let Some(entity) = entity::prelude::Comment::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.with_authors(vec![entity]).await?.pop())
    }

    /// Lists active top-level comments on a post, newest first, with reply counts.
    pub async fn find_top_level(
        &self,
        post_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Comment>, DbErr> {
        let paginator = entity::prelude::Comment::find()
            .filter(entity::comment::Column::PostId.eq(post_id))
            .filter(entity::comment::Column::ParentCommentId.is_null())
            .filter(entity::comment::Column::IsActive.eq(true))
            .order_by_desc(entity::comment::Column::CreatedAt)
            .order_by_asc(entity::comment::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(request.index()).await?;

        let ids: Vec<Uuid> = entities.iter().map(|e| e.id).collect();
        let reply_counts = self.count_active_replies(&ids).await?;

        let comments = self
            .with_authors(entities)
            .await?
            .into_iter()
            .map(|mut comment| {
                comment.replies_count = Some(reply_counts.get(&comment.id).copied().unwrap_or(0));
                comment
            })
            .collect();

        Ok(Page::new(comments, total, request))
    }

    /// Lists active direct replies to a comment, oldest first.
    pub async fn find_replies(
        &self,
        parent_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Comment>, DbErr> {
        let paginator = entity::prelude::Comment::find()
            .filter(entity::comment::Column::ParentCommentId.eq(parent_id))
            .filter(entity::comment::Column::IsActive.eq(true))
            .order_by_asc(entity::comment::Column::CreatedAt)
            .order_by_asc(entity::comment::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(request.index()).await?;

        Ok(Page::new(self.with_authors(entities).await?, total, request))
    }

    /// Counts active direct replies for each of the given parent comments.
    pub async fn count_active_replies(
        &self,
        parent_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, u64>, DbErr> {
        if parent_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let replies = entity::prelude::Comment::find()
            .filter(entity::comment::Column::ParentCommentId.is_in(parent_ids.iter().copied()))
            .filter(entity::comment::Column::IsActive.eq(true))
            .all(self.db)
            .await?;

        let mut counts = HashMap::new();
        for parent_id in replies.into_iter().filter_map(|r| r.parent_comment_id) {
            *counts.entry(parent_id).or_insert(0) += 1;
        }

        Ok(counts)
    }

    pub async fn update(&self, id: Uuid, params: UpdateCommentParams) -> Result<Comment, DbErr> {
        let mut active = self.load(id).await?.into_active_model();

        if let Some(content) = params.content {
            active.content = ActiveValue::Set(content);
        }
        if let Some(media_urls) = params.media_urls {
            active.media_urls = ActiveValue::Set(to_json_list(&media_urls));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(self.with_authors(vec![entity]).await?.remove(0))
    }

    /// Soft deletes an active comment together with every active reply beneath it.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of comments deactivated, 0 if the comment was already inactive
    pub async fn deactivate_thread(&self, id: Uuid) -> Result<u64, DbErr> {
        let mut thread = vec![id];
        let mut parents = vec![id];

        while !parents.is_empty() {
            parents = entity::prelude::Comment::find()
                .filter(entity::comment::Column::ParentCommentId.is_in(parents))
                .filter(entity::comment::Column::IsActive.eq(true))
                .all(self.db)
                .await?
                .into_iter()
                .map(|reply| reply.id)
                .collect();
            thread.extend_from_slice(&parents);
        }

        let result = entity::prelude::Comment::update_many()
            .col_expr(entity::comment::Column::IsActive, Expr::value(false))
            .col_expr(entity::comment::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::comment::Column::Id.is_in(thread))
            .filter(entity::comment::Column::IsActive.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Adds `delta` to `likes_count` in a single `UPDATE` and returns the new value.
    ///
    /// # Returns
    /// - `Err(DbErr::RecordNotUpdated)` - Decrement would take the counter below zero
    pub async fn adjust_likes_count(&self, id: Uuid, delta: i32) -> Result<i32, DbErr> {
        let result = entity::prelude::Comment::update_many()
            .col_expr(
                entity::comment::Column::LikesCount,
                Expr::col(entity::comment::Column::LikesCount).add(delta),
            )
            .filter(entity::comment::Column::Id.eq(id))
            .filter(entity::comment::Column::LikesCount.gte(Ord::max(-delta, 0)))
            .exec(self.db)
            .await?;

        let model = self.load(id).await?;
        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotUpdated);
        }

        Ok(model.likes_count)
    }

    pub async fn find_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<entity::comment_like::Model>, DbErr> {
        entity::prelude::CommentLike::find()
            .filter(entity::comment_like::Column::CommentId.eq(comment_id))
            .filter(entity::comment_like::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn create_like(&self, comment_id: Uuid, user_id: Uuid) -> Result<(), DbErr> {
        entity::comment_like::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            comment_id: ActiveValue::Set(comment_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn delete_like(&self, like_id: Uuid) -> Result<(), DbErr> {
        entity::prelude::CommentLike::delete_by_id(like_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    async fn with_authors(&self, entities: Vec<entity::comment::Model>) -> Result<Vec<Comment>, DbErr> {
        let user_ids: Vec<Uuid> = entities.iter().map(|e| e.user_id).collect();
        let authors = UserRepository::new(self.db).find_summaries(&user_ids).await?;

        Ok(entities
            .into_iter()
            .map(|e| {
                let author = summary_or_unknown(&authors, e.user_id);
                Comment::from_entity(e, author)
            })
            .collect())
    }

    async fn load(&self, id: Uuid) -> Result<entity::comment::Model, DbErr> {
        entity::prelude::Comment::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Comment {} not found", id)))
    }
}
