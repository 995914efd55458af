use chrono::Utc;
use entity::post::PostVisibility;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    data::user::{summary_or_unknown, UserRepository},
    model::post::{CreatePostParams, Post, PostFilter, UpdatePostParams},
    util::{
        json::to_json_list,
        pagination::{Page, PageRequest},
        search::contains_ignore_case,
    },
};

pub struct PostRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PostRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a post with zeroed counters.
    ///
    /// # Returns
    /// - `Ok(Post)` - Created post with author summary
    /// - `Err(DbErr)` - Database error, including a foreign key failure for an unknown author
    pub async fn create(&self, params: CreatePostParams) -> Result<Post, DbErr> {
        let now = Utc::now();

        let entity = entity::post::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(params.user_id),
            content: ActiveValue::Set(params.content),
            post_type: ActiveValue::Set(params.post_type),
            visibility: ActiveValue::Set(params.visibility),
            media_urls: ActiveValue::Set(to_json_list(&params.media_urls)),
            tags: ActiveValue::Set(to_json_list(&params.tags)),
            metadata: ActiveValue::Set(params.metadata),
            likes_count: ActiveValue::Set(0),
            comments_count: ActiveValue::Set(0),
            shares_count: ActiveValue::Set(0),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        self.with_author(entity).await
    }

    /// Finds a post by id regardless of its active flag.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DbErr> {
        match entity::prelude::Post::find_by_id(id).one(self.db).await? {
            Some(entity) => Ok(Some(self.with_author(entity).await?)),
            None => Ok(None),
        }
    }

    /// Lists active posts matching `filter`, newest first.
    ///
    /// # Arguments
    /// - `filter` - Visibility, author, type and search restrictions
    /// - `request` - Page selection
    ///
    /// # Returns
    /// - `Ok(Page<Post>)` - Requested page with total count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn find_many(
        &self,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, DbErr> {
        let mut query =
            entity::prelude::Post::find().filter(entity::post::Column::IsActive.eq(true));

        if filter.public_only {
            query = query.filter(entity::post::Column::Visibility.eq(PostVisibility::Public));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(entity::post::Column::UserId.eq(user_id));
        }
        if let Some(post_type) = filter.post_type {
            query = query.filter(entity::post::Column::PostType.eq(post_type));
        }
        if let Some(term) = filter.search.as_deref() {
            query = query.filter(contains_ignore_case(
                &["posts.content", "CAST(posts.tags AS TEXT)"],
                term,
            ));
        }

        let paginator = query
            .order_by_desc(entity::post::Column::CreatedAt)
            .order_by_asc(entity::post::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(request.index()).await?;

        let authors = UserRepository::new(self.db)
            .find_summaries(&entities.iter().map(|e| e.user_id).collect::<Vec<_>>())
            .await?;

        let posts = entities
            .into_iter()
            .map(|e| {
                let author = summary_or_unknown(&authors, e.user_id);
                Post::from_entity(e, author)
            })
            .collect();

        Ok(Page::new(posts, total, request))
    }

    /// Applies a partial update and refreshes `updated_at`.
    pub async fn update(&self, id: Uuid, params: UpdatePostParams) -> Result<Post, DbErr> {
        let mut active = self.load_active(id).await?;

        if let Some(content) = params.content {
            active.content = ActiveValue::Set(content);
        }
        if let Some(post_type) = params.post_type {
            active.post_type = ActiveValue::Set(post_type);
        }
        if let Some(visibility) = params.visibility {
            active.visibility = ActiveValue::Set(visibility);
        }
        if let Some(media_urls) = params.media_urls {
            active.media_urls = ActiveValue::Set(to_json_list(&media_urls));
        }
        if let Some(tags) = params.tags {
            active.tags = ActiveValue::Set(to_json_list(&tags));
        }
        if let Some(metadata) = params.metadata {
            active.metadata = ActiveValue::Set(Some(metadata));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        self.with_author(entity).await
    }

    /// Soft deletes a post by clearing its active flag.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), DbErr> {
        let mut active = self.load_active(id).await?;
        active.is_active = ActiveValue::Set(false);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    /// Adds `delta` to `likes_count` in a single `UPDATE` and returns the new value.
    ///
    /// # Returns
    /// - `Ok(i32)` - New counter value
    /// - `Err(DbErr::RecordNotFound)` - Post does not exist
    /// - `Err(DbErr::RecordNotUpdated)` - Decrement would take the counter below zero
    pub async fn adjust_likes_count(&self, id: Uuid, delta: i32) -> Result<i32, DbErr> {
        self.add_to_counter(id, entity::post::Column::LikesCount, delta)
            .await?;

        Ok(self.load(id).await?.likes_count)
    }

    /// Adds `delta` to `comments_count` in a single `UPDATE` and returns the new value.
    pub async fn adjust_comments_count(&self, id: Uuid, delta: i32) -> Result<i32, DbErr> {
        self.add_to_counter(id, entity::post::Column::CommentsCount, delta)
            .await?;

        Ok(self.load(id).await?.comments_count)
    }

    pub async fn find_like(
        &self,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<entity::post_like::Model>, DbErr> {
        entity::prelude::PostLike::find()
            .filter(entity::post_like::Column::PostId.eq(post_id))
            .filter(entity::post_like::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn create_like(&self, post_id: Uuid, user_id: Uuid) -> Result<(), DbErr> {
        entity::post_like::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            post_id: ActiveValue::Set(post_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn delete_like(&self, like_id: Uuid) -> Result<(), DbErr> {
        entity::prelude::PostLike::delete_by_id(like_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    async fn with_author(&self, entity: entity::post::Model) -> Result<Post, DbErr> {
        let authors = UserRepository::new(self.db)
            .find_summaries(&[entity.user_id])
            .await?;
        let author = summary_or_unknown(&authors, entity.user_id);

        Ok(Post::from_entity(entity, author))
    }

    async fn add_to_counter(
        &self,
        id: Uuid,
        column: entity::post::Column,
        delta: i32,
    ) -> Result<(), DbErr> {
        let result = entity::prelude::Post::update_many()
            .col_expr(column, Expr::col(column).add(delta))
            .filter(entity::post::Column::Id.eq(id))
            .filter(column.gte(Ord::max(-delta, 0)))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            self.load(id).await?;
            return Err(DbErr::RecordNotUpdated);
        }

        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<entity::post::Model, DbErr> {
        entity::prelude::Post::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Post {} not found", id)))
    }

    async fn load_active(&self, id: Uuid) -> Result<entity::post::ActiveModel, DbErr> {
        Ok(self.load(id).await?.into_active_model())
    }
}
