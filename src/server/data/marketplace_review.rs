use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    data::user::{summary_or_unknown, UserRepository},
    model::marketplace::Review,
    util::pagination::{Page, PageRequest},
};

pub struct MarketplaceReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MarketplaceReviewRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, DbErr> {
        let now = Utc::now();

        let entity = entity::marketplace_review::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            item_id: ActiveValue::Set(item_id),
            user_id: ActiveValue::Set(user_id),
            rating: ActiveValue::Set(rating),
            comment: ActiveValue::Set(comment),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(self.with_users(vec![entity]).await?.remove(0))
    }

    pub async fn exists(&self, item_id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        Ok(entity::prelude::MarketplaceReview::find()
            .filter(entity::marketplace_review::Column::ItemId.eq(item_id))
            .filter(entity::marketplace_review::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .is_some())
    }

    /// Every rating given to an item.
    pub async fn ratings(&self, item_id: Uuid) -> Result<Vec<i32>, DbErr> {
        Ok(entity::prelude::MarketplaceReview::find()
            .filter(entity::marketplace_review::Column::ItemId.eq(item_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|r| r.rating)
            .collect())
    }

    pub async fn find_by_item(
        &self,
        item_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Review>, DbErr> {
        let paginator = entity::prelude::MarketplaceReview::find()
            .filter(entity::marketplace_review::Column::ItemId.eq(item_id))
            .order_by_desc(entity::marketplace_review::Column::CreatedAt)
            .order_by_asc(entity::marketplace_review::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(request.index()).await?;

        Ok(Page::new(self.with_users(entities).await?, total, request))
    }

    async fn with_users(
        &self,
        entities: Vec<entity::marketplace_review::Model>,
    ) -> Result<Vec<Review>, DbErr> {
        let user_ids: Vec<Uuid> = entities.iter().map(|e| e.user_id).collect();
        let users = UserRepository::new(self.db).find_summaries(&user_ids).await?;

        Ok(entities
            .into_iter()
            .map(|e| {
                let user = summary_or_unknown(&users, e.user_id);
                Review::from_entity(e, user)
            })
            .collect())
    }
}
