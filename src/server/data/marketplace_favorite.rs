use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::util::pagination::{Page, PageRequest};

pub struct MarketplaceFavoriteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MarketplaceFavoriteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, item_id: Uuid, user_id: Uuid) -> Result<(), DbErr> {
        entity::marketplace_favorite::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            item_id: ActiveValue::Set(item_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn exists(&self, item_id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        Ok(entity::prelude::MarketplaceFavorite::find()
            .filter(entity::marketplace_favorite::Column::ItemId.eq(item_id))
            .filter(entity::marketplace_favorite::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .is_some())
    }

    /// Returns whether a favorite was removed.
    pub async fn delete(&self, item_id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::MarketplaceFavorite::delete_many()
            .filter(entity::marketplace_favorite::Column::ItemId.eq(item_id))
            .filter(entity::marketplace_favorite::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Ids of the items a user favorited, most recently favorited first.
    pub async fn find_item_ids(
        &self,
        user_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Uuid>, DbErr> {
        let paginator = entity::prelude::MarketplaceFavorite::find()
            .filter(entity::marketplace_favorite::Column::UserId.eq(user_id))
            .order_by_desc(entity::marketplace_favorite::Column::CreatedAt)
            .order_by_asc(entity::marketplace_favorite::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let ids = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(|f| f.item_id)
            .collect();

        Ok(Page::new(ids, total, request))
    }
}
