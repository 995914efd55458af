use chrono::Utc;
use entity::marketplace_item::ItemStatus;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    model::marketplace::{ItemSortField, SortOrder},
    server::{
        model::marketplace::{status_for_stock, CreateItemParams, Item, ItemFilter, UpdateItemParams},
        util::{
            json::to_json_list,
            pagination::{Page, PageRequest},
            search::contains_ignore_case,
        },
    },
};

pub struct MarketplaceItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MarketplaceItemRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateItemParams) -> Result<Item, DbErr> {
        let now = Utc::now();

        let entity = entity::marketplace_item::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(params.user_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category),
            price: ActiveValue::Set(params.price),
            available_slots: ActiveValue::Set(params.available_slots),
            sold_count: ActiveValue::Set(0),
            condition: ActiveValue::Set(params.condition),
            status: ActiveValue::Set(status_for_stock(ItemStatus::Active, params.available_slots)),
            images: ActiveValue::Set(to_json_list(&params.images)),
            tags: ActiveValue::Set(to_json_list(&params.tags)),
            location: ActiveValue::Set(params.location),
            is_digital: ActiveValue::Set(params.is_digital),
            is_featured: ActiveValue::Set(false),
            specifications: ActiveValue::Set(params.specifications),
            brand: ActiveValue::Set(params.brand),
            shipping_info: ActiveValue::Set(params.shipping_info),
            shipping_cost: ActiveValue::Set(params.shipping_cost),
            views_count: ActiveValue::Set(0),
            favorites_count: ActiveValue::Set(0),
            rating: ActiveValue::Set(0.0),
            reviews_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Item::from_entity(entity))
    }

    /// Finds an item by id in any status, including removed.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DbErr> {
        Ok(entity::prelude::MarketplaceItem::find_by_id(id)
            .one(self.db)
            .await?
            .map(Item::from_entity))
    }

    /// Lists active items matching `filter` in the requested sort order.
    ///
    /// Rows that tie on the sort column are ordered by id.
    pub async fn find_many(
        &self,
        filter: &ItemFilter,
        request: PageRequest,
    ) -> Result<Page<Item>, DbErr> {
        use entity::marketplace_item::Column;

        let mut query = entity::prelude::MarketplaceItem::find()
            .filter(Column::Status.eq(ItemStatus::Active));

        if let Some(category) = filter.category {
            query = query.filter(Column::Category.eq(category));
        }
        if let Some(min_price) = filter.min_price {
            query = query.filter(Column::Price.gte(min_price));
        }
        if let Some(max_price) = filter.max_price {
            query = query.filter(Column::Price.lte(max_price));
        }
        if let Some(location) = filter.location.as_deref() {
            query = query.filter(contains_ignore_case(&["marketplace_items.location"], location));
        }
        if let Some(term) = filter.search.as_deref() {
            query = query.filter(contains_ignore_case(
                &[
                    "marketplace_items.title",
                    "marketplace_items.description",
                    "marketplace_items.brand",
                ],
                term,
            ));
        }
        if let Some(is_digital) = filter.is_digital {
            query = query.filter(Column::IsDigital.eq(is_digital));
        }
        if let Some(is_featured) = filter.is_featured {
            query = query.filter(Column::IsFeatured.eq(is_featured));
        }

        let column = match filter.sort_by {
            ItemSortField::CreatedAt => Column::CreatedAt,
            ItemSortField::Price => Column::Price,
            ItemSortField::ViewsCount => Column::ViewsCount,
            ItemSortField::FavoritesCount => Column::FavoritesCount,
            ItemSortField::Rating => Column::Rating,
        };
        let order = match filter.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let paginator = query
            .order_by(column, order)
            .order_by_asc(Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(Item::from_entity)
            .collect();

        Ok(Page::new(items, total, request))
    }

    /// Lists a seller's items, excluding removed ones unless `status` asks for them.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        status: Option<ItemStatus>,
        request: PageRequest,
    ) -> Result<Page<Item>, DbErr> {
        use entity::marketplace_item::Column;

        let mut query = entity::prelude::MarketplaceItem::find().filter(Column::UserId.eq(user_id));

        query = match status {
            Some(status) => query.filter(Column::Status.eq(status)),
            None => query.filter(Column::Status.ne(ItemStatus::Removed)),
        };

        let paginator = query
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(Item::from_entity)
            .collect();

        Ok(Page::new(items, total, request))
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Item>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(entity::prelude::MarketplaceItem::find()
            .filter(entity::marketplace_item::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?
            .into_iter()
            .map(Item::from_entity)
            .collect())
    }

    /// Every item that has not been removed.
    pub async fn find_listed(&self) -> Result<Vec<Item>, DbErr> {
        Ok(entity::prelude::MarketplaceItem::find()
            .filter(entity::marketplace_item::Column::Status.ne(ItemStatus::Removed))
            .all(self.db)
            .await?
            .into_iter()
            .map(Item::from_entity)
            .collect())
    }

    /// Applies a partial update. Stock changes re-derive the sold out status.
    pub async fn update(&self, id: Uuid, params: UpdateItemParams) -> Result<Item, DbErr> {
        let model = self.load(id).await?;
        let mut status = params.status.unwrap_or(model.status);
        let mut active = model.into_active_model();

        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(category) = params.category {
            active.category = ActiveValue::Set(category);
        }
        if let Some(price) = params.price {
            active.price = ActiveValue::Set(price);
        }
        if let Some(available_slots) = params.available_slots {
            active.available_slots = ActiveValue::Set(available_slots);
            status = status_for_stock(status, available_slots);
        }
        if let Some(condition) = params.condition {
            active.condition = ActiveValue::Set(condition);
        }
        if let Some(images) = params.images {
            active.images = ActiveValue::Set(to_json_list(&images));
        }
        if let Some(tags) = params.tags {
            active.tags = ActiveValue::Set(to_json_list(&tags));
        }
        if let Some(location) = params.location {
            active.location = ActiveValue::Set(Some(location));
        }
        if let Some(is_digital) = params.is_digital {
            active.is_digital = ActiveValue::Set(is_digital);
        }
        if let Some(specifications) = params.specifications {
            active.specifications = ActiveValue::Set(Some(specifications));
        }
        if let Some(brand) = params.brand {
            active.brand = ActiveValue::Set(Some(brand));
        }
        if let Some(shipping_info) = params.shipping_info {
            active.shipping_info = ActiveValue::Set(Some(shipping_info));
        }
        if let Some(shipping_cost) = params.shipping_cost {
            active.shipping_cost = ActiveValue::Set(shipping_cost);
        }
        active.status = ActiveValue::Set(status);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Item::from_entity(active.update(self.db).await?))
    }

    pub async fn set_status(&self, id: Uuid, status: ItemStatus) -> Result<(), DbErr> {
        let mut active = self.load(id).await?.into_active_model();
        active.status = ActiveValue::Set(status);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    /// Increments `views_count` and returns the updated item.
    pub async fn record_view(&self, id: Uuid) -> Result<Item, DbErr> {
        entity::prelude::MarketplaceItem::update_many()
            .col_expr(
                entity::marketplace_item::Column::ViewsCount,
                Expr::col(entity::marketplace_item::Column::ViewsCount).add(1),
            )
            .filter(entity::marketplace_item::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(Item::from_entity(self.load(id).await?))
    }

    /// Adds `delta` to `favorites_count` in a single `UPDATE` and returns the new value.
    ///
    /// # Returns
    /// - `Err(DbErr::RecordNotUpdated)` - Decrement would take the counter below zero
    pub async fn adjust_favorites_count(&self, id: Uuid, delta: i32) -> Result<i32, DbErr> {
        let result = entity::prelude::MarketplaceItem::update_many()
            .col_expr(
                entity::marketplace_item::Column::FavoritesCount,
                Expr::col(entity::marketplace_item::Column::FavoritesCount).add(delta),
            )
            .filter(entity::marketplace_item::Column::Id.eq(id))
            .filter(entity::marketplace_item::Column::FavoritesCount.gte(Ord::max(-delta, 0)))
            .exec(self.db)
            .await?;

        let model = self.load(id).await?;
        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotUpdated);
        }

        Ok(model.favorites_count)
    }

    pub async fn set_rating(&self, id: Uuid, rating: f64, reviews_count: i32) -> Result<(), DbErr> {
        let mut active = self.load(id).await?.into_active_model();
        active.rating = ActiveValue::Set(rating);
        active.reviews_count = ActiveValue::Set(reviews_count);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    /// Moves `quantity` units between available stock and sold units in one `UPDATE`.
    ///
    /// A positive quantity sells units and only applies to an active item with at least
    /// that many slots left. A negative quantity returns units and only applies while
    /// `sold_count` covers them. The status then follows the stock through
    /// [`status_for_stock`]; the row is already locked by the stock update at that point.
    ///
    /// # Returns
    /// - `Ok(Some(Item))` - Stock moved
    /// - `Ok(None)` - Item not active, not enough slots, or not enough sold units to return
    /// - `Err(DbErr::RecordNotFound)` - Item does not exist
    pub async fn adjust_stock(&self, id: Uuid, quantity: i32) -> Result<Option<Item>, DbErr> {
        let mut update = entity::prelude::MarketplaceItem::update_many()
            .col_expr(
                entity::marketplace_item::Column::AvailableSlots,
                Expr::col(entity::marketplace_item::Column::AvailableSlots).sub(quantity),
            )
            .col_expr(
                entity::marketplace_item::Column::SoldCount,
                Expr::col(entity::marketplace_item::Column::SoldCount).add(quantity),
            )
            .col_expr(entity::marketplace_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::marketplace_item::Column::Id.eq(id));

        update = if quantity > 0 {
            update
                .filter(entity::marketplace_item::Column::Status.eq(ItemStatus::Active))
                .filter(entity::marketplace_item::Column::AvailableSlots.gte(quantity))
        } else {
            update.filter(entity::marketplace_item::Column::SoldCount.gte(-quantity))
        };

        let result = update.exec(self.db).await?;
        let model = self.load(id).await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        let status = status_for_stock(model.status, model.available_slots);
        if status == model.status {
            return Ok(Some(Item::from_entity(model)));
        }

        let mut active = model.into_active_model();
        active.status = ActiveValue::Set(status);

        Ok(Some(Item::from_entity(active.update(self.db).await?)))
    }

    async fn load(&self, id: Uuid) -> Result<entity::marketplace_item::Model, DbErr> {
        entity::prelude::MarketplaceItem::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Marketplace item {} not found", id)))
    }
}
