use chrono::Utc;
use entity::marketplace_order::OrderStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    model::marketplace::{order_total, CreateOrderParams, Item, Order},
    util::pagination::{Page, PageRequest},
};

pub struct MarketplaceOrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MarketplaceOrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending order, snapshotting the item's price and shipping cost.
    pub async fn create(&self, item: &Item, params: CreateOrderParams) -> Result<Order, DbErr> {
        let now = Utc::now();

        let entity = entity::marketplace_order::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            item_id: ActiveValue::Set(item.id),
            buyer_id: ActiveValue::Set(params.buyer_id),
            seller_id: ActiveValue::Set(item.user_id),
            quantity: ActiveValue::Set(params.quantity),
            unit_price: ActiveValue::Set(item.price),
            shipping_cost: ActiveValue::Set(item.shipping_cost),
            total_price: ActiveValue::Set(order_total(item.price, params.quantity)),
            status: ActiveValue::Set(OrderStatus::Pending),
            shipping_address: ActiveValue::Set(params.shipping_address),
            notes: ActiveValue::Set(params.notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Order::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DbErr> {
        Ok(entity::prelude::MarketplaceOrder::find_by_id(id)
            .one(self.db)
            .await?
            .map(Order::from_entity))
    }

    pub async fn find_by_buyer(
        &self,
        buyer_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Order>, DbErr> {
        let paginator = entity::prelude::MarketplaceOrder::find()
            .filter(entity::marketplace_order::Column::BuyerId.eq(buyer_id))
            .order_by_desc(entity::marketplace_order::Column::CreatedAt)
            .order_by_asc(entity::marketplace_order::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let orders = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(Order::from_entity)
            .collect();

        Ok(Page::new(orders, total, request))
    }

    /// Moves an order from `from` to `to`, provided nobody changed its status meanwhile.
    ///
    /// # Returns
    /// - `Ok(Some(Order))` - Order in its new status
    /// - `Ok(None)` - Order is no longer in status `from`
    pub async fn transition(
        &self,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, DbErr> {
        let result = entity::prelude::MarketplaceOrder::update_many()
            .col_expr(entity::marketplace_order::Column::Status, Expr::value(to))
            .col_expr(entity::marketplace_order::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::marketplace_order::Column::Id.eq(id))
            .filter(entity::marketplace_order::Column::Status.eq(from))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}
