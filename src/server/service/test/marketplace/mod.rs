use entity::{marketplace_item::ItemStatus, marketplace_order::OrderStatus};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

use crate::server::{
    data::{
        marketplace_item::MarketplaceItemRepository,
        marketplace_order::MarketplaceOrderRepository,
    },
    error::AppError,
    model::marketplace::CreateOrderParams,
    service::marketplace::MarketplaceService,
    util::pagination::PageRequest,
};

mod favorites;
mod orders;
mod reviews;

fn order_params(item_id: Uuid, buyer_id: Uuid, quantity: i32) -> CreateOrderParams {
    CreateOrderParams {
        item_id,
        buyer_id,
        quantity,
        shipping_address: None,
        notes: None,
    }
}

async fn stock(db: &DatabaseConnection, item_id: Uuid) -> (i32, i32, ItemStatus) {
    let item = MarketplaceItemRepository::new(db)
        .find_by_id(item_id)
        .await
        .unwrap()
        .unwrap();
    (item.available_slots, item.sold_count, item.status)
}
