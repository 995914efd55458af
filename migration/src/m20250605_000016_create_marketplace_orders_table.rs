use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250601_000001_create_users_table::User,
    m20250605_000013_create_marketplace_items_table::MarketplaceItem,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MarketplaceOrder::Table)
                    .if_not_exists()
                    .col(pk_uuid(MarketplaceOrder::Id))
                    .col(uuid(MarketplaceOrder::ItemId))
                    .col(uuid(MarketplaceOrder::BuyerId))
                    .col(uuid(MarketplaceOrder::SellerId))
                    .col(integer(MarketplaceOrder::Quantity))
                    .col(double(MarketplaceOrder::UnitPrice))
                    .col(double(MarketplaceOrder::ShippingCost).default(0.0))
                    .col(double(MarketplaceOrder::TotalPrice))
                    .col(string(MarketplaceOrder::Status).default("pending"))
                    .col(json_null(MarketplaceOrder::ShippingAddress))
                    .col(text_null(MarketplaceOrder::Notes))
                    .col(
                        timestamp_with_time_zone(MarketplaceOrder::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MarketplaceOrder::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_orders_item_id")
                            .from(MarketplaceOrder::Table, MarketplaceOrder::ItemId)
                            .to(MarketplaceItem::Table, MarketplaceItem::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_orders_buyer_id")
                            .from(MarketplaceOrder::Table, MarketplaceOrder::BuyerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_orders_seller_id")
                            .from(MarketplaceOrder::Table, MarketplaceOrder::SellerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MarketplaceOrder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MarketplaceOrder {
    #[sea_orm(iden = "marketplace_orders")]
    Table,
    Id,
    ItemId,
    BuyerId,
    SellerId,
    Quantity,
    UnitPrice,
    ShippingCost,
    TotalPrice,
    Status,
    ShippingAddress,
    Notes,
    CreatedAt,
    UpdatedAt,
}
