use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000001_create_users_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MarketplaceItem::Table)
                    .if_not_exists()
                    .col(pk_uuid(MarketplaceItem::Id))
                    .col(uuid(MarketplaceItem::UserId))
                    .col(string_len(MarketplaceItem::Title, 255))
                    .col(text(MarketplaceItem::Description))
                    .col(string(MarketplaceItem::Category))
                    .col(double(MarketplaceItem::Price))
                    .col(integer(MarketplaceItem::AvailableSlots).default(1))
                    .col(integer(MarketplaceItem::SoldCount).default(0))
                    .col(string(MarketplaceItem::Condition).default("new"))
                    .col(string(MarketplaceItem::Status).default("active"))
                    .col(json(MarketplaceItem::Images))
                    .col(json(MarketplaceItem::Tags))
                    .col(string_null(MarketplaceItem::Location))
                    .col(boolean(MarketplaceItem::IsDigital).default(false))
                    .col(boolean(MarketplaceItem::IsFeatured).default(false))
                    .col(json_null(MarketplaceItem::Specifications))
                    .col(string_null(MarketplaceItem::Brand))
                    .col(text_null(MarketplaceItem::ShippingInfo))
                    .col(double(MarketplaceItem::ShippingCost).default(0.0))
                    .col(integer(MarketplaceItem::ViewsCount).default(0))
                    .col(integer(MarketplaceItem::FavoritesCount).default(0))
                    .col(double(MarketplaceItem::Rating).default(0.0))
                    .col(integer(MarketplaceItem::ReviewsCount).default(0))
                    .col(
                        timestamp_with_time_zone(MarketplaceItem::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MarketplaceItem::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_items_user_id")
                            .from(MarketplaceItem::Table, MarketplaceItem::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_marketplace_items_category")
                    .table(MarketplaceItem::Table)
                    .col(MarketplaceItem::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MarketplaceItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MarketplaceItem {
    #[sea_orm(iden = "marketplace_items")]
    Table,
    Id,
    UserId,
    Title,
    Description,
    Category,
    Price,
    AvailableSlots,
    SoldCount,
    Condition,
    Status,
    Images,
    Tags,
    Location,
    IsDigital,
    IsFeatured,
    Specifications,
    Brand,
    ShippingInfo,
    ShippingCost,
    ViewsCount,
    FavoritesCount,
    Rating,
    ReviewsCount,
    CreatedAt,
    UpdatedAt,
}
