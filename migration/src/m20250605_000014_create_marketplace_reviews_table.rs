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
                    .table(MarketplaceReview::Table)
                    .if_not_exists()
                    .col(pk_uuid(MarketplaceReview::Id))
                    .col(uuid(MarketplaceReview::ItemId))
                    .col(uuid(MarketplaceReview::UserId))
                    .col(integer(MarketplaceReview::Rating))
                    .col(text_null(MarketplaceReview::Comment))
                    .col(
                        timestamp_with_time_zone(MarketplaceReview::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MarketplaceReview::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_reviews_item_id")
                            .from(MarketplaceReview::Table, MarketplaceReview::ItemId)
                            .to(MarketplaceItem::Table, MarketplaceItem::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_reviews_user_id")
                            .from(MarketplaceReview::Table, MarketplaceReview::UserId)
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
                    .name("idx_marketplace_reviews_item_user")
                    .table(MarketplaceReview::Table)
                    .col(MarketplaceReview::ItemId)
                    .col(MarketplaceReview::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MarketplaceReview::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MarketplaceReview {
    #[sea_orm(iden = "marketplace_reviews")]
    Table,
    Id,
    ItemId,
    UserId,
    Rating,
    Comment,
    CreatedAt,
    UpdatedAt,
}
