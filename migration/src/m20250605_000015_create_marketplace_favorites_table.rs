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
                    .table(MarketplaceFavorite::Table)
                    .if_not_exists()
                    .col(pk_uuid(MarketplaceFavorite::Id))
                    .col(uuid(MarketplaceFavorite::ItemId))
                    .col(uuid(MarketplaceFavorite::UserId))
                    .col(
                        timestamp_with_time_zone(MarketplaceFavorite::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_favorites_item_id")
                            .from(MarketplaceFavorite::Table, MarketplaceFavorite::ItemId)
                            .to(MarketplaceItem::Table, MarketplaceItem::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_favorites_user_id")
                            .from(MarketplaceFavorite::Table, MarketplaceFavorite::UserId)
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
                    .name("idx_marketplace_favorites_item_user")
                    .table(MarketplaceFavorite::Table)
                    .col(MarketplaceFavorite::ItemId)
                    .col(MarketplaceFavorite::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MarketplaceFavorite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MarketplaceFavorite {
    #[sea_orm(iden = "marketplace_favorites")]
    Table,
    Id,
    ItemId,
    UserId,
    CreatedAt,
}
