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
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_uuid(Notification::Id))
                    .col(uuid(Notification::UserId))
                    .col(uuid_null(Notification::TriggeredByUserId))
                    .col(string_len(Notification::Title, 200))
                    .col(text(Notification::Message))
                    .col(string(Notification::NotificationType))
                    .col(string(Notification::Priority).default("medium"))
                    .col(json_null(Notification::Data))
                    .col(string_len_null(Notification::ActionUrl, 500))
                    .col(string_null(Notification::ActionText))
                    .col(text_null(Notification::ImageUrl))
                    .col(string_null(Notification::Category))
                    .col(timestamp_with_time_zone_null(Notification::ReadAt))
                    .col(timestamp_with_time_zone_null(Notification::DeliveredAt))
                    .col(timestamp_with_time_zone_null(Notification::ClickedAt))
                    .col(timestamp_with_time_zone_null(Notification::ScheduledFor))
                    .col(boolean(Notification::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Notification::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Notification::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_user_id")
                            .from(Notification::Table, Notification::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_triggered_by_user_id")
                            .from(Notification::Table, Notification::TriggeredByUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_id")
                    .table(Notification::Table)
                    .col(Notification::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Notification {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    UserId,
    TriggeredByUserId,
    Title,
    Message,
    NotificationType,
    Priority,
    Data,
    ActionUrl,
    ActionText,
    ImageUrl,
    Category,
    ReadAt,
    DeliveredAt,
    ClickedAt,
    ScheduledFor,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
