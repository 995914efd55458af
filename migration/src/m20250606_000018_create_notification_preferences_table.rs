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
                    .table(NotificationPreference::Table)
                    .if_not_exists()
                    .col(pk_uuid(NotificationPreference::Id))
                    .col(uuid(NotificationPreference::UserId))
                    .col(string(NotificationPreference::NotificationType))
                    .col(string(NotificationPreference::DeliveryChannel))
                    .col(boolean(NotificationPreference::IsEnabled).default(true))
                    .col(json_null(NotificationPreference::Settings))
                    .col(
                        timestamp_with_time_zone(NotificationPreference::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(NotificationPreference::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_preferences_user_id")
                            .from(NotificationPreference::Table, NotificationPreference::UserId)
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
                    .name("idx_notification_preferences_user_type_channel")
                    .table(NotificationPreference::Table)
                    .col(NotificationPreference::UserId)
                    .col(NotificationPreference::NotificationType)
                    .col(NotificationPreference::DeliveryChannel)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationPreference::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum NotificationPreference {
    #[sea_orm(iden = "notification_preferences")]
    Table,
    Id,
    UserId,
    NotificationType,
    DeliveryChannel,
    IsEnabled,
    Settings,
    CreatedAt,
    UpdatedAt,
}
