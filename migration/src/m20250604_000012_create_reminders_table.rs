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
                    .table(Reminder::Table)
                    .if_not_exists()
                    .col(pk_uuid(Reminder::Id))
                    .col(uuid(Reminder::UserId))
                    .col(string_len(Reminder::Title, 200))
                    .col(text_null(Reminder::Description))
                    .col(string(Reminder::ReminderType))
                    .col(string(Reminder::Frequency))
                    .col(string_len(Reminder::Time, 5))
                    .col(date_null(Reminder::StartDate))
                    .col(date_null(Reminder::EndDate))
                    .col(json_null(Reminder::CustomSchedule))
                    .col(string(Reminder::Status).default("active"))
                    .col(boolean(Reminder::IsNotificationEnabled).default(true))
                    .col(json_null(Reminder::Metadata))
                    .col(
                        timestamp_with_time_zone(Reminder::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Reminder::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminders_user_id")
                            .from(Reminder::Table, Reminder::UserId)
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
                    .name("idx_reminders_user_id")
                    .table(Reminder::Table)
                    .col(Reminder::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reminder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reminder {
    #[sea_orm(iden = "reminders")]
    Table,
    Id,
    UserId,
    Title,
    Description,
    ReminderType,
    Frequency,
    Time,
    StartDate,
    EndDate,
    CustomSchedule,
    Status,
    IsNotificationEnabled,
    Metadata,
    CreatedAt,
    UpdatedAt,
}
