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
                    .table(HealthLog::Table)
                    .if_not_exists()
                    .col(pk_uuid(HealthLog::Id))
                    .col(uuid(HealthLog::UserId))
                    .col(date(HealthLog::Date))
                    .col(integer_null(HealthLog::Calories))
                    .col(integer_null(HealthLog::Steps))
                    .col(integer_null(HealthLog::HydrationMl))
                    .col(double_null(HealthLog::SleepHours))
                    .col(string_len_null(HealthLog::VitaminSummary, 500))
                    .col(json_null(HealthLog::AdditionalMetrics))
                    .col(
                        timestamp_with_time_zone(HealthLog::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(HealthLog::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_health_logs_user_id")
                            .from(HealthLog::Table, HealthLog::UserId)
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
                    .name("idx_health_logs_user_date")
                    .table(HealthLog::Table)
                    .col(HealthLog::UserId)
                    .col(HealthLog::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HealthLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum HealthLog {
    #[sea_orm(iden = "health_logs")]
    Table,
    Id,
    UserId,
    Date,
    Calories,
    Steps,
    HydrationMl,
    SleepHours,
    VitaminSummary,
    AdditionalMetrics,
    CreatedAt,
    UpdatedAt,
}
