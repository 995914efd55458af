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
                    .table(Analytics::Table)
                    .if_not_exists()
                    .col(pk_uuid(Analytics::Id))
                    .col(uuid(Analytics::UserId))
                    .col(string(Analytics::AnalyticsType))
                    .col(string(Analytics::PeriodType))
                    .col(date(Analytics::PeriodStart))
                    .col(date(Analytics::PeriodEnd))
                    .col(json(Analytics::Metrics))
                    .col(json_null(Analytics::Insights))
                    .col(double_null(Analytics::Score))
                    .col(json_null(Analytics::GoalsProgress))
                    .col(json_null(Analytics::Comparisons))
                    .col(
                        timestamp_with_time_zone(Analytics::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Analytics::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_analytics_user_id")
                            .from(Analytics::Table, Analytics::UserId)
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
                    .name("idx_analytics_user_period_start")
                    .table(Analytics::Table)
                    .col(Analytics::UserId)
                    .col(Analytics::PeriodStart)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Analytics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Analytics {
    #[sea_orm(iden = "analytics")]
    Table,
    Id,
    UserId,
    AnalyticsType,
    PeriodType,
    PeriodStart,
    PeriodEnd,
    Metrics,
    Insights,
    Score,
    GoalsProgress,
    Comparisons,
    CreatedAt,
    UpdatedAt,
}
