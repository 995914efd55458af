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
                    .table(DashboardSettings::Table)
                    .if_not_exists()
                    .col(pk_uuid(DashboardSettings::Id))
                    .col(uuid_uniq(DashboardSettings::UserId))
                    .col(json(DashboardSettings::WidgetPreferences))
                    .col(json(DashboardSettings::ChartPreferences))
                    .col(json(DashboardSettings::NotificationPreferences))
                    .col(string(DashboardSettings::Theme).default("light"))
                    .col(string(DashboardSettings::UnitsPreference).default("metric"))
                    .col(
                        timestamp_with_time_zone(DashboardSettings::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(DashboardSettings::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dashboard_settings_user_id")
                            .from(DashboardSettings::Table, DashboardSettings::UserId)
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
            .drop_table(Table::drop().table(DashboardSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DashboardSettings {
    #[sea_orm(iden = "dashboard_settings")]
    Table,
    Id,
    UserId,
    WidgetPreferences,
    ChartPreferences,
    NotificationPreferences,
    Theme,
    UnitsPreference,
    CreatedAt,
    UpdatedAt,
}
