use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_uuid(User::Id))
                    .col(string_uniq(User::Email))
                    .col(string_null(User::Name))
                    .col(text_null(User::Bio))
                    .col(text_null(User::ProfileImage))
                    .col(text_null(User::CoverImage))
                    .col(string_null(User::FitnessGoal))
                    .col(json(User::Interests))
                    .col(string_null(User::SupabaseId).unique_key())
                    .col(string(User::AuthSource).default("local"))
                    .col(boolean(User::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    Name,
    Bio,
    ProfileImage,
    CoverImage,
    FitnessGoal,
    Interests,
    SupabaseId,
    AuthSource,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
