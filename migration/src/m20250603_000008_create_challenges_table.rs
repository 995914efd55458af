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
                    .table(Challenge::Table)
                    .if_not_exists()
                    .col(pk_uuid(Challenge::Id))
                    .col(uuid(Challenge::CreatorId))
                    .col(string_len(Challenge::Title, 200))
                    .col(text(Challenge::Description))
                    .col(string(Challenge::ChallengeType))
                    .col(string(Challenge::Difficulty))
                    .col(json(Challenge::Goal))
                    .col(integer(Challenge::DurationDays))
                    .col(date(Challenge::StartDate))
                    .col(date(Challenge::EndDate))
                    .col(string(Challenge::Status).default("draft"))
                    .col(boolean(Challenge::IsPublic).default(true))
                    .col(integer(Challenge::MaxParticipants).default(0))
                    .col(json_null(Challenge::Rewards))
                    .col(json_null(Challenge::Rules))
                    .col(text_null(Challenge::ImageUrl))
                    .col(
                        timestamp_with_time_zone(Challenge::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Challenge::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenges_creator_id")
                            .from(Challenge::Table, Challenge::CreatorId)
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
            .drop_table(Table::drop().table(Challenge::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Challenge {
    #[sea_orm(iden = "challenges")]
    Table,
    Id,
    CreatorId,
    Title,
    Description,
    ChallengeType,
    Difficulty,
    Goal,
    DurationDays,
    StartDate,
    EndDate,
    Status,
    IsPublic,
    MaxParticipants,
    Rewards,
    Rules,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
