use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250601_000001_create_users_table::User,
    m20250603_000008_create_challenges_table::Challenge,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChallengeProgress::Table)
                    .if_not_exists()
                    .col(pk_uuid(ChallengeProgress::Id))
                    .col(uuid(ChallengeProgress::ChallengeId))
                    .col(uuid(ChallengeProgress::UserId))
                    .col(date(ChallengeProgress::Date))
                    .col(json(ChallengeProgress::ProgressData))
                    .col(double(ChallengeProgress::CompletionPercentage).default(0.0))
                    .col(boolean(ChallengeProgress::IsCompleted).default(false))
                    .col(text_null(ChallengeProgress::Notes))
                    .col(
                        timestamp_with_time_zone(ChallengeProgress::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(ChallengeProgress::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenge_progress_challenge_id")
                            .from(ChallengeProgress::Table, ChallengeProgress::ChallengeId)
                            .to(Challenge::Table, Challenge::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenge_progress_user_id")
                            .from(ChallengeProgress::Table, ChallengeProgress::UserId)
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
                    .name("idx_challenge_progress_challenge_user_date")
                    .table(ChallengeProgress::Table)
                    .col(ChallengeProgress::ChallengeId)
                    .col(ChallengeProgress::UserId)
                    .col(ChallengeProgress::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChallengeProgress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChallengeProgress {
    #[sea_orm(iden = "challenge_progress")]
    Table,
    Id,
    ChallengeId,
    UserId,
    Date,
    ProgressData,
    CompletionPercentage,
    IsCompleted,
    Notes,
    CreatedAt,
    UpdatedAt,
}
