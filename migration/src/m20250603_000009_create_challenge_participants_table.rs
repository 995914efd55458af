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
                    .table(ChallengeParticipant::Table)
                    .if_not_exists()
                    .col(pk_uuid(ChallengeParticipant::Id))
                    .col(uuid(ChallengeParticipant::ChallengeId))
                    .col(uuid(ChallengeParticipant::UserId))
                    .col(
                        timestamp_with_time_zone(ChallengeParticipant::JoinedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenge_participants_challenge_id")
                            .from(ChallengeParticipant::Table, ChallengeParticipant::ChallengeId)
                            .to(Challenge::Table, Challenge::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenge_participants_user_id")
                            .from(ChallengeParticipant::Table, ChallengeParticipant::UserId)
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
                    .name("idx_challenge_participants_challenge_user")
                    .table(ChallengeParticipant::Table)
                    .col(ChallengeParticipant::ChallengeId)
                    .col(ChallengeParticipant::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChallengeParticipant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChallengeParticipant {
    #[sea_orm(iden = "challenge_participants")]
    Table,
    Id,
    ChallengeId,
    UserId,
    JoinedAt,
}
