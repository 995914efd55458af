use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250601_000001_create_users_table::User,
    m20250602_000006_create_groups_table::Group,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupMembership::Table)
                    .if_not_exists()
                    .col(pk_uuid(GroupMembership::Id))
                    .col(uuid(GroupMembership::GroupId))
                    .col(uuid(GroupMembership::UserId))
                    .col(string(GroupMembership::Role).default("member"))
                    .col(string(GroupMembership::Status).default("pending"))
                    .col(text_null(GroupMembership::JoinMessage))
                    .col(timestamp_with_time_zone_null(GroupMembership::JoinedAt))
                    .col(
                        timestamp_with_time_zone(GroupMembership::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(GroupMembership::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_memberships_group_id")
                            .from(GroupMembership::Table, GroupMembership::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_memberships_user_id")
                            .from(GroupMembership::Table, GroupMembership::UserId)
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
                    .name("idx_group_memberships_group_user")
                    .table(GroupMembership::Table)
                    .col(GroupMembership::GroupId)
                    .col(GroupMembership::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupMembership::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GroupMembership {
    #[sea_orm(iden = "group_memberships")]
    Table,
    Id,
    GroupId,
    UserId,
    Role,
    Status,
    JoinMessage,
    JoinedAt,
    CreatedAt,
    UpdatedAt,
}
