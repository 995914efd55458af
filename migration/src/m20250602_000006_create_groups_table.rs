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
                    .table(Group::Table)
                    .if_not_exists()
                    .col(pk_uuid(Group::Id))
                    .col(uuid(Group::OwnerId))
                    .col(string_len(Group::Name, 200))
                    .col(text_null(Group::Description))
                    .col(string(Group::GroupType).default("public"))
                    .col(string(Group::Category).default("general"))
                    .col(text_null(Group::ImageUrl))
                    .col(text_null(Group::CoverImageUrl))
                    .col(json(Group::Rules))
                    .col(json(Group::Tags))
                    .col(json_null(Group::Settings))
                    .col(integer(Group::MemberCount).default(0))
                    .col(integer_null(Group::MaxMembers))
                    .col(boolean(Group::IsActive).default(true))
                    .col(boolean(Group::IsFeatured).default(false))
                    .col(
                        timestamp_with_time_zone(Group::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Group::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_groups_owner_id")
                            .from(Group::Table, Group::OwnerId)
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
            .drop_table(Table::drop().table(Group::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Group {
    #[sea_orm(iden = "groups")]
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    GroupType,
    Category,
    ImageUrl,
    CoverImageUrl,
    Rules,
    Tags,
    Settings,
    MemberCount,
    MaxMembers,
    IsActive,
    IsFeatured,
    CreatedAt,
    UpdatedAt,
}
