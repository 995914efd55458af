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
                    .table(Post::Table)
                    .if_not_exists()
                    .col(pk_uuid(Post::Id))
                    .col(uuid(Post::UserId))
                    .col(text(Post::Content))
                    .col(string(Post::PostType).default("text"))
                    .col(string(Post::Visibility).default("public"))
                    .col(json(Post::MediaUrls))
                    .col(json(Post::Tags))
                    .col(json_null(Post::Metadata))
                    .col(integer(Post::LikesCount).default(0))
                    .col(integer(Post::CommentsCount).default(0))
                    .col(integer(Post::SharesCount).default(0))
                    .col(boolean(Post::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Post::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Post::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_user_id")
                            .from(Post::Table, Post::UserId)
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
                    .name("idx_posts_user_id")
                    .table(Post::Table)
                    .col(Post::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Post {
    #[sea_orm(iden = "posts")]
    Table,
    Id,
    UserId,
    Content,
    PostType,
    Visibility,
    MediaUrls,
    Tags,
    Metadata,
    LikesCount,
    CommentsCount,
    SharesCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
