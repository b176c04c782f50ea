use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Article: owner lookups and listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_article_user")
                    .table(Article::Table)
                    .col(Article::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_article_published_at")
                    .table(Article::Table)
                    .col(Article::PublishedAt)
                    .to_owned(),
            )
            .await?;

        // Comment: list-by-article in creation order
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_article_create_at")
                    .table(Comment::Table)
                    .col(Comment::ArticleId)
                    .col(Comment::CreateAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_article_user").table(Article::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_article_published_at").table(Article::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comment_article_create_at").table(Comment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Article { Table, UserId, PublishedAt }

#[derive(DeriveIden)]
enum Comment { Table, ArticleId, CreateAt }
