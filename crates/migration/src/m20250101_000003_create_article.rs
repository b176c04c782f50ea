//! Create `article` table with FK to `user`.
//!
//! Tags live in a `text[]` column so labels may contain any character.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Article::Table)
                    .if_not_exists()
                    .col(uuid(Article::Id).primary_key())
                    .col(text(Article::Title).not_null())
                    .col(text(Article::Content).not_null())
                    .col(
                        ColumnDef::new(Article::Tags)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(timestamp_with_time_zone(Article::PublishedAt).not_null())
                    .col(uuid(Article::UserId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_user")
                            .from(Article::Table, Article::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Article::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Article { Table, Id, Title, Content, Tags, PublishedAt, UserId }

#[derive(DeriveIden)]
enum User { Table, Id }
