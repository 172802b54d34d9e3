//! Create `book` table.
//!
//! Title and ISBN uniqueness live in the index migration as named indexes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Book::Table)
                    .if_not_exists()
                    .col(big_integer(Book::Id).primary_key().auto_increment())
                    .col(string_len(Book::Title, 255).not_null())
                    .col(text(Book::Description).not_null())
                    .col(string_len(Book::Isbn, 32).not_null())
                    .col(boolean(Book::Published).not_null())
                    .col(timestamp_with_time_zone(Book::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Book::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Book::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Book { Table, Id, Title, Description, Isbn, Published, CreatedAt, UpdatedAt }
