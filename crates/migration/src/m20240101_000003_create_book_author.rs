//! Create `book_author` join table with FKs to `book` and `author`.
//!
//! The composite primary key makes one row per pair; cascading deletes keep
//! the relation consistent when either side goes away.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookAuthor::Table)
                    .if_not_exists()
                    .col(big_integer(BookAuthor::BookId).not_null())
                    .col(big_integer(BookAuthor::AuthorId).not_null())
                    .col(timestamp_with_time_zone(BookAuthor::CreatedAt).not_null())
                    .primary_key(
                        Index::create()
                            .col(BookAuthor::BookId)
                            .col(BookAuthor::AuthorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_author_book")
                            .from(BookAuthor::Table, BookAuthor::BookId)
                            .to(Book::Table, Book::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_author_author")
                            .from(BookAuthor::Table, BookAuthor::AuthorId)
                            .to(Author::Table, Author::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BookAuthor::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BookAuthor { Table, BookId, AuthorId, CreatedAt }

#[derive(DeriveIden)]
enum Book { Table, Id }

#[derive(DeriveIden)]
enum Author { Table, Id }
