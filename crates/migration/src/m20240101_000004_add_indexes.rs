use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Author: unique email
        manager
            .create_index(
                Index::create()
                    .name("uniq_author_email")
                    .table(Author::Table)
                    .col(Author::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Book: unique title and unique isbn
        manager
            .create_index(
                Index::create()
                    .name("uniq_book_title")
                    .table(Book::Table)
                    .col(Book::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq_book_isbn")
                    .table(Book::Table)
                    .col(Book::Isbn)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // BookAuthor: reverse lookups by author (the PK already covers book_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_book_author_author")
                    .table(BookAuthor::Table)
                    .col(BookAuthor::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_author_email").table(Author::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_book_title").table(Book::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_book_isbn").table(Book::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_book_author_author").table(BookAuthor::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Author { Table, Email }

#[derive(DeriveIden)]
enum Book { Table, Title, Isbn }

#[derive(DeriveIden)]
enum BookAuthor { Table, AuthorId }
