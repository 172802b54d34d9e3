use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set, SqlErr,
    TransactionTrait,
};

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::relation;
use models::{author, book};

/// Create a book; title and ISBN must both be unused. A book violating both
/// uniqueness rules reports the title conflict.
pub async fn create_book(
    db: &DatabaseConnection,
    title: &str,
    description: &str,
    isbn: &str,
    published: bool,
) -> Result<book::Model, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    if book::title_taken(&txn, title).await.map_err(|e| ServiceError::Db(e.to_string()))? {
        return Err(ServiceError::title_taken(title));
    }
    if book::isbn_taken(&txn, isbn).await.map_err(|e| ServiceError::Db(e.to_string()))? {
        return Err(ServiceError::isbn_taken(isbn));
    }
    let now = Utc::now().into();
    let am = book::ActiveModel {
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        isbn: Set(isbn.to_string()),
        published: Set(published),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = am.insert(&txn).await.map_err(|e| map_book_unique(e, title, isbn))?;
    txn.commit().await.map_err(|e| map_book_unique(e, title, isbn))?;
    Ok(created)
}

/// Get a book by id.
pub async fn find_book(db: &DatabaseConnection, id: i64) -> Result<book::Model, ServiceError> {
    book::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::book_not_found(id))
}

/// List books as a stable id-ordered page plus the total row count.
pub async fn find_all_books(
    db: &DatabaseConnection,
    opts: Pagination,
) -> Result<(Vec<book::Model>, u64), ServiceError> {
    use sea_orm::PaginatorTrait;
    let (page_idx, size) = opts.normalize();
    let paginator = book::Entity::find()
        .order_by_asc(book::Column::Id)
        .paginate(db, size);
    let total = paginator.num_items().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let rows = paginator.fetch_page(page_idx).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok((rows, total))
}

/// Replace all book fields. Keeping the stored title or ISBN never conflicts
/// with itself; the title conflict wins when both would fire.
pub async fn edit_book(
    db: &DatabaseConnection,
    id: i64,
    title: &str,
    description: &str,
    isbn: &str,
    published: bool,
) -> Result<book::Model, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let current = book::Entity::find_by_id(id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::book_not_found(id))?;
    if title != current.title
        && book::title_taken(&txn, title).await.map_err(|e| ServiceError::Db(e.to_string()))?
    {
        return Err(ServiceError::title_taken(title));
    }
    if isbn != current.isbn
        && book::isbn_taken(&txn, isbn).await.map_err(|e| ServiceError::Db(e.to_string()))?
    {
        return Err(ServiceError::isbn_taken(isbn));
    }
    let mut am: book::ActiveModel = current.into();
    am.title = Set(title.to_string());
    am.description = Set(description.to_string());
    am.isbn = Set(isbn.to_string());
    am.published = Set(published);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&txn).await.map_err(|e| map_book_unique(e, title, isbn))?;
    txn.commit().await.map_err(|e| map_book_unique(e, title, isbn))?;
    Ok(updated)
}

/// Delete a book; join rows cascade, so linked authors drop the book.
pub async fn delete_book(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let current = book::Entity::find_by_id(id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::book_not_found(id))?;
    current.delete(&txn).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// List the authors linked to a book, id-ordered for determinism.
pub async fn find_book_authors(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Vec<author::Model>, ServiceError> {
    let found = book::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::book_not_found(id))?;
    let authors = found
        .find_related(author::Entity)
        .order_by_asc(author::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(authors)
}

/// Link an author to a book. Linking an already linked pair is a no-op.
pub async fn add_author_to_book(
    db: &DatabaseConnection,
    book_id: i64,
    author_id: i64,
) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    ensure_book_then_author(&txn, book_id, author_id).await?;
    relation::link_pair(&txn, book_id, author_id).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// Unlink an author from a book. Unlinking an unlinked pair is a no-op.
pub async fn remove_author_from_book(
    db: &DatabaseConnection,
    book_id: i64,
    author_id: i64,
) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    ensure_book_then_author(&txn, book_id, author_id).await?;
    relation::unlink_pair(&txn, book_id, author_id).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

// On the book-side routes the book is checked before the author.
async fn ensure_book_then_author<C: sea_orm::ConnectionTrait>(
    db: &C,
    book_id: i64,
    author_id: i64,
) -> Result<(), ServiceError> {
    if book::Entity::find_by_id(book_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .is_none()
    {
        return Err(ServiceError::book_not_found(book_id));
    }
    if author::Entity::find_by_id(author_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .is_none()
    {
        return Err(ServiceError::author_not_found(author_id));
    }
    Ok(())
}

// Title and ISBN pre-checks race like the email one; the named unique index
// tells us which field to report, title taking precedence.
fn map_book_unique(e: sea_orm::DbErr, title: &str, isbn: &str) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("uniq_book_title") => {
            tracing::warn!(title = %title, "title unique index tripped after pre-check");
            ServiceError::title_taken(title)
        }
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("uniq_book_isbn") => {
            tracing::warn!(isbn = %isbn, "isbn unique index tripped after pre-check");
            ServiceError::isbn_taken(isbn)
        }
        _ => ServiceError::Db(e.to_string()),
    }
}
