use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set, SqlErr,
    TransactionTrait,
};

use crate::errors::ServiceError;
use crate::relation;
use models::{author, book};

/// Create an author; the email must not be in use by any existing author.
pub async fn create_author(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> Result<author::Model, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    if author::email_taken(&txn, email).await.map_err(|e| ServiceError::Db(e.to_string()))? {
        return Err(ServiceError::email_taken(email));
    }
    let now = Utc::now().into();
    let am = author::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = am.insert(&txn).await.map_err(|e| map_email_unique(e, email))?;
    txn.commit().await.map_err(|e| map_email_unique(e, email))?;
    Ok(created)
}

/// Get an author by id.
pub async fn find_author(db: &DatabaseConnection, id: i64) -> Result<author::Model, ServiceError> {
    author::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::author_not_found(id))
}

/// Replace an author's name and email. Keeping the stored email never
/// conflicts with itself; associations are untouched.
pub async fn edit_author(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
    email: &str,
) -> Result<author::Model, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let current = author::Entity::find_by_id(id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::author_not_found(id))?;
    if email != current.email
        && author::email_taken(&txn, email).await.map_err(|e| ServiceError::Db(e.to_string()))?
    {
        return Err(ServiceError::email_taken(email));
    }
    let mut am: author::ActiveModel = current.into();
    am.name = Set(name.to_string());
    am.email = Set(email.to_string());
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&txn).await.map_err(|e| map_email_unique(e, email))?;
    txn.commit().await.map_err(|e| map_email_unique(e, email))?;
    Ok(updated)
}

/// Delete an author; join rows cascade, so linked books drop the author.
pub async fn delete_author(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let current = author::Entity::find_by_id(id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::author_not_found(id))?;
    current.delete(&txn).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// List the books linked to an author, id-ordered for determinism.
pub async fn find_author_books(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Vec<book::Model>, ServiceError> {
    let found = author::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::author_not_found(id))?;
    let books = found
        .find_related(book::Entity)
        .order_by_asc(book::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(books)
}

/// Link a book to an author. Linking an already linked pair is a no-op.
pub async fn add_book_to_author(
    db: &DatabaseConnection,
    author_id: i64,
    book_id: i64,
) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    ensure_author_then_book(&txn, author_id, book_id).await?;
    relation::link_pair(&txn, book_id, author_id).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// Unlink a book from an author. Unlinking an unlinked pair is a no-op.
pub async fn remove_book_from_author(
    db: &DatabaseConnection,
    author_id: i64,
    book_id: i64,
) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    ensure_author_then_book(&txn, author_id, book_id).await?;
    relation::unlink_pair(&txn, book_id, author_id).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

// On the author-side routes the author is checked before the book.
async fn ensure_author_then_book<C: sea_orm::ConnectionTrait>(
    db: &C,
    author_id: i64,
    book_id: i64,
) -> Result<(), ServiceError> {
    if author::Entity::find_by_id(author_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .is_none()
    {
        return Err(ServiceError::author_not_found(author_id));
    }
    if book::Entity::find_by_id(book_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .is_none()
    {
        return Err(ServiceError::book_not_found(book_id));
    }
    Ok(())
}

// Two writers can pass the email pre-check together; the unique index is the
// arbiter and its violation reports the same conflict.
fn map_email_unique(e: sea_orm::DbErr, email: &str) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("uniq_author_email") => {
            tracing::warn!(email = %email, "email unique index tripped after pre-check");
            ServiceError::email_taken(email)
        }
        _ => ServiceError::Db(e.to_string()),
    }
}
