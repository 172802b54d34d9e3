//! Join-row plumbing shared by the author and book services.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set, SqlErr};

use crate::errors::ServiceError;
use models::book_author;

/// Insert the pair row unless it already exists. Runs on the caller's
/// transaction so the existence check and the insert commit together.
pub(crate) async fn link_pair<C: ConnectionTrait>(
    db: &C,
    book_id: i64,
    author_id: i64,
) -> Result<(), ServiceError> {
    let existing = book_author::Entity::find_by_id((book_id, author_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if existing.is_some() {
        return Ok(());
    }
    let am = book_author::ActiveModel {
        book_id: Set(book_id),
        author_id: Set(author_id),
        created_at: Set(Utc::now().into()),
    };
    match am.insert(db).await {
        Ok(_) => Ok(()),
        Err(e) => match e.sql_err() {
            // lost a race to an identical link; the pair exists either way
            Some(SqlErr::UniqueConstraintViolation(_)) => Ok(()),
            _ => Err(ServiceError::Db(e.to_string())),
        },
    }
}

/// Delete the pair row; deleting an absent pair is a no-op.
pub(crate) async fn unlink_pair<C: ConnectionTrait>(
    db: &C,
    book_id: i64,
    author_id: i64,
) -> Result<(), ServiceError> {
    book_author::Entity::delete_by_id((book_id, author_id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}
