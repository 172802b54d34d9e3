use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn author_not_found(id: i64) -> Self {
        Self::NotFound(format!("Author with given id \"{}\" doesn't exists", id))
    }

    pub fn book_not_found(id: i64) -> Self {
        Self::NotFound(format!("Book with given id \"{}\" doesn't exists", id))
    }

    pub fn email_taken(email: &str) -> Self {
        Self::Conflict(format!("Email \"{}\" already in use", email))
    }

    pub fn title_taken(title: &str) -> Self {
        Self::Conflict(format!("Book with given title \"{}\" already exists", title))
    }

    pub fn isbn_taken(isbn: &str) -> Self {
        Self::Conflict(format!("Book with given ISBN \"{}\" already exists", isbn))
    }
}
