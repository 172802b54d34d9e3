use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::authors::AuthorResponse;
use super::ServerState;
use crate::errors::{ApiError, ErrorDetail};
use service::book_service;
use service::pagination::Pagination;

#[derive(Debug, Deserialize)]
pub struct BookPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub isbn: String,
    pub published: bool,
}

impl From<models::book::Model> for BookResponse {
    fn from(m: models::book::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            isbn: m.isbn,
            published: m.published,
        }
    }
}

fn is_blank(v: &Option<String>) -> bool {
    match v {
        Some(s) => s.trim().is_empty(),
        None => true,
    }
}

impl BookPayload {
    /// Field-by-field checks in payload order, one detail per violated rule.
    /// Any present ISBN, the empty string included, is also checked against
    /// the checksum; an absent one is only blank.
    fn validate(&self) -> Result<(), ApiError> {
        let mut details = Vec::new();
        if is_blank(&self.title) {
            details.push(ErrorDetail::new("title", "must not be blank"));
        }
        if is_blank(&self.description) {
            details.push(ErrorDetail::new("description", "must not be blank"));
        }
        if is_blank(&self.isbn) {
            details.push(ErrorDetail::new("isbn", "must not be blank"));
        }
        if let Some(isbn) = self.isbn.as_deref() {
            if !models::book::isbn_is_valid(isbn) {
                details.push(ErrorDetail::new("isbn", "invalid ISBN"));
            }
        }
        if self.published.is_none() {
            details.push(ErrorDetail::new("published", "must not be null"));
        }
        if details.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(details))
        }
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let opts = Pagination {
        page: q.page.unwrap_or(1),
        size: q.size.unwrap_or(20),
    };
    let (rows, total) = book_service::find_all_books(&state.db, opts).await?;
    info!(count = rows.len(), total = total, "list books");
    let body: Vec<BookResponse> = rows.into_iter().map(BookResponse::from).collect();
    Ok(([("X-Total-Count", total.to_string())], Json(body)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    input.validate()?;
    let title = input.title.as_deref().unwrap_or_default();
    let description = input.description.as_deref().unwrap_or_default();
    let isbn = input.isbn.as_deref().unwrap_or_default();
    let published = input.published.unwrap_or_default();
    let created =
        book_service::create_book(&state.db, title, description, isbn, published).await?;
    info!(id = created.id, title = %created.title, "created book");
    let location = format!("/api/v1/books/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookResponse::from(created)),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let found = book_service::find_book(&state.db, id).await?;
    Ok(Json(BookResponse::from(found)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let Json(input) = payload?;
    input.validate()?;
    let title = input.title.as_deref().unwrap_or_default();
    let description = input.description.as_deref().unwrap_or_default();
    let isbn = input.isbn.as_deref().unwrap_or_default();
    let published = input.published.unwrap_or_default();
    let updated =
        book_service::edit_book(&state.db, id, title, description, isbn, published).await?;
    info!(id = updated.id, "updated book");
    Ok(Json(BookResponse::from(updated)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    book_service::delete_book(&state.db, id).await?;
    info!(id = id, "deleted book");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn authors(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<AuthorResponse>>, ApiError> {
    let authors = book_service::find_book_authors(&state.db, id).await?;
    Ok(Json(authors.into_iter().map(AuthorResponse::from).collect()))
}

pub async fn link_author(
    State(state): State<ServerState>,
    Path((id, author_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    book_service::add_author_to_book(&state.db, id, author_id).await?;
    info!(book_id = id, author_id = author_id, "linked author to book");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unlink_author(
    State(state): State<ServerState>,
    Path((id, author_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    book_service::remove_author_from_book(&state.db, id, author_id).await?;
    info!(book_id = id, author_id = author_id, "unlinked author from book");
    Ok(StatusCode::NO_CONTENT)
}
