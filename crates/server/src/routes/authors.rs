use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::books::BookResponse;
use super::ServerState;
use crate::errors::{ApiError, ErrorDetail};
use service::author_service;

#[derive(Debug, Deserialize)]
pub struct AuthorPayload {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<models::author::Model> for AuthorResponse {
    fn from(m: models::author::Model) -> Self {
        Self { id: m.id, name: m.name, email: m.email }
    }
}

fn is_blank(v: &Option<String>) -> bool {
    match v {
        Some(s) => s.trim().is_empty(),
        None => true,
    }
}

impl AuthorPayload {
    /// Field-by-field checks in payload order, one detail per violated rule.
    /// A whitespace-only email is both blank and malformed; the empty string
    /// is only blank.
    fn validate(&self) -> Result<(), ApiError> {
        let mut details = Vec::new();
        if is_blank(&self.name) {
            details.push(ErrorDetail::new("name", "must not be blank"));
        }
        if is_blank(&self.email) {
            details.push(ErrorDetail::new("email", "must not be blank"));
        }
        if let Some(email) = self.email.as_deref() {
            if !email.is_empty() && !models::author::email_is_well_formed(email) {
                details.push(ErrorDetail::new("email", "must be a well-formed email address"));
            }
        }
        if details.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(details))
        }
    }
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<AuthorPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    input.validate()?;
    let name = input.name.as_deref().unwrap_or_default();
    let email = input.email.as_deref().unwrap_or_default();
    let created = author_service::create_author(&state.db, name, email).await?;
    info!(id = created.id, email = %created.email, "created author");
    let location = format!("/api/v1/authors/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AuthorResponse::from(created)),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let found = author_service::find_author(&state.db, id).await?;
    Ok(Json(AuthorResponse::from(found)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Result<Json<AuthorPayload>, JsonRejection>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let Json(input) = payload?;
    input.validate()?;
    let name = input.name.as_deref().unwrap_or_default();
    let email = input.email.as_deref().unwrap_or_default();
    let updated = author_service::edit_author(&state.db, id, name, email).await?;
    info!(id = updated.id, "updated author");
    Ok(Json(AuthorResponse::from(updated)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    author_service::delete_author(&state.db, id).await?;
    info!(id = id, "deleted author");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn books(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = author_service::find_author_books(&state.db, id).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

pub async fn link_book(
    State(state): State<ServerState>,
    Path((id, book_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    author_service::add_book_to_author(&state.db, id, book_id).await?;
    info!(author_id = id, book_id = book_id, "linked book to author");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unlink_book(
    State(state): State<ServerState>,
    Path((id, book_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    author_service::remove_book_from_author(&state.db, id, book_id).await?;
    info!(author_id = id, book_id = book_id, "unlinked book from author");
    Ok(StatusCode::NO_CONTENT)
}
