//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses entity definitions and query helpers in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod author_service;
pub mod book_service;
mod relation;
#[cfg(test)]
pub mod test_support;
