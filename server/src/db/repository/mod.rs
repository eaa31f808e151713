//! Repository Module
//!
//! Collection-scoped CRUD and range/equality queries over SurrealDB.
//! Repositories are the only layer that talks to the store; they stamp
//! `created_at`/`updated_at` at write time and only ever see `i64`
//! millis for dates; all calendar conversion happens in handlers and
//! services.

pub mod client;
pub mod expense;
pub mod income;
pub mod membership;
pub mod price_config;
pub mod product;

// Re-exports
pub use client::ClientRepository;
pub use expense::ExpenseRepository;
pub use income::IncomeRepository;
pub use membership::MembershipRepository;
pub use price_config::PriceConfigRepository;
pub use product::ProductRepository;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Accept both bare keys and full "table:key" identifiers
pub(crate) fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}
