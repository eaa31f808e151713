//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend). One handle is opened at startup
//! and cloned into every repository; cloning is cheap and keeps a single
//! underlying connection for the whole process.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::engine::local::{Db, RocksDb};
use surrealdb::Surreal;

use crate::utils::AppError;

const NAMESPACE: &str = "barber";
const DATABASE: &str = "console";

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `path` and select ns/db
    pub async fn new(path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {}", e)))?;

        tracing::info!("Database connection established (SurrealDB RocksDB)");

        Ok(Self { db })
    }
}
