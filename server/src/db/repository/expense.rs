//! Expense Repository

use super::{strip_table_prefix, BaseRepository, RepoError, RepoResult};
use crate::db::models::Expense;
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

const TABLE: &str = "gasto";

#[derive(Clone)]
pub struct ExpenseRepository {
    base: BaseRepository,
}

impl ExpenseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Most recent expenses, newest first (client-side truncate, same
    /// reason as incomes)
    pub async fn find_recent(&self, limit: usize) -> RepoResult<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .base
            .db()
            .query("SELECT * FROM gasto ORDER BY date DESC")
            .await?
            .take(0)?;
        expenses.truncate(limit);
        Ok(expenses)
    }

    /// Expenses whose date falls in `[start, end)` millis
    pub async fn find_between(&self, start: i64, end: i64) -> RepoResult<Vec<Expense>> {
        let expenses: Vec<Expense> = self
            .base
            .db()
            .query("SELECT * FROM gasto WHERE date >= $start AND date < $end")
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(expenses)
    }

    pub async fn create(&self, mut expense: Expense) -> RepoResult<Expense> {
        let now = time::now_millis();
        expense.id = None;
        expense.created_at = Some(now);
        expense.updated_at = Some(now);

        let created: Option<Expense> = self.base.db().create(TABLE).content(expense).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create expense".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Expense> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Expense {} not found", id)));
        }
        Ok(())
    }
}
