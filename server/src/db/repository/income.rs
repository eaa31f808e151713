//! Income Repository

use super::{strip_table_prefix, BaseRepository, RepoError, RepoResult};
use crate::db::models::Income;
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

const TABLE: &str = "ingreso";

#[derive(Clone)]
pub struct IncomeRepository {
    base: BaseRepository,
}

impl IncomeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Most recent incomes, newest first.
    ///
    /// Fetches ordered and truncates client-side; ORDER BY + LIMIT in one
    /// statement returns wrong rows on the embedded engine.
    pub async fn find_recent(&self, limit: usize) -> RepoResult<Vec<Income>> {
        let mut incomes: Vec<Income> = self
            .base
            .db()
            .query("SELECT * FROM ingreso ORDER BY date DESC")
            .await?
            .take(0)?;
        incomes.truncate(limit);
        Ok(incomes)
    }

    /// Incomes whose date falls in `[start, end)` millis
    pub async fn find_between(&self, start: i64, end: i64) -> RepoResult<Vec<Income>> {
        let incomes: Vec<Income> = self
            .base
            .db()
            .query("SELECT * FROM ingreso WHERE date >= $start AND date < $end")
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(incomes)
    }

    pub async fn create(&self, mut income: Income) -> RepoResult<Income> {
        let now = time::now_millis();
        income.id = None;
        income.created_at = Some(now);
        income.updated_at = Some(now);

        let created: Option<Income> = self.base.db().create(TABLE).content(income).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create income".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Income> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Income {} not found", id)));
        }
        Ok(())
    }
}
