//! Price Configuration Repository
//!
//! Single well-known record: `configuracion:precios_membresias`.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::MembershipPrices;
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

const TABLE: &str = "configuracion";
const RECORD: &str = "precios_membresias";

#[derive(Clone)]
pub struct PriceConfigRepository {
    base: BaseRepository,
}

impl PriceConfigRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Stored prices, `None` when nothing was ever configured
    pub async fn get(&self) -> RepoResult<Option<MembershipPrices>> {
        let prices: Option<MembershipPrices> = self.base.db().select((TABLE, RECORD)).await?;
        Ok(prices)
    }

    /// Replace the whole price record
    pub async fn upsert(&self, mut prices: MembershipPrices) -> RepoResult<MembershipPrices> {
        prices.updated_at = Some(time::now_millis());

        let stored: Option<MembershipPrices> = self
            .base
            .db()
            .upsert((TABLE, RECORD))
            .content(prices)
            .await?;
        stored.ok_or_else(|| RepoError::Database("Failed to store price config".to_string()))
    }
}
