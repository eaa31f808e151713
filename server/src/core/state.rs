//! Shared server state

use std::sync::Arc;
use std::time::Duration;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::core::config::Config;
use crate::db::DbService;
use crate::services::{DashboardService, PricingService};
use crate::utils::AppResult;

/// State shared by every request handler. The dashboard service is
/// behind an `Arc` so all clones share one cache.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub dashboard: Arc<DashboardService>,
    pub pricing: Arc<PricingService>,
}

impl ServerState {
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config.ensure_work_dir_structure()?;

        let db = DbService::new(&config.database_dir()).await?;
        let dashboard = Arc::new(DashboardService::new(
            db.db.clone(),
            config.timezone,
            Duration::from_secs(config.dashboard_cache_ttl_secs),
        ));
        let pricing = Arc::new(PricingService::new(db.db.clone()));

        Ok(Self {
            config: config.clone(),
            db,
            dashboard,
            pricing,
        })
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.db.clone()
    }
}
