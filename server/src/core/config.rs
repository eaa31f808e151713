//! Server configuration from environment variables

use std::env;
use std::path::PathBuf;

use chrono_tz::Tz;

use crate::utils::{AppError, AppResult};

const DEFAULT_HTTP_PORT: u16 = 3000;
const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Argentina::Buenos_Aires;
const DEFAULT_CACHE_TTL_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for the database and log files
    pub work_dir: PathBuf,
    pub http_port: u16,
    pub environment: String,
    /// Business timezone; all calendar dates resolve against it
    pub timezone: Tz,
    pub dashboard_cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let work_dir = env::var("WORK_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let http_port = env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);

        let environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let timezone = env::var("TIMEZONE")
            .ok()
            .and_then(|tz| tz.parse().ok())
            .unwrap_or(DEFAULT_TIMEZONE);

        let dashboard_cache_ttl_secs = env::var("DASHBOARD_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        Self {
            work_dir,
            http_port,
            environment,
            timezone,
            dashboard_cache_ttl_secs,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        !self.is_production()
    }

    pub fn database_dir(&self) -> PathBuf {
        self.work_dir.join("db")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.work_dir.join("logs")
    }

    /// Create the work directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> AppResult<()> {
        for dir in [&self.work_dir, &self.database_dir(), &self.logs_dir()] {
            std::fs::create_dir_all(dir).map_err(|e| {
                AppError::Internal(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("./data"),
            http_port: DEFAULT_HTTP_PORT,
            environment: "development".to_string(),
            timezone: DEFAULT_TIMEZONE,
            dashboard_cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_paths() {
        let config = Config::default();
        assert_eq!(config.database_dir(), PathBuf::from("./data/db"));
        assert_eq!(config.logs_dir(), PathBuf::from("./data/logs"));
        assert!(config.is_development());
    }
}
