//! Barber Club Console Server
//!
//! Small-business management backend for a barbershop: clients,
//! memberships, product catalog, incomes, expenses, a monthly financial
//! dashboard and Excel report export.
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/       # config, state, HTTP server lifecycle
//! ├── api/        # routes and handlers
//! ├── services/   # status engine, aggregation, pricing, reports
//! ├── db/         # models and repositories (embedded SurrealDB)
//! └── utils/      # errors, logging, time helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____             __
   / __ )____ ______/ /_  ___  _____
  / __  / __ `/ ___/ __ \/ _ \/ ___/
 / /_/ / /_/ / /  / /_/ /  __/ /
/_____/\__,_/_/  /_.___/\___/_/
   ______                       __
  / ____/___  ____  _________  / /__
 / /   / __ \/ __ \/ ___/ __ \/ / _ \
/ /___/ /_/ / / / (__  ) /_/ / /  __/
\____/\____/_/ /_/____/\____/_/\___/
    "#
    );
}

/// Load `.env`, prepare the work directory and start logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let logs_dir = config.logs_dir();
    init_logger_with_file(Some(&log_level), logs_dir.to_str());

    Ok(())
}
