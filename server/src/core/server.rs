//! HTTP server lifecycle

use std::net::SocketAddr;

use crate::api;
use crate::core::config::Config;
use crate::core::state::ServerState;
use crate::utils::{AppError, AppResult};

pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Bind and serve until ctrl-c
    pub async fn run(mut self) -> AppResult<()> {
        let state = match self.state.take() {
            Some(state) => state,
            None => ServerState::initialize(&self.config).await?,
        };

        let app = api::build_app(state);
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));

        tracing::info!("HTTP server listening on {}", addr);

        tokio::select! {
            result = axum_server::bind(addr).serve(app.into_make_service()) => {
                result.map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
            }
        }

        Ok(())
    }
}
