//! Pricing API module

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pricing", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_config).put(handler::update_config))
        .route("/suggested/{membership_type}", get(handler::suggested))
}
