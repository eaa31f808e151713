//! Membership API module

mod handler;

use axum::{
    routing::{get, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/memberships", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/status/{dni}", get(handler::status_by_client))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
