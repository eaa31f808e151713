//! Client API module

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/clients", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{dni}",
            get(handler::get_by_dni)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{dni}/toggle", post(handler::toggle_active))
}
