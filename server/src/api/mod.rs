//! API route modules
//!
//! - [`health`] - health check
//! - [`clients`] - client registry
//! - [`products`] - product/service catalog
//! - [`memberships`] - membership records and status
//! - [`incomes`] - income records
//! - [`expenses`] - expense records
//! - [`dashboard`] - monthly aggregation and Excel export
//! - [`pricing`] - membership price configuration

pub mod clients;
pub mod dashboard;
pub mod expenses;
pub mod health;
pub mod incomes;
pub mod memberships;
pub mod pricing;
pub mod products;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(clients::router())
        .merge(products::router())
        .merge(memberships::router())
        .merge(incomes::router())
        .merge(expenses::router())
        .merge(dashboard::router())
        .merge(pricing::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
