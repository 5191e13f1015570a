//! people-api: the HTTP surface of the public people API.
//!
//! Serves `GET /people/{uuid}` from whichever [`PeopleDriver`] the binary
//! selected at start-up, plus the admin endpoints used by the platform
//! (`/__health`, `/__gtg`, `/__ping`, `/__build-info`).

pub mod concepts;
pub mod config;
pub mod error;
pub mod handlers;
pub mod health;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use people_core::PeopleDriver;
use tower_http::trace::TraceLayer;

pub use concepts::ConceptsDriver;
pub use config::{ApiConfig, Backend};
pub use error::ApiError;
pub use health::ServiceInfo;

/// Shared per-process state. Cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<dyn PeopleDriver>,
    /// Sent as `Cache-Control: max-age=<secs>, public` on successful reads.
    pub cache_max_age: Duration,
    pub service: Arc<ServiceInfo>,
}

/// Build the full router: public API and admin endpoints.
pub fn router(state: AppState, request_logging: bool) -> Router {
    let router = Router::new()
        .route("/people/{uuid}", get(handlers::get_person))
        .route("/__health", get(health::health))
        .route("/__gtg", get(health::good_to_go))
        .route("/__ping", get(health::ping))
        .route("/__build-info", get(health::build_info))
        .with_state(state);

    if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
