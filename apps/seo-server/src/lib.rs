//! HTTP surface for the SEO tools frontend.

pub mod config;
pub mod mock;
pub mod routes;
pub mod state;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use config::Cli;
pub use state::AppState;

/// The full application: routes plus CORS and request tracing.
pub fn app(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
