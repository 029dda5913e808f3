//! API Routes
//!
//! Configures the Axum router with the relay endpoint.

use axum::{http::Method, routing::get, Router};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{data_handler, AppState};

/// Creates the router.
///
/// # Endpoints
/// - `GET /data.json` - Aggregated project statistics
///
/// # Middleware
/// - CORS: Advertises the single configured origin on every response
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(state.allowed_origin.clone()))
        .allow_methods([Method::GET]);

    Router::new()
        .route("/data.json", get(data_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
