//! API Module
//!
//! HTTP handler and routing for the relay.
//!
//! # Endpoints
//! - `GET /data.json` - Aggregated project statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
