//! API route configuration.
//!
//! The JSON API is public; rate limiting is applied by [`crate::routes`].

use crate::api::handlers::{
    beacon_handler, content_handler, get_domain_handler, switch_domain_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET  /content/{domain}` - Content for one domain
/// - `GET  /domain`           - The visitor's active domain
/// - `PUT  /domain`           - Switch the visitor's domain
/// - `POST /beacon`           - Page signals from the browser script
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/content/{domain}", get(content_handler))
        .route(
            "/domain",
            get(get_domain_handler).put(switch_domain_handler),
        )
        .route("/beacon", post(beacon_handler))
}
