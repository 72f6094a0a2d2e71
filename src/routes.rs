//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`            - Portfolio page (public)
//! - `POST /domain`      - Domain toggle (public)
//! - `/resume/*`         - Resume download and view (public)
//! - `POST /contact`     - Contact form (public)
//! - `GET  /health`      - Health check: analytics queue, page views, collectors
//! - `/api/*`            - JSON API and beacon ingestion (public)
//! - `/admin/login`      - Admin login (public)
//! - `/admin/*`          - Admin panel (cookie session required)
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the API and login
//! - **Authentication** - Cookie session on the admin panel
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::admin_auth;
use axum::routing::get;
use axum::{Router, middleware};
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the router without path normalization.
///
/// Rate limiting keys on the peer address, which only exists when the
/// router is served with connect info. Pass `rate_limited = false` to
/// drive the router directly, as the integration tests do.
pub fn router(state: AppState, static_dir: &Path, rate_limited: bool) -> Router {
    let mut api_router = api::routes::routes();
    let mut login_router = web::routes::login_routes();
    if rate_limited {
        api_router = api_router.layer(rate_limit::layer());
        login_router = login_router.layer(rate_limit::secure_layer());
    }

    let admin_router = web::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::layer,
        ))
        .merge(login_router);

    Router::new()
        .merge(web::routes::public_routes())
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest("/admin", admin_router)
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory served under `/static`
pub fn app_router(state: AppState, static_dir: &Path) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, static_dir, true))
}
