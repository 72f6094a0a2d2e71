//! Cookie-based authentication middleware for the admin panel.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::state::AppState;
use crate::web::cookies::{SESSION_COOKIE, read_cookie};

/// Where unauthenticated admin requests are sent.
pub const LOGIN_PATH: &str = "/admin/login";

/// Authenticates admin requests using the session cookie.
///
/// # Cookie Format
///
/// ```text
/// Cookie: admin_session=<token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract the `admin_session` cookie from the request
/// 2. Resolve it via [`crate::application::services::AuthService::authenticate`],
///    which also slides the session expiry
/// 3. On success, insert the [`crate::domain::entities::AdminSession`] into
///    request extensions and continue to the handler
/// 4. On failure or missing cookie, redirect to `/admin/login`
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/", get(dashboard_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let Some(token) = read_cookie(req.headers(), SESSION_COOKIE) else {
        return Err(Redirect::to(LOGIN_PATH));
    };

    match st.auth_service.authenticate(&token).await {
        Ok(session) => {
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        Err(_) => Err(Redirect::to(LOGIN_PATH)),
    }
}
