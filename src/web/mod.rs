//! Browser-facing layer: the portfolio page and the admin panel.
//!
//! Pages are rendered server-side with Askama templates.
//!
//! # Modules
//!
//! - [`cookies`] - Cookie parsing and the cookie-backed preference store
//! - [`handlers`] - Page and form handlers
//! - [`middleware`] - Admin session gate
//! - [`routes`] - Public, login and admin route tables

pub mod cookies;
pub mod handlers;
pub mod middleware;
pub mod routes;
