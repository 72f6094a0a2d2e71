//! HTML handlers for the public site and the admin panel.

pub mod admin;
mod consent;
mod contact;
mod domain;
mod login;
mod portfolio;
mod resume;

pub use consent::consent_handler;
pub use contact::contact_handler;
pub use domain::switch_domain_handler;
pub use login::{login_handler, login_page_handler, logout_handler};
pub use portfolio::portfolio_handler;
pub use resume::{resume_download_handler, resume_view_handler};
