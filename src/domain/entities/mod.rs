//! Core domain entities representing the portfolio data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`PortfolioDomain`] - The `cs` / `mechanical` content persona
//! - [`PersonalInfo`], [`DomainContent`] and friends - Displayable content
//! - [`Certification`], [`Education`], [`ExperienceEntry`] - Career records
//! - [`AdminUser`], [`AdminSession`] - Admin panel identity
//! - [`CookieConsent`] - A visitor's optional cookie categories

pub mod admin;
pub mod consent;
pub mod content;
pub mod portfolio_domain;
pub mod records;

pub use admin::{AdminSession, AdminUser};
pub use consent::CookieConsent;
pub use content::{
    DetailedProject, DomainContent, Patent, PerDomain, PersonalInfo, Project, Publication,
    SkillCategory,
};
pub use portfolio_domain::{ParseDomainError, PortfolioDomain};
pub use records::{Certification, Education, ExperienceEntry};
