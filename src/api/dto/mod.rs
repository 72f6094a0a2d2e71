//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod beacon;
pub mod content;
pub mod domain;
pub mod health;
