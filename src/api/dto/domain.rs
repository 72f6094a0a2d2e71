//! DTOs for reading and switching the active domain.

use serde::{Deserialize, Serialize};

use crate::domain::entities::PortfolioDomain;

/// The visitor's active domain and the site-wide default behind it.
#[derive(Debug, Serialize)]
pub struct DomainResponse {
    pub domain: PortfolioDomain,
    pub default_landing: PortfolioDomain,
    /// Whether the visitor has picked a domain themselves.
    pub explicit: bool,
}

/// Request to switch the visitor's domain.
///
/// Unknown values are rejected by deserialization with `422`.
#[derive(Debug, Deserialize)]
pub struct SwitchDomainRequest {
    pub domain: PortfolioDomain,
}

#[derive(Debug, Serialize)]
pub struct SwitchDomainResponse {
    pub domain: PortfolioDomain,
    pub previous: PortfolioDomain,
    pub changed: bool,
}
