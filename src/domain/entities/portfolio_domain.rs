//! The two content personas the portfolio can present.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Audience-switchable content domain.
///
/// Exactly one domain is active for a visitor at any time. The string forms
/// `cs` and `mechanical` are what gets persisted in cookies and preference
/// files; parsing is exact and case-sensitive so that anything else is treated
/// as malformed and replaced by the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioDomain {
    #[default]
    Cs,
    Mechanical,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown portfolio domain '{0}', expected 'cs' or 'mechanical'")]
pub struct ParseDomainError(pub String);

impl PortfolioDomain {
    pub const ALL: [PortfolioDomain; 2] = [PortfolioDomain::Cs, PortfolioDomain::Mechanical];

    pub fn as_str(&self) -> &'static str {
        match self {
            PortfolioDomain::Cs => "cs",
            PortfolioDomain::Mechanical => "mechanical",
        }
    }

    /// Label shown to visitors.
    pub fn label(&self) -> &'static str {
        match self {
            PortfolioDomain::Cs => "Computer Science",
            PortfolioDomain::Mechanical => "Mechanical Engineering",
        }
    }

    /// Short tag used in resume file names.
    pub fn resume_tag(&self) -> &'static str {
        match self {
            PortfolioDomain::Cs => "CS",
            PortfolioDomain::Mechanical => "Mechanical",
        }
    }

    /// The domain a header toggle switches to.
    pub fn other(&self) -> PortfolioDomain {
        match self {
            PortfolioDomain::Cs => PortfolioDomain::Mechanical,
            PortfolioDomain::Mechanical => PortfolioDomain::Cs,
        }
    }

    /// Parses a persisted value, treating anything malformed as absent.
    pub fn parse_lenient(value: Option<&str>) -> Option<PortfolioDomain> {
        value.and_then(|v| v.parse().ok())
    }
}

impl FromStr for PortfolioDomain {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cs" => Ok(PortfolioDomain::Cs),
            "mechanical" => Ok(PortfolioDomain::Mechanical),
            other => Err(ParseDomainError(other.to_string())),
        }
    }
}

impl fmt::Display for PortfolioDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_values() {
        assert_eq!("cs".parse::<PortfolioDomain>(), Ok(PortfolioDomain::Cs));
        assert_eq!(
            "mechanical".parse::<PortfolioDomain>(),
            Ok(PortfolioDomain::Mechanical)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("CS".parse::<PortfolioDomain>().is_err());
        assert!(" cs".parse::<PortfolioDomain>().is_err());
        assert!("{\"domain\":\"cs\"}".parse::<PortfolioDomain>().is_err());
        assert_eq!(PortfolioDomain::parse_lenient(Some("bogus")), None);
        assert_eq!(PortfolioDomain::parse_lenient(None), None);
    }

    #[test]
    fn test_display_round_trip() {
        for domain in PortfolioDomain::ALL {
            assert_eq!(domain.to_string().parse::<PortfolioDomain>(), Ok(domain));
        }
    }

    #[test]
    fn test_other_toggles() {
        assert_eq!(PortfolioDomain::Cs.other(), PortfolioDomain::Mechanical);
        assert_eq!(PortfolioDomain::Mechanical.other(), PortfolioDomain::Cs);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&PortfolioDomain::Mechanical).unwrap();
        assert_eq!(json, "\"mechanical\"");
    }
}
