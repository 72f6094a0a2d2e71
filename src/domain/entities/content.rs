//! Shapes of the displayable portfolio content.
//!
//! These records are plain data. The static instance lives in
//! [`crate::domain::content_store`]; admin edit buffers clone the same shapes.

use serde::{Deserialize, Serialize};

use super::portfolio_domain::PortfolioDomain;

/// Contact details and links of the portfolio owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub bio: String,
    pub linkedin: String,
    pub github: String,
    pub twitter: String,
    pub website: String,
    pub leetcode: String,
}

impl PersonalInfo {
    /// Social links as `(platform, url)` pairs, in display order.
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("linkedin", self.linkedin.as_str()),
            ("github", self.github.as_str()),
            ("twitter", self.twitter.as_str()),
            ("leetcode", self.leetcode.as_str()),
            ("website", self.website.as_str()),
        ]
    }
}

/// Named group of skills, e.g. "Frontend" → ["React", "TypeScript"].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub journal: String,
    pub year: u16,
    pub doi: String,
    pub description: String,
}

/// Long-form engineering project with duration and team size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedProject {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub image: String,
    pub link: String,
    pub duration: String,
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patent {
    pub title: String,
    pub application_number: String,
    pub status: String,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patent_number: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Everything shown for one [`PortfolioDomain`].
///
/// Publications, detailed projects and patents are only populated for the
/// mechanical domain; they are empty lists for `cs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainContent {
    pub tagline: String,
    pub about: String,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub additional_projects: Vec<Project>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub detailed_projects: Vec<DetailedProject>,
    #[serde(default)]
    pub patents: Vec<Patent>,
}

impl DomainContent {
    pub fn has_achievements(&self) -> bool {
        !self.publications.is_empty() || !self.detailed_projects.is_empty() || !self.patents.is_empty()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.iter().map(|c| c.items.len()).sum()
    }
}

/// A value kept once per domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerDomain<T> {
    pub cs: T,
    pub mechanical: T,
}

impl<T> PerDomain<T> {
    pub fn get(&self, domain: PortfolioDomain) -> &T {
        match domain {
            PortfolioDomain::Cs => &self.cs,
            PortfolioDomain::Mechanical => &self.mechanical,
        }
    }

    pub fn get_mut(&mut self, domain: PortfolioDomain) -> &mut T {
        match domain {
            PortfolioDomain::Cs => &mut self.cs,
            PortfolioDomain::Mechanical => &mut self.mechanical,
        }
    }
}
