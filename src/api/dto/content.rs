//! DTOs for the content endpoint.

use serde::Serialize;

use crate::domain::content_store::ContentStore;
use crate::domain::entities::{
    Certification, DomainContent, Education, ExperienceEntry, PersonalInfo, PortfolioDomain,
};

/// Where the domain's resume can be fetched.
#[derive(Debug, Serialize)]
pub struct ResumeLink {
    pub path: String,
    pub file_name: String,
}

/// Everything the portfolio page shows for one domain.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub domain: PortfolioDomain,
    pub label: &'static str,
    pub personal: PersonalInfo,
    pub content: DomainContent,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub resume: ResumeLink,
}

impl ContentResponse {
    pub fn from_store(store: &ContentStore, domain: PortfolioDomain) -> Self {
        Self {
            domain,
            label: domain.label(),
            personal: store.personal().clone(),
            content: store.domain(domain).clone(),
            experience: store.experience(domain).to_vec(),
            education: store.education().to_vec(),
            certifications: store.certifications().to_vec(),
            resume: ResumeLink {
                path: store.resume_path(domain),
                file_name: store.resume_file_name(domain),
            },
        }
    }
}
