//! The public portfolio page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, Uri},
    response::IntoResponse,
};
use chrono::Datelike;
use serde::Deserialize;

use crate::domain::content_store::ContentStore;
use crate::domain::entities::{
    Certification, DetailedProject, Education, ExperienceEntry, Patent, PersonalInfo,
    PortfolioDomain, Project, Publication,
};
use crate::domain::tech_catalog::tech_style;
use crate::state::AppState;
use crate::web::cookies::CookiePreferences;
use crate::web::handlers::consent::visitor_consent;

/// A technology name with its display icon and color.
#[derive(Debug, Clone)]
pub struct TechBadge {
    pub name: String,
    pub icon: &'static str,
    pub color: &'static str,
}

impl TechBadge {
    fn new(name: &str) -> Self {
        let style = tech_style(name);
        Self {
            name: name.to_string(),
            icon: style.icon,
            color: style.color,
        }
    }

    fn all(names: &[String]) -> Vec<Self> {
        names.iter().map(|n| Self::new(n)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct SkillGroupView {
    pub category: String,
    pub badges: Vec<TechBadge>,
}

#[derive(Debug, Clone)]
pub struct ProjectView {
    pub title: String,
    pub description: String,
    pub image: String,
    pub github: Option<String>,
    pub demo: Option<String>,
    pub badges: Vec<TechBadge>,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            image: project.image.clone(),
            github: project.github.clone(),
            demo: project.demo.clone(),
            badges: TechBadge::all(&project.technologies),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SocialLink {
    pub platform: &'static str,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    /// Outcome of a contact form post: `sent` or `invalid`.
    pub contact: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "portfolio.html")]
pub struct PortfolioTemplate {
    pub page_view: String,
    pub domain: PortfolioDomain,
    pub other: PortfolioDomain,
    pub is_mechanical: bool,
    pub personal: PersonalInfo,
    pub socials: Vec<SocialLink>,
    pub tagline: String,
    pub about: String,
    pub skills: Vec<SkillGroupView>,
    pub projects: Vec<ProjectView>,
    pub additional_projects: Vec<ProjectView>,
    pub publications: Vec<Publication>,
    pub detailed_projects: Vec<DetailedProject>,
    pub patents: Vec<Patent>,
    pub has_achievements: bool,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub resume_path: String,
    pub resume_file_name: String,
    pub contact_sent: bool,
    pub contact_invalid: bool,
    /// No consent decision recorded yet.
    pub show_consent_banner: bool,
    /// Page signals are collected only when this is set.
    pub analytics_enabled: bool,
    pub year: i32,
}

impl PortfolioTemplate {
    pub fn build(store: &ContentStore, domain: PortfolioDomain, page_view: String) -> Self {
        let content = store.domain(domain);
        let personal = store.personal().clone();
        Self {
            page_view,
            domain,
            other: domain.other(),
            is_mechanical: domain == PortfolioDomain::Mechanical,
            socials: personal
                .social_links()
                .into_iter()
                .filter(|(_, url)| !url.is_empty())
                .map(|(platform, url)| SocialLink {
                    platform,
                    url: url.to_string(),
                })
                .collect(),
            personal,
            tagline: content.tagline.clone(),
            about: content.about.clone(),
            skills: content
                .skills
                .iter()
                .map(|c| SkillGroupView {
                    category: c.category.clone(),
                    badges: TechBadge::all(&c.items),
                })
                .collect(),
            projects: content.projects.iter().map(ProjectView::from).collect(),
            additional_projects: content
                .additional_projects
                .iter()
                .map(ProjectView::from)
                .collect(),
            publications: content.publications.clone(),
            detailed_projects: content.detailed_projects.clone(),
            patents: content.patents.clone(),
            has_achievements: content.has_achievements(),
            experience: store.experience(domain).to_vec(),
            education: store.education().to_vec(),
            certifications: store.certifications().to_vec(),
            resume_path: format!("/resume/{domain}"),
            resume_file_name: store.resume_file_name(domain),
            contact_sent: false,
            contact_invalid: false,
            show_consent_banner: false,
            analytics_enabled: true,
            year: chrono::Utc::now().year(),
        }
    }
}

/// Renders the portfolio in the visitor's active domain.
///
/// # Endpoint
///
/// `GET /`
///
/// Opens a page view (emitting `page_view`) whose id is embedded in the page
/// so the browser script can post signals for it. Visitors who declined
/// analytics cookies get neither the page view nor the script; visitors who
/// have not decided yet see the consent banner.
pub async fn portfolio_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Query(query): Query<PortfolioQuery>,
) -> impl IntoResponse {
    let prefs = CookiePreferences::from_headers(&headers, state.cookie_secure);
    let domain = state.domain_selector.get_domain(&prefs);
    let consent = visitor_consent(&prefs);
    let analytics_enabled = consent.is_none_or(|c| c.analytics);

    let page_view = if analytics_enabled {
        state
            .page_views
            .open(domain, uri.path(), &uri.to_string())
            .to_string()
    } else {
        String::new()
    };

    let mut template = PortfolioTemplate::build(&state.content, domain, page_view);
    template.show_consent_banner = consent.is_none();
    template.analytics_enabled = analytics_enabled;
    template.contact_sent = query.contact.as_deref() == Some("sent");
    template.contact_invalid = query.contact.as_deref() == Some("invalid");
    template
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mechanical_view_has_achievements() {
        let store = ContentStore::builtin();

        let cs = PortfolioTemplate::build(&store, PortfolioDomain::Cs, "id".into());
        let mechanical = PortfolioTemplate::build(&store, PortfolioDomain::Mechanical, "id".into());

        assert!(!cs.has_achievements);
        assert!(mechanical.has_achievements);
        assert!(mechanical.is_mechanical);
        assert_eq!(cs.other, PortfolioDomain::Mechanical);
    }

    #[test]
    fn test_badges_use_catalog_defaults() {
        let badge = TechBadge::new("Some Unknown Tool");

        assert_eq!(badge.icon, "code");
        assert_eq!(badge.color, "currentColor");
    }

    #[test]
    fn test_renders_domain_specific_resume_link() {
        let store = ContentStore::builtin();
        let html = PortfolioTemplate::build(&store, PortfolioDomain::Mechanical, "pv-1".into())
            .render()
            .unwrap();

        assert!(html.contains("/resume/mechanical"));
        assert!(html.contains("pv-1"));
    }

    #[test]
    fn test_declined_analytics_drops_script() {
        let store = ContentStore::builtin();
        let mut template = PortfolioTemplate::build(&store, PortfolioDomain::Cs, String::new());
        template.analytics_enabled = false;

        let html = template.render().unwrap();

        assert!(!html.contains("/static/portfolio.js"));
        assert!(!html.contains("action=\"/consent\""));
    }
}
