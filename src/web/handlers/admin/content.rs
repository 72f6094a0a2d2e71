//! Content editor: personal info, domain texts and projects.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use validator::Validate;

use super::{AdminNav, SelectOption, apply_edit, optional_field};
use crate::domain::entities::{AdminSession, PersonalInfo, PortfolioDomain, Project};
use crate::domain::workspace::{EditError, Notice};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DomainQuery {
    pub domain: Option<String>,
}

/// A project with its position in the domain's list.
#[derive(Debug, Clone)]
pub struct IndexedProject {
    pub index: usize,
    pub project: Project,
    pub technologies: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/content.html")]
pub struct ContentTemplate {
    pub nav: AdminNav,
    pub domain: PortfolioDomain,
    pub domains: Vec<SelectOption>,
    pub personal: PersonalInfo,
    pub tagline: String,
    pub about: String,
    pub projects: Vec<IndexedProject>,
    pub has_changes: bool,
}

fn selected_domain(raw: Option<&str>) -> PortfolioDomain {
    PortfolioDomain::parse_lenient(raw).unwrap_or_default()
}

fn back_to(domain: PortfolioDomain) -> Redirect {
    Redirect::to(&format!("/admin/content?domain={domain}"))
}

/// Renders the content editor for one domain.
///
/// # Endpoint
///
/// `GET /admin/content?domain=cs|mechanical`
pub async fn content_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<DomainQuery>,
) -> impl IntoResponse {
    let domain = selected_domain(query.domain.as_deref());

    state.workspaces.with(&session.token_hash, |ws| {
        let content = ws.content.domain(domain);
        let (tagline, about) = (content.tagline.clone(), content.about.clone());
        let projects = content
            .projects
            .iter()
            .enumerate()
            .map(|(index, project)| IndexedProject {
                index,
                technologies: project.technologies.join(", "),
                project: project.clone(),
            })
            .collect();

        ContentTemplate {
            nav: AdminNav::new(ws, &session, "content"),
            domain,
            domains: PortfolioDomain::ALL
                .into_iter()
                .map(|d| SelectOption::new(d.as_str(), d.label(), Some(domain.as_str())))
                .collect(),
            personal: ws.content.personal().clone(),
            tagline,
            about,
            projects,
            has_changes: ws.content.has_changes(),
        }
    })
}

#[derive(Debug, Deserialize, Validate)]
pub struct PersonalForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub title: String,
    #[validate(email(message = "Email address is invalid"))]
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

impl From<PersonalForm> for PersonalInfo {
    fn from(form: PersonalForm) -> Self {
        PersonalInfo {
            name: form.name,
            title: form.title,
            email: form.email,
            phone: form.phone,
            location: form.location,
            bio: form.bio,
            linkedin: form.linkedin,
            github: form.github,
            twitter: form.twitter,
            website: form.website,
            leetcode: form.leetcode,
        }
    }
}

fn validated<T: Validate>(form: &T) -> Result<(), EditError> {
    form.validate().map_err(|errors| {
        let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        EditError::Invalid(format!("Invalid fields: {}", fields.join(", ")))
    })
}

/// `POST /admin/content/personal`
pub async fn update_personal_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<DomainQuery>,
    Form(form): Form<PersonalForm>,
) -> Redirect {
    let domain = selected_domain(query.domain.as_deref());
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Updated", "Personal information updated"),
        |ws| {
            validated(&form)?;
            ws.content.update_personal(form.into());
            Ok(())
        },
    );
    back_to(domain)
}

#[derive(Debug, Deserialize)]
pub struct DomainTextForm {
    pub domain: PortfolioDomain,
    pub tagline: String,
    pub about: String,
}

/// `POST /admin/content/text`
pub async fn update_domain_text_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<DomainTextForm>,
) -> Redirect {
    let domain = form.domain;
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Updated", format!("{} texts updated", domain.label())),
        |ws| {
            ws.content
                .update_domain_text(domain, form.tagline, form.about);
            Ok(())
        },
    );
    back_to(domain)
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProjectForm {
    pub domain: PortfolioDomain,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: String,
    /// Comma-separated.
    #[serde(default)]
    pub technologies: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub demo: String,
    #[serde(default)]
    pub image: String,
}

impl ProjectForm {
    fn into_project(self) -> Project {
        Project {
            title: self.title.trim().to_string(),
            description: self.description,
            technologies: self
                .technologies
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            github: optional_field(self.github),
            demo: optional_field(self.demo),
            image: self.image.trim().to_string(),
        }
    }
}

/// `POST /admin/content/projects`
pub async fn add_project_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<ProjectForm>,
) -> Redirect {
    let domain = form.domain;
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Added", "Project added"),
        |ws| {
            validated(&form)?;
            Ok(ws.content.add_project(domain, form.into_project()))
        },
    );
    back_to(domain)
}

/// `POST /admin/content/projects/{domain}/{index}`
pub async fn update_project_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path((domain, index)): Path<(PortfolioDomain, usize)>,
    Form(form): Form<ProjectForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Updated", "Project updated"),
        |ws| {
            validated(&form)?;
            ws.content.update_project(domain, index, form.into_project())
        },
    );
    back_to(domain)
}

/// `POST /admin/content/projects/{domain}/{index}/delete`
pub async fn delete_project_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path((domain, index)): Path<(PortfolioDomain, usize)>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |project: &Project| Notice::success("Deleted", format!("'{}' removed", project.title)),
        |ws| ws.content.delete_project(domain, index),
    );
    back_to(domain)
}

/// `POST /admin/content/save`
///
/// Clears the pending-changes flag. Nothing is written anywhere.
pub async fn save_content_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<DomainQuery>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Saved", "Content changes saved for this session"),
        |ws| {
            ws.content.save();
            Ok(())
        },
    );
    back_to(selected_domain(query.domain.as_deref()))
}

/// `POST /admin/content/reset`
pub async fn reset_content_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<DomainQuery>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Reset", "Content restored to the published version"),
        |ws| {
            ws.content.reset();
            Ok(())
        },
    );
    back_to(selected_domain(query.domain.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_form_conversion() {
        let form = ProjectForm {
            domain: PortfolioDomain::Cs,
            title: " Telemetry ".into(),
            description: "d".into(),
            technologies: "Rust, , Tokio ,Axum".into(),
            github: "".into(),
            demo: "https://demo.example.com".into(),
            image: "".into(),
        };

        let project = form.into_project();

        assert_eq!(project.title, "Telemetry");
        assert_eq!(project.technologies, vec!["Rust", "Tokio", "Axum"]);
        assert_eq!(project.github, None);
        assert_eq!(project.demo.as_deref(), Some("https://demo.example.com"));
    }
}
