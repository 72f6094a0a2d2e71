//! Certifications manager.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use super::{AdminNav, SelectOption, apply_edit, non_empty, optional_field};
use crate::domain::entities::AdminSession;
use crate::domain::workspace::{
    CertCategory, CertStats, CertStatus, CertificationInput, CertificationRecord, EditError,
    Notice,
};
use crate::state::AppState;

const CERTIFICATIONS_PATH: &str = "/admin/certifications";

#[derive(Debug, Deserialize)]
pub struct CertificationsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// A record with the option lists for its inline edit form.
#[derive(Debug, Clone)]
pub struct CertificationRow {
    pub record: CertificationRecord,
    pub expiry_date: String,
    pub credential_id: String,
    pub link: String,
    pub categories: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
}

impl CertificationRow {
    fn new(record: &CertificationRecord) -> Self {
        Self {
            expiry_date: record.expiry_date.clone().unwrap_or_default(),
            credential_id: record.credential_id.clone().unwrap_or_default(),
            link: record.link.clone().unwrap_or_default(),
            categories: category_options(Some(record.category.as_str()), None),
            statuses: status_options(Some(record.status.as_str()), None),
            record: record.clone(),
        }
    }
}

fn category_options(current: Option<&str>, any_label: Option<&str>) -> Vec<SelectOption> {
    let mut options = Vec::new();
    if let Some(label) = any_label {
        options.push(SelectOption::new("", label, current.or(Some(""))));
    }
    options.extend(
        CertCategory::ALL
            .iter()
            .map(|c| SelectOption::new(c.as_str(), c.as_str(), current)),
    );
    options
}

fn status_options(current: Option<&str>, any_label: Option<&str>) -> Vec<SelectOption> {
    let mut options = Vec::new();
    if let Some(label) = any_label {
        options.push(SelectOption::new("", label, current.or(Some(""))));
    }
    options.extend(
        CertStatus::ALL
            .iter()
            .map(|s| SelectOption::new(s.as_str(), s.as_str(), current)),
    );
    options
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/certifications.html")]
pub struct CertificationsTemplate {
    pub nav: AdminNav,
    pub search: String,
    pub category_filter: Vec<SelectOption>,
    pub status_filter: Vec<SelectOption>,
    pub new_categories: Vec<SelectOption>,
    pub new_statuses: Vec<SelectOption>,
    pub rows: Vec<CertificationRow>,
    pub stats: CertStats,
}

/// Lists certifications with search and category/status filters.
///
/// # Endpoint
///
/// `GET /admin/certifications?search=&category=&status=`
///
/// Unknown filter values are ignored rather than rejected.
pub async fn certifications_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<CertificationsQuery>,
) -> impl IntoResponse {
    let search = query.search.unwrap_or_default();
    let category = non_empty(query.category).and_then(|c| c.parse::<CertCategory>().ok());
    let status = non_empty(query.status).and_then(|s| s.parse::<CertStatus>().ok());

    state.workspaces.with(&session.token_hash, |ws| {
        let rows = ws
            .certifications
            .filtered(&search, category, status)
            .into_iter()
            .map(CertificationRow::new)
            .collect();
        let stats = ws.certifications.stats();

        CertificationsTemplate {
            nav: AdminNav::new(ws, &session, "certifications"),
            search: search.clone(),
            category_filter: category_options(
                category.as_ref().map(CertCategory::as_str),
                Some("All categories"),
            ),
            status_filter: status_options(
                status.as_ref().map(CertStatus::as_str),
                Some("All statuses"),
            ),
            new_categories: category_options(Some(CertCategory::Technical.as_str()), None),
            new_statuses: status_options(Some(CertStatus::Active.as_str()), None),
            rows,
            stats,
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct CertificationForm {
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub credential_id: String,
    #[serde(default)]
    pub link: String,
    pub category: String,
    /// Empty keeps the current status (or `active` for new records).
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<CertificationForm> for CertificationInput {
    type Error = EditError;

    fn try_from(form: CertificationForm) -> Result<Self, Self::Error> {
        let status = match form.status.trim() {
            "" => None,
            value => Some(value.parse()?),
        };
        Ok(CertificationInput {
            name: form.name.trim().to_string(),
            issuer: form.issuer.trim().to_string(),
            date: form.date.trim().to_string(),
            expiry_date: optional_field(form.expiry_date),
            credential_id: optional_field(form.credential_id),
            link: optional_field(form.link),
            category: form.category.trim().parse()?,
            status,
            description: form.description,
        })
    }
}

/// `POST /admin/certifications`
pub async fn add_certification_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<CertificationForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Added", "Certification added"),
        |ws| ws.certifications.add(form.try_into()?),
    );
    Redirect::to(CERTIFICATIONS_PATH)
}

/// `POST /admin/certifications/{id}`
pub async fn update_certification_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    Form(form): Form<CertificationForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Updated", "Certification updated"),
        |ws| ws.certifications.update(&id, form.try_into()?),
    );
    Redirect::to(CERTIFICATIONS_PATH)
}

/// `POST /admin/certifications/{id}/delete`
pub async fn delete_certification_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |record: &CertificationRecord| {
            Notice::success("Deleted", format!("'{}' removed", record.name))
        },
        |ws| ws.certifications.delete(&id),
    );
    Redirect::to(CERTIFICATIONS_PATH)
}

/// `POST /admin/certifications/save`
pub async fn save_certifications_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Saved", "Certifications saved for this session"),
        |ws| {
            ws.certifications.save();
            Ok(())
        },
    );
    Redirect::to(CERTIFICATIONS_PATH)
}

/// `POST /admin/certifications/reset`
pub async fn reset_certifications_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Reset", "Certifications restored"),
        |ws| {
            ws.certifications.reset();
            Ok(())
        },
    );
    Redirect::to(CERTIFICATIONS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(category: &str, status: &str) -> CertificationForm {
        CertificationForm {
            name: "Kubernetes Administrator".into(),
            issuer: "CNCF".into(),
            date: "2024-02".into(),
            expiry_date: "".into(),
            credential_id: " CKA-123 ".into(),
            link: "".into(),
            category: category.into(),
            status: status.into(),
            description: "".into(),
        }
    }

    #[test]
    fn test_form_conversion() {
        let input = CertificationInput::try_from(form("cloud", "")).unwrap();

        assert_eq!(input.category, CertCategory::Cloud);
        assert_eq!(input.status, None);
        assert_eq!(input.credential_id.as_deref(), Some("CKA-123"));
        assert_eq!(input.expiry_date, None);
    }

    #[test]
    fn test_unknown_category_or_status_is_rejected() {
        assert!(CertificationInput::try_from(form("space", "")).is_err());
        assert!(CertificationInput::try_from(form("cloud", "revoked")).is_err());
        assert_eq!(
            CertificationInput::try_from(form("cloud", "expired"))
                .unwrap()
                .status,
            Some(CertStatus::Expired)
        );
    }

    #[test]
    fn test_filter_options_default_to_any() {
        let options = category_options(None, Some("All categories"));

        assert_eq!(options.len(), CertCategory::ALL.len() + 1);
        assert!(options[0].selected);
        assert!(options[1..].iter().all(|o| !o.selected));
    }
}
