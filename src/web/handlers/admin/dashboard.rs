//! Admin dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::State,
    response::IntoResponse,
};

use super::AdminNav;
use crate::application::services::AnalyticsStats;
use crate::domain::entities::{AdminSession, PortfolioDomain};
use crate::domain::workspace::DashboardOverview;
use crate::state::AppState;

/// Live figures from the running service.
#[derive(Debug, Clone)]
pub struct LiveCounters {
    pub analytics: AnalyticsStats,
    pub collectors: usize,
    pub open_page_views: usize,
    pub admin_workspaces: usize,
    pub cs_projects: usize,
    pub mechanical_projects: usize,
    pub skills: usize,
    pub certifications: usize,
    pub default_landing: PortfolioDomain,
}

/// Template for the dashboard home page.
///
/// Renders `templates/admin/dashboard.html` with live counters next to the
/// sample overview figures.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: AdminNav,
    pub live: LiveCounters,
    pub overview: DashboardOverview,
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /admin`
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> impl IntoResponse {
    let (nav, cs_projects, mechanical_projects, skills, certifications) =
        state.workspaces.with(&session.token_hash, |ws| {
            (
                AdminNav::new(ws, &session, "dashboard"),
                ws.content.domain(PortfolioDomain::Cs).projects.len(),
                ws.content.domain(PortfolioDomain::Mechanical).projects.len(),
                ws.skills.skill_count(),
                ws.certifications.records().len(),
            )
        });

    DashboardTemplate {
        nav,
        live: LiveCounters {
            analytics: state.analytics.stats(),
            collectors: state.collectors.len(),
            open_page_views: state.page_views.open_count(),
            admin_workspaces: state.workspaces.count(),
            cs_projects,
            mechanical_projects,
            skills,
            certifications,
            default_landing: state.domain_selector.get_default_landing(),
        },
        overview: DashboardOverview::sample(),
    }
}
