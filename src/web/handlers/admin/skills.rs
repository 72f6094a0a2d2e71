//! Skills manager.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use super::{AdminNav, SelectOption, apply_edit, checkbox, non_empty};
use crate::domain::entities::AdminSession;
use crate::domain::workspace::skills::DEFAULT_PROFICIENCY;
use crate::domain::workspace::{EditError, Notice, Skill, SkillInput};
use crate::state::AppState;

const SKILLS_PATH: &str = "/admin/skills";

#[derive(Debug, Deserialize)]
pub struct SkillsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

/// A category header and the skills that passed the filter.
#[derive(Debug, Clone)]
pub struct GroupView {
    pub name: String,
    pub icon: String,
    pub skills: Vec<Skill>,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/skills.html")]
pub struct SkillsTemplate {
    pub nav: AdminNav,
    pub search: String,
    pub categories: Vec<SelectOption>,
    pub groups: Vec<GroupView>,
    pub total: usize,
    pub shown: usize,
    pub default_proficiency: u8,
}

/// Lists skills grouped by category, filtered by name and category.
///
/// # Endpoint
///
/// `GET /admin/skills?search=&category=`
pub async fn skills_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<SkillsQuery>,
) -> impl IntoResponse {
    let search = query.search.unwrap_or_default();
    let category = non_empty(query.category);

    state.workspaces.with(&session.token_hash, |ws| {
        let matches = ws.skills.filtered(&search, category.as_deref());
        let shown = matches.len();
        let groups = ws
            .skills
            .groups()
            .iter()
            .map(|g| GroupView {
                name: g.name.clone(),
                icon: g.icon.clone(),
                skills: matches
                    .iter()
                    .filter(|s| s.category == g.name)
                    .map(|s| (*s).clone())
                    .collect(),
            })
            .filter(|g| !g.skills.is_empty() || category.as_deref() == Some(g.name.as_str()))
            .collect();

        let mut categories = vec![SelectOption::new("", "All categories", category.as_deref().or(Some("")))];
        categories.extend(
            ws.skills
                .category_names()
                .into_iter()
                .map(|name| SelectOption::new(name, name, category.as_deref())),
        );
        let total = ws.skills.skill_count();

        SkillsTemplate {
            nav: AdminNav::new(ws, &session, "skills"),
            search: search.clone(),
            categories,
            groups,
            total,
            shown,
            default_proficiency: DEFAULT_PROFICIENCY,
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct SkillForm {
    pub name: String,
    pub category: String,
    /// Posted as text so that a malformed number becomes a notice, not a 422.
    pub proficiency: String,
    pub trending: Option<String>,
    pub learning: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<SkillForm> for SkillInput {
    type Error = EditError;

    fn try_from(form: SkillForm) -> Result<Self, Self::Error> {
        let proficiency = form
            .proficiency
            .trim()
            .parse::<u8>()
            .map_err(|_| EditError::Invalid("Proficiency must be between 0 and 100".into()))?;
        Ok(SkillInput {
            name: form.name.trim().to_string(),
            category: form.category,
            proficiency,
            trending: checkbox(&form.trending),
            learning: checkbox(&form.learning),
            description: form.description,
        })
    }
}

/// `POST /admin/skills`
pub async fn add_skill_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<SkillForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Added", "Skill added"),
        |ws| ws.skills.add_skill(form.try_into()?),
    );
    Redirect::to(SKILLS_PATH)
}

/// `POST /admin/skills/{id}`
pub async fn update_skill_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    Form(form): Form<SkillForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Updated", "Skill updated"),
        |ws| ws.skills.update_skill(&id, form.try_into()?),
    );
    Redirect::to(SKILLS_PATH)
}

/// `POST /admin/skills/{id}/delete`
pub async fn delete_skill_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |skill: &Skill| Notice::success("Deleted", format!("'{}' removed", skill.name)),
        |ws| ws.skills.delete_skill(&id),
    );
    Redirect::to(SKILLS_PATH)
}

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// `POST /admin/skills/categories`
pub async fn add_category_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<CategoryForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Added", "Category added"),
        |ws| ws.skills.add_category(&form.name, Some(form.icon.trim())),
    );
    Redirect::to(SKILLS_PATH)
}

/// `POST /admin/skills/save`
pub async fn save_skills_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Saved", "Skills saved for this session"),
        |ws| {
            ws.skills.save();
            Ok(())
        },
    );
    Redirect::to(SKILLS_PATH)
}

/// `POST /admin/skills/reset`
pub async fn reset_skills_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Reset", "Skills restored"),
        |ws| {
            ws.skills.reset();
            Ok(())
        },
    );
    Redirect::to(SKILLS_PATH)
}
