//! Edit buffer for personal info, domain texts and projects.

use super::EditError;
use crate::domain::content_store::PortfolioContent;
use crate::domain::entities::{DomainContent, PersonalInfo, PortfolioDomain, Project};

#[derive(Debug, Clone)]
pub struct ContentEditor {
    original: PortfolioContent,
    draft: PortfolioContent,
    dirty: bool,
}

impl ContentEditor {
    pub fn new(snapshot: PortfolioContent) -> Self {
        Self {
            draft: snapshot.clone(),
            original: snapshot,
            dirty: false,
        }
    }

    pub fn draft(&self) -> &PortfolioContent {
        &self.draft
    }

    pub fn personal(&self) -> &PersonalInfo {
        &self.draft.personal
    }

    pub fn domain(&self, domain: PortfolioDomain) -> &DomainContent {
        self.draft.domain(domain)
    }

    pub fn has_changes(&self) -> bool {
        self.dirty
    }

    pub fn update_personal(&mut self, personal: PersonalInfo) {
        self.draft.personal = personal;
        self.dirty = true;
    }

    pub fn update_domain_text(&mut self, domain: PortfolioDomain, tagline: String, about: String) {
        let content = self.draft.domain_mut(domain);
        content.tagline = tagline;
        content.about = about;
        self.dirty = true;
    }

    /// Appends a project and returns its index.
    pub fn add_project(&mut self, domain: PortfolioDomain, project: Project) -> usize {
        let projects = &mut self.draft.domain_mut(domain).projects;
        projects.push(project);
        self.dirty = true;
        projects.len() - 1
    }

    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if `index` is out of range.
    pub fn update_project(
        &mut self,
        domain: PortfolioDomain,
        index: usize,
        project: Project,
    ) -> Result<(), EditError> {
        let slot = self
            .draft
            .domain_mut(domain)
            .projects
            .get_mut(index)
            .ok_or_else(|| project_not_found(index))?;
        *slot = project;
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] if `index` is out of range.
    pub fn delete_project(
        &mut self,
        domain: PortfolioDomain,
        index: usize,
    ) -> Result<Project, EditError> {
        let projects = &mut self.draft.domain_mut(domain).projects;
        if index >= projects.len() {
            return Err(project_not_found(index));
        }
        self.dirty = true;
        Ok(projects.remove(index))
    }

    /// Marks the buffer as saved. Nothing is written anywhere.
    pub fn save(&mut self) {
        self.dirty = false;
    }

    pub fn reset(&mut self) {
        self.draft = self.original.clone();
        self.dirty = false;
    }
}

fn project_not_found(index: usize) -> EditError {
    EditError::NotFound {
        kind: "project",
        id: index.to_string(),
    }
}
