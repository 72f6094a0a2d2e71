//! Edit buffer for skills, grouped by category.

use serde::Serialize;

use super::EditError;
use crate::domain::entities::SkillCategory;

/// Proficiency given to seeded skills and the default for new ones.
pub const DEFAULT_PROFICIENCY: u8 = 75;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub proficiency: u8,
    pub trending: bool,
    pub learning: bool,
    pub endorsements: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroup {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub skills: Vec<Skill>,
}

/// Fields accepted from the add/edit skill form.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillInput {
    pub name: String,
    pub category: String,
    pub proficiency: u8,
    pub trending: bool,
    pub learning: bool,
    pub description: String,
}

/// Icon picked from keywords in the category name.
pub fn category_icon(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if lower.contains("frontend") {
        "code"
    } else if lower.contains("backend") {
        "server"
    } else if lower.contains("design") {
        "wrench"
    } else {
        "globe"
    }
}

/// Merges both domains' categories: same-name categories are combined,
/// duplicate items removed, first-seen order kept.
fn merge_categories(cs: &[SkillCategory], mechanical: &[SkillCategory]) -> Vec<SkillGroup> {
    let mut merged: Vec<(String, Vec<String>)> = Vec::new();
    for category in cs.iter().chain(mechanical) {
        match merged.iter_mut().find(|(name, _)| *name == category.category) {
            Some((_, items)) => {
                for item in &category.items {
                    if !items.contains(item) {
                        items.push(item.clone());
                    }
                }
            }
            None => {
                let mut items: Vec<String> = Vec::new();
                for item in &category.items {
                    if !items.contains(item) {
                        items.push(item.clone());
                    }
                }
                merged.push((category.category.clone(), items));
            }
        }
    }

    merged
        .into_iter()
        .enumerate()
        .map(|(ci, (name, items))| SkillGroup {
            id: format!("cat-{ci}"),
            icon: category_icon(&name).to_string(),
            skills: items
                .into_iter()
                .enumerate()
                .map(|(si, item)| Skill {
                    id: format!("skill-{ci}-{si}"),
                    name: item,
                    category: name.clone(),
                    proficiency: DEFAULT_PROFICIENCY,
                    trending: false,
                    learning: false,
                    endorsements: 0,
                    description: String::new(),
                })
                .collect(),
            name,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct SkillsEditor {
    original: Vec<SkillGroup>,
    groups: Vec<SkillGroup>,
    next_id: u64,
    dirty: bool,
}

impl SkillsEditor {
    pub fn new(cs: &[SkillCategory], mechanical: &[SkillCategory]) -> Self {
        let groups = merge_categories(cs, mechanical);
        Self {
            original: groups.clone(),
            groups,
            next_id: 1,
            dirty: false,
        }
    }

    pub fn groups(&self) -> &[SkillGroup] {
        &self.groups
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn skill_count(&self) -> usize {
        self.groups.iter().map(|g| g.skills.len()).sum()
    }

    pub fn has_changes(&self) -> bool {
        self.dirty
    }

    pub fn find(&self, id: &str) -> Option<&Skill> {
        self.groups.iter().flat_map(|g| &g.skills).find(|s| s.id == id)
    }

    /// Skills whose name contains `search` (case-insensitive), optionally
    /// limited to one category.
    pub fn filtered(&self, search: &str, category: Option<&str>) -> Vec<&Skill> {
        let needle = search.to_lowercase();
        self.groups
            .iter()
            .filter(|g| category.is_none_or(|c| g.name == c))
            .flat_map(|g| &g.skills)
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn allocate_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-new-{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn validate(input: &SkillInput) -> Result<(), EditError> {
        if input.name.trim().is_empty() {
            return Err(EditError::Invalid("Skill name is required".into()));
        }
        if input.proficiency > 100 {
            return Err(EditError::Invalid(
                "Proficiency must be between 0 and 100".into(),
            ));
        }
        Ok(())
    }

    fn group_index(&self, category: &str) -> Result<usize, EditError> {
        self.groups
            .iter()
            .position(|g| g.name == category)
            .ok_or_else(|| EditError::UnknownCategory(category.to_string()))
    }

    /// # Errors
    ///
    /// [`EditError::UnknownCategory`] if the category does not exist,
    /// [`EditError::Invalid`] for an empty name or out-of-range proficiency.
    pub fn add_skill(&mut self, input: SkillInput) -> Result<String, EditError> {
        Self::validate(&input)?;
        let group = self.group_index(&input.category)?;
        let id = self.allocate_id("skill");
        self.groups[group].skills.push(Skill {
            id: id.clone(),
            name: input.name,
            category: input.category,
            proficiency: input.proficiency,
            trending: input.trending,
            learning: input.learning,
            endorsements: 0,
            description: input.description,
        });
        self.dirty = true;
        Ok(id)
    }

    /// Updates a skill in place, moving it if its category changed.
    ///
    /// # Errors
    ///
    /// [`EditError::NotFound`] for an unknown id, plus the errors of
    /// [`Self::add_skill`].
    pub fn update_skill(&mut self, id: &str, input: SkillInput) -> Result<(), EditError> {
        Self::validate(&input)?;
        let target = self.group_index(&input.category)?;
        let (source, position) = self.locate(id)?;

        let mut skill = self.groups[source].skills.remove(position);
        skill.name = input.name;
        skill.category = input.category;
        skill.proficiency = input.proficiency;
        skill.trending = input.trending;
        skill.learning = input.learning;
        skill.description = input.description;

        if source == target {
            self.groups[target].skills.insert(position, skill);
        } else {
            self.groups[target].skills.push(skill);
        }
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    ///
    /// [`EditError::NotFound`] for an unknown id.
    pub fn delete_skill(&mut self, id: &str) -> Result<Skill, EditError> {
        let (group, position) = self.locate(id)?;
        self.dirty = true;
        Ok(self.groups[group].skills.remove(position))
    }

    /// # Errors
    ///
    /// [`EditError::DuplicateCategory`] if the name is taken,
    /// [`EditError::Invalid`] if it is empty.
    pub fn add_category(&mut self, name: &str, icon: Option<&str>) -> Result<String, EditError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::Invalid("Category name is required".into()));
        }
        if self.groups.iter().any(|g| g.name == name) {
            return Err(EditError::DuplicateCategory(name.to_string()));
        }
        let id = self.allocate_id("cat");
        self.groups.push(SkillGroup {
            id: id.clone(),
            name: name.to_string(),
            icon: icon
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| category_icon(name))
                .to_string(),
            skills: Vec::new(),
        });
        self.dirty = true;
        Ok(id)
    }

    fn locate(&self, id: &str) -> Result<(usize, usize), EditError> {
        self.groups
            .iter()
            .enumerate()
            .find_map(|(gi, g)| g.skills.iter().position(|s| s.id == id).map(|si| (gi, si)))
            .ok_or_else(|| EditError::NotFound {
                kind: "skill",
                id: id.to_string(),
            })
    }

    pub fn save(&mut self) {
        self.dirty = false;
    }

    pub fn reset(&mut self) {
        self.groups = self.original.clone();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str, items: &[&str]) -> SkillCategory {
        SkillCategory {
            category: name.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn editor() -> SkillsEditor {
        SkillsEditor::new(
            &[cat("Frontend", &["React", "Vue.js"]), cat("Concepts", &["Agile", "Testing"])],
            &[cat("Design & Modeling", &["ANSYS"]), cat("Concepts", &["Agile", "Six Sigma"])],
        )
    }

    fn input(name: &str, category: &str) -> SkillInput {
        SkillInput {
            name: name.to_string(),
            category: category.to_string(),
            proficiency: 90,
            trending: true,
            learning: false,
            description: String::new(),
        }
    }

    #[test]
    fn test_merge_combines_and_dedups() {
        let editor = editor();

        assert_eq!(
            editor.category_names(),
            vec!["Frontend", "Concepts", "Design & Modeling"]
        );
        let concepts: Vec<_> = editor.groups()[1].skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(concepts, vec!["Agile", "Testing", "Six Sigma"]);
        assert_eq!(editor.skill_count(), 6);
    }

    #[test]
    fn test_icons_by_keyword() {
        let editor = editor();
        let icons: Vec<_> = editor.groups().iter().map(|g| g.icon.as_str()).collect();

        assert_eq!(icons, vec!["code", "globe", "wrench"]);
        assert_eq!(category_icon("Backend"), "server");
    }

    #[test]
    fn test_add_skill_grows_by_one() {
        let mut editor = editor();
        let before = editor.skill_count();

        let id = editor.add_skill(input("Svelte", "Frontend")).unwrap();

        assert_eq!(editor.skill_count(), before + 1);
        assert_eq!(editor.find(&id).unwrap().proficiency, 90);
        assert!(editor.has_changes());
    }

    #[test]
    fn test_add_skill_unknown_category() {
        let mut editor = editor();

        let result = editor.add_skill(input("Svelte", "Nope"));

        assert_eq!(result, Err(EditError::UnknownCategory("Nope".into())));
        assert!(!editor.has_changes());
    }

    #[test]
    fn test_update_moves_between_categories() {
        let mut editor = editor();

        editor.update_skill("skill-0-0", input("React", "Concepts")).unwrap();

        assert_eq!(editor.groups()[0].skills.len(), 1);
        assert_eq!(editor.find("skill-0-0").unwrap().category, "Concepts");
    }

    #[test]
    fn test_filter_by_search_and_category() {
        let editor = editor();

        let names: Vec<_> = editor.filtered("a", None).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["React", "Agile", "Six Sigma", "ANSYS"]);

        let names: Vec<_> = editor
            .filtered("", Some("Frontend"))
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["React", "Vue.js"]);
    }

    #[test]
    fn test_add_category_rejects_duplicate() {
        let mut editor = editor();

        assert!(editor.add_category("Backend", None).is_ok());
        assert_eq!(
            editor.add_category("Backend", None),
            Err(EditError::DuplicateCategory("Backend".into()))
        );
        assert_eq!(editor.groups().last().unwrap().icon, "server");
    }

    #[test]
    fn test_reset_restores_snapshot() {
        let mut editor = editor();
        let original = editor.groups().to_vec();

        editor.add_category("Tools", Some("settings")).unwrap();
        editor.add_skill(input("Git", "Tools")).unwrap();
        editor.delete_skill("skill-0-1").unwrap();
        editor.reset();

        assert_eq!(editor.groups(), original.as_slice());
        assert!(!editor.has_changes());
    }
}
