//! Edit buffer for certifications.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::EditError;
use crate::domain::entities::Certification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertCategory {
    Technical,
    Professional,
    Cloud,
    Academic,
    Industry,
}

impl CertCategory {
    pub const ALL: [CertCategory; 5] = [
        CertCategory::Technical,
        CertCategory::Professional,
        CertCategory::Cloud,
        CertCategory::Academic,
        CertCategory::Industry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CertCategory::Technical => "technical",
            CertCategory::Professional => "professional",
            CertCategory::Cloud => "cloud",
            CertCategory::Academic => "academic",
            CertCategory::Industry => "industry",
        }
    }

    /// Category guessed from a certification name when seeding.
    pub fn infer(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("aws") {
            CertCategory::Cloud
        } else if lower.contains("engineer") {
            CertCategory::Professional
        } else {
            CertCategory::Technical
        }
    }
}

impl FromStr for CertCategory {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CertCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| EditError::Invalid(format!("unknown certification category '{s}'")))
    }
}

impl fmt::Display for CertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertStatus {
    Active,
    Expired,
    Pending,
}

impl CertStatus {
    pub const ALL: [CertStatus; 3] = [CertStatus::Active, CertStatus::Expired, CertStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            CertStatus::Active => "active",
            CertStatus::Expired => "expired",
            CertStatus::Pending => "pending",
        }
    }
}

impl FromStr for CertStatus {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CertStatus::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| EditError::Invalid(format!("unknown certification status '{s}'")))
    }
}

impl fmt::Display for CertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationRecord {
    pub id: String,
    pub name: String,
    pub issuer: String,
    /// `YYYY-MM`.
    pub date: String,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub link: Option<String>,
    pub category: CertCategory,
    pub status: CertStatus,
    pub description: String,
}

/// Fields accepted from the add/edit certification form.
///
/// A `status` of `None` means "active" for new records and "unchanged" for
/// updates.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificationInput {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub link: Option<String>,
    pub category: CertCategory,
    pub status: Option<CertStatus>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CertStats {
    pub total: usize,
    pub active: usize,
    pub categories: usize,
}

/// Accepts a `YYYY-MM` month with a real month number.
fn is_year_month(value: &str) -> bool {
    value.len() == 7
        && value.as_bytes()[4] == b'-'
        && NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Debug, Clone)]
pub struct CertificationsEditor {
    original: Vec<CertificationRecord>,
    records: Vec<CertificationRecord>,
    next_id: u64,
    dirty: bool,
}

impl CertificationsEditor {
    pub fn new(seed: &[Certification]) -> Self {
        let records: Vec<CertificationRecord> = seed
            .iter()
            .enumerate()
            .map(|(i, cert)| CertificationRecord {
                id: format!("cert-{i}"),
                name: cert.name.clone(),
                issuer: cert.issuer.clone(),
                date: cert.date.clone(),
                expiry_date: None,
                credential_id: non_empty(&cert.credential_id),
                link: non_empty(&cert.link),
                category: CertCategory::infer(&cert.name),
                status: CertStatus::Active,
                description: format!("Professional certification in {}", cert.name),
            })
            .collect();
        Self {
            original: records.clone(),
            records,
            next_id: 1,
            dirty: false,
        }
    }

    pub fn records(&self) -> &[CertificationRecord] {
        &self.records
    }

    pub fn has_changes(&self) -> bool {
        self.dirty
    }

    pub fn find(&self, id: &str) -> Option<&CertificationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Matches `search` against name or issuer (case-insensitive).
    pub fn filtered(
        &self,
        search: &str,
        category: Option<CertCategory>,
        status: Option<CertStatus>,
    ) -> Vec<&CertificationRecord> {
        let needle = search.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle) || r.issuer.to_lowercase().contains(&needle)
            })
            .filter(|r| category.is_none_or(|c| r.category == c))
            .filter(|r| status.is_none_or(|s| r.status == s))
            .collect()
    }

    pub fn stats(&self) -> CertStats {
        CertStats {
            total: self.records.len(),
            active: self
                .records
                .iter()
                .filter(|r| r.status == CertStatus::Active)
                .count(),
            categories: self
                .records
                .iter()
                .map(|r| r.category)
                .collect::<HashSet<_>>()
                .len(),
        }
    }

    fn validate(input: &CertificationInput) -> Result<(), EditError> {
        if input.name.trim().is_empty() || input.issuer.trim().is_empty() {
            return Err(EditError::Invalid("Name and issuer are required".into()));
        }
        if !is_year_month(&input.date) {
            return Err(EditError::Invalid("Date must be YYYY-MM".into()));
        }
        if input.expiry_date.as_deref().is_some_and(|d| !is_year_month(d)) {
            return Err(EditError::Invalid("Expiry date must be YYYY-MM".into()));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`EditError::Invalid`] if name or issuer is empty or a date is not
    /// `YYYY-MM`.
    pub fn add(&mut self, input: CertificationInput) -> Result<String, EditError> {
        Self::validate(&input)?;
        let id = format!("cert-new-{}", self.next_id);
        self.next_id += 1;
        self.records.push(CertificationRecord {
            id: id.clone(),
            name: input.name,
            issuer: input.issuer,
            date: input.date,
            expiry_date: input.expiry_date,
            credential_id: input.credential_id,
            link: input.link,
            category: input.category,
            status: input.status.unwrap_or(CertStatus::Active),
            description: input.description,
        });
        self.dirty = true;
        Ok(id)
    }

    /// # Errors
    ///
    /// [`EditError::NotFound`] for an unknown id, [`EditError::Invalid`] if
    /// name or issuer is empty or a date is not `YYYY-MM`.
    pub fn update(&mut self, id: &str, input: CertificationInput) -> Result<(), EditError> {
        Self::validate(&input)?;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        record.name = input.name;
        record.issuer = input.issuer;
        record.date = input.date;
        record.expiry_date = input.expiry_date;
        record.credential_id = input.credential_id;
        record.link = input.link;
        record.category = input.category;
        if let Some(status) = input.status {
            record.status = status;
        }
        record.description = input.description;
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    ///
    /// [`EditError::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: &str) -> Result<CertificationRecord, EditError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        self.dirty = true;
        Ok(self.records.remove(index))
    }

    pub fn save(&mut self) {
        self.dirty = false;
    }

    pub fn reset(&mut self) {
        self.records = self.original.clone();
        self.dirty = false;
    }
}

fn not_found(id: &str) -> EditError {
    EditError::NotFound {
        kind: "certification",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content_store::ContentStore;

    fn editor() -> CertificationsEditor {
        CertificationsEditor::new(ContentStore::builtin().certifications())
    }

    fn input(name: &str) -> CertificationInput {
        CertificationInput {
            name: name.to_string(),
            issuer: "Linux Foundation".to_string(),
            date: "2024-02".to_string(),
            expiry_date: Some("2027-02".to_string()),
            credential_id: None,
            link: None,
            category: CertCategory::Technical,
            status: None,
            description: String::new(),
        }
    }

    #[test]
    fn test_seed_categories_are_inferred() {
        let editor = editor();
        let categories: Vec<_> = editor.records().iter().map(|r| r.category).collect();

        assert_eq!(
            categories,
            vec![
                CertCategory::Cloud,
                CertCategory::Professional,
                CertCategory::Technical
            ]
        );
        assert!(editor.records().iter().all(|r| r.status == CertStatus::Active));
    }

    #[test]
    fn test_add_grows_by_one_and_defaults_active() {
        let mut editor = editor();
        let before = editor.records().len();

        let id = editor.add(input("CKA")).unwrap();

        assert_eq!(editor.records().len(), before + 1);
        assert_eq!(editor.find(&id).unwrap().status, CertStatus::Active);
    }

    #[test]
    fn test_update_keeps_status_when_absent() {
        let mut editor = editor();
        let mut change = input("AWS Certified Solutions Architect");
        change.status = Some(CertStatus::Expired);
        editor.update("cert-0", change).unwrap();

        editor.update("cert-0", input("Renamed")).unwrap();

        let record = editor.find("cert-0").unwrap();
        assert_eq!(record.name, "Renamed");
        assert_eq!(record.status, CertStatus::Expired);
    }

    #[test]
    fn test_dates_must_be_year_month() {
        let mut editor = editor();
        let before = editor.records().len();

        for bad in ["", "2024", "2024-13", "2024-2", "Feb 2024", "2024-02-01"] {
            let mut change = input("CKA");
            change.date = bad.to_string();
            assert!(
                matches!(editor.add(change), Err(EditError::Invalid(_))),
                "accepted date {bad:?}"
            );
        }
        let mut change = input("CKA");
        change.expiry_date = Some("someday".to_string());
        assert!(editor.update("cert-0", change).is_err());

        assert_eq!(editor.records().len(), before);
        assert!(!editor.has_changes());
        assert!(
            editor.records().iter().all(|r| is_year_month(&r.date)),
            "seeded dates are YYYY-MM"
        );
    }

    #[test]
    fn test_stats() {
        let mut editor = editor();
        let mut pending = input("CKAD");
        pending.status = Some(CertStatus::Pending);
        editor.add(pending).unwrap();

        assert_eq!(
            editor.stats(),
            CertStats {
                total: 4,
                active: 3,
                categories: 3
            }
        );
    }

    #[test]
    fn test_filters() {
        let editor = editor();

        assert_eq!(editor.filtered("asq", None, None).len(), 1);
        assert_eq!(editor.filtered("", Some(CertCategory::Cloud), None).len(), 1);
        assert!(editor.filtered("", None, Some(CertStatus::Expired)).is_empty());
    }

    #[test]
    fn test_delete_and_reset() {
        let mut editor = editor();
        let original = editor.records().to_vec();

        editor.delete("cert-1").unwrap();
        assert!(editor.delete("cert-1").is_err());
        editor.reset();

        assert_eq!(editor.records(), original.as_slice());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("cloud".parse::<CertCategory>(), Ok(CertCategory::Cloud));
        assert!("Cloud".parse::<CertCategory>().is_err());
        assert_eq!("pending".parse::<CertStatus>(), Ok(CertStatus::Pending));
    }
}
