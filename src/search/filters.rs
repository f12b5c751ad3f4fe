// src/search/filters.rs
//! Filter state: single source of truth for every search dimension

use std::collections::BTreeSet;

/// Sentinel category meaning "no category filter applied".
pub const ALL_CATEGORIES: &str = "All Categories";

/// Free-text filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    CompanyName,
    Location,
    Title,
    SearchInput,
}

/// Multi-valued filter dimensions backed by checkbox-style sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Category,
    EmploymentType,
    WorkType,
    SalaryRange,
    ExperienceRange,
}

/// A single edit to the filter state, mirroring the two operations the
/// filter widgets perform: overwrite a text field, or include/exclude a
/// set member.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEdit {
    Text(TextField, String),
    Toggle {
        field: SetField,
        value: String,
        included: bool,
    },
}

/// All user-selected filter values. Values are opaque identifiers
/// matched against server-understood vocabularies; no legality check
/// happens client-side. Ordered sets keep the serialized query
/// deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub company_name: String,
    pub location: String,
    pub title: String,
    pub search_input: String,
    pub category: BTreeSet<String>,
    pub employment_type: BTreeSet<String>,
    pub work_type: BTreeSet<String>,
    /// Buckets formatted `"<min>-<max>"`, or the open-ended `"10+"`.
    pub salary_range: BTreeSet<String>,
    pub experience_range: BTreeSet<String>,
    /// Campus-drive partner id, sourced from the route. Not editable
    /// after load.
    pub tpo_id: Option<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            location: String::new(),
            title: String::new(),
            search_input: String::new(),
            category: BTreeSet::from([ALL_CATEGORIES.to_string()]),
            employment_type: BTreeSet::new(),
            work_type: BTreeSet::new(),
            salary_range: BTreeSet::new(),
            experience_range: BTreeSet::new(),
            tpo_id: None,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tpo(tpo_id: Option<String>) -> Self {
        Self {
            tpo_id,
            ..Self::default()
        }
    }

    /// Unconditionally overwrite a text field. No validation, no
    /// coercion beyond what the caller supplies.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::CompanyName => self.company_name = value,
            TextField::Location => self.location = value,
            TextField::Title => self.title = value,
            TextField::SearchInput => self.search_input = value,
        }
    }

    /// Include or exclude a member of a set-valued field.
    pub fn toggle(&mut self, field: SetField, value: &str, included: bool) {
        let set = self.set_mut(field);
        if included {
            set.insert(value.to_string());
        } else {
            set.remove(value);
        }
    }

    pub fn apply(&mut self, edit: FilterEdit) {
        match edit {
            FilterEdit::Text(field, value) => self.set_text(field, value),
            FilterEdit::Toggle {
                field,
                value,
                included,
            } => self.toggle(field, &value, included),
        }
    }

    fn set_mut(&mut self, field: SetField) -> &mut BTreeSet<String> {
        match field {
            SetField::Category => &mut self.category,
            SetField::EmploymentType => &mut self.employment_type,
            SetField::WorkType => &mut self.work_type,
            SetField::SalaryRange => &mut self.salary_range,
            SetField::ExperienceRange => &mut self.experience_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = FilterState::new();
        assert_eq!(state.category.len(), 1);
        assert!(state.category.contains(ALL_CATEGORIES));
        assert!(state.employment_type.is_empty());
        assert!(state.salary_range.is_empty());
        assert!(state.tpo_id.is_none());
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut state = FilterState::new();
        state.toggle(SetField::EmploymentType, "full-time", true);
        state.toggle(SetField::EmploymentType, "contract", true);
        assert_eq!(state.employment_type.len(), 2);

        // Re-including an existing member never duplicates it
        state.toggle(SetField::EmploymentType, "full-time", true);
        assert_eq!(state.employment_type.len(), 2);

        state.toggle(SetField::EmploymentType, "contract", false);
        assert!(!state.employment_type.contains("contract"));
    }

    #[test]
    fn test_set_text_overwrites() {
        let mut state = FilterState::new();
        state.set_text(TextField::Location, "Pune");
        state.set_text(TextField::Location, "Bengaluru");
        assert_eq!(state.location, "Bengaluru");
    }

    #[test]
    fn test_apply_edit() {
        let mut state = FilterState::new();
        state.apply(FilterEdit::Text(TextField::SearchInput, "rust".into()));
        state.apply(FilterEdit::Toggle {
            field: SetField::WorkType,
            value: "remote".into(),
            included: true,
        });
        assert_eq!(state.search_input, "rust");
        assert!(state.work_type.contains("remote"));
    }
}
