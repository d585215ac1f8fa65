//! Option lists for choice fields (select/radio)
//!
//! The editor keeps every row the user is working on, including incomplete
//! ones, but only *committed* rows (non-empty label and value, no issue) are
//! emitted back to the owning field.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::field::FormField;

/// A label/value pair offered by a choice field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Problem found on a single option row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OptionIssue {
    LabelRequired,
    ValueRequired,
    DuplicateValue,
}

impl fmt::Display for OptionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LabelRequired => write!(f, "Label required"),
            Self::ValueRequired => write!(f, "Value required"),
            Self::DuplicateValue => write!(f, "Duplicate value"),
        }
    }
}

/// Check every row in order.
///
/// The first failing rule wins per row. A value counts as a duplicate only
/// against earlier rows that passed.
pub fn check_options(options: &[FieldOption]) -> Vec<Option<OptionIssue>> {
    let mut seen: HashSet<&str> = HashSet::new();
    options
        .iter()
        .map(|opt| {
            if opt.label.trim().is_empty() {
                Some(OptionIssue::LabelRequired)
            } else if opt.value.trim().is_empty() {
                Some(OptionIssue::ValueRequired)
            } else if !seen.insert(opt.value.as_str()) {
                Some(OptionIssue::DuplicateValue)
            } else {
                None
            }
        })
        .collect()
}

/// Working copy of one field's option rows with live issue annotations.
///
/// Never holds zero rows.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionListEditor {
    rows: Vec<FieldOption>,
    issues: Vec<Option<OptionIssue>>,
}

impl OptionListEditor {
    pub fn new(options: &[FieldOption]) -> Self {
        let rows = if options.is_empty() {
            vec![FieldOption::empty()]
        } else {
            options.to_vec()
        };
        let issues = check_options(&rows);
        Self { rows, issues }
    }

    /// Seed the editor from a field's committed options
    pub fn for_field(field: &FormField) -> Self {
        Self::new(field.options())
    }

    pub fn rows(&self) -> &[FieldOption] {
        &self.rows
    }

    /// Issue annotation per row, aligned with [`rows`](Self::rows)
    pub fn issues(&self) -> &[Option<OptionIssue>] {
        &self.issues
    }

    pub fn issue(&self, index: usize) -> Option<OptionIssue> {
        self.issues.get(index).copied().flatten()
    }

    pub fn is_valid(&self) -> bool {
        self.issues.iter().all(Option::is_none)
    }

    /// Rows eligible for propagation to the owning field
    pub fn committed(&self) -> Vec<FieldOption> {
        self.rows
            .iter()
            .zip(&self.issues)
            .filter(|(opt, issue)| issue.is_none() && !opt.label.is_empty() && !opt.value.is_empty())
            .map(|(opt, _)| opt.clone())
            .collect()
    }

    /// Update one row's label and return the committed list
    pub fn set_label(&mut self, index: usize, text: impl Into<String>) -> Vec<FieldOption> {
        if let Some(row) = self.rows.get_mut(index) {
            row.label = text.into();
            self.revalidate();
        }
        self.committed()
    }

    /// Update one row's value and return the committed list
    pub fn set_value(&mut self, index: usize, text: impl Into<String>) -> Vec<FieldOption> {
        if let Some(row) = self.rows.get_mut(index) {
            row.value = text.into();
            self.revalidate();
        }
        self.committed()
    }

    /// Append an empty row for editing
    pub fn add_option(&mut self) -> Vec<FieldOption> {
        self.rows.push(FieldOption::empty());
        self.revalidate();
        self.committed()
    }

    /// Remove a row; removing the last one leaves a single empty row
    pub fn remove_option(&mut self, index: usize) -> Vec<FieldOption> {
        if index < self.rows.len() {
            self.rows.remove(index);
            if self.rows.is_empty() {
                self.rows.push(FieldOption::empty());
            }
            self.revalidate();
        }
        self.committed()
    }

    /// Write the committed rows into `field`, returning the new field
    pub fn apply_to(&self, field: FormField) -> FormField {
        field.with_options(self.committed())
    }

    fn revalidate(&mut self) {
        self.issues = check_options(&self.rows);
    }
}
