//! Validation engine
//!
//! Derives an ordered list of issues from a field list. The default engine
//! only enforces option-value uniqueness within each choice field;
//! [`Validator::strict`] enables the full rule set.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::domain::field::FormField;
use crate::domain::options::{check_options, OptionIssue};

/// One problem attached to a field
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub index: usize,
    pub label: String,
    pub issue: String,
}

impl ValidationIssue {
    pub fn new(index: usize, field: &FormField, issue: impl Into<String>) -> Self {
        Self { index, label: field.label.clone(), issue: issue.into() }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.issue)
    }
}

/// Result of one validation pass
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub is_valid: bool,
}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let is_valid = issues.is_empty();
        Self { issues, is_valid }
    }
}

/// A cross-field rule. Rules append issues in field order.
pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, fields: &[FormField], issues: &mut Vec<ValidationIssue>);
}

/// Ordered set of rules applied to a field list
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for Validator {
    /// Option values must be unique within a field, whatever the strictness
    fn default() -> Self {
        Self::empty().with_rule(UniqueOptionValues)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter().map(|r| r.name())).finish()
    }
}

impl Validator {
    /// No rules at all
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Every built-in rule
    pub fn strict() -> Self {
        Self::default()
            .with_rule(RequiredName)
            .with_rule(RequiredLabel)
            .with_rule(UniqueNames)
            .with_rule(ChoiceOptions)
            .with_rule(PatternCompiles)
    }

    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule, then order issues by field index (stable per field)
    pub fn validate(&self, fields: &[FormField]) -> ValidationReport {
        let mut issues = Vec::new();
        for rule in &self.rules {
            rule.check(fields, &mut issues);
        }
        issues.sort_by_key(|issue| issue.index);
        ValidationReport::from_issues(issues)
    }
}

fn live_fields(fields: &[FormField]) -> impl Iterator<Item = (usize, &FormField)> {
    fields.iter().enumerate().filter(|(_, f)| !f.remove)
}

/// Field names must be non-empty
pub struct RequiredName;

impl ValidationRule for RequiredName {
    fn name(&self) -> &'static str {
        "required-name"
    }

    fn check(&self, fields: &[FormField], issues: &mut Vec<ValidationIssue>) {
        for (index, field) in live_fields(fields) {
            if field.name.trim().is_empty() {
                issues.push(ValidationIssue::new(index, field, "Name required"));
            }
        }
    }
}

/// Field labels must be non-empty
pub struct RequiredLabel;

impl ValidationRule for RequiredLabel {
    fn name(&self) -> &'static str {
        "required-label"
    }

    fn check(&self, fields: &[FormField], issues: &mut Vec<ValidationIssue>) {
        for (index, field) in live_fields(fields) {
            if field.label.trim().is_empty() {
                issues.push(ValidationIssue::new(index, field, "Label required"));
            }
        }
    }
}

/// Field names must be unique within the schema; later occurrences are flagged
pub struct UniqueNames;

impl ValidationRule for UniqueNames {
    fn name(&self) -> &'static str {
        "unique-names"
    }

    fn check(&self, fields: &[FormField], issues: &mut Vec<ValidationIssue>) {
        let mut seen = HashSet::new();
        for (index, field) in live_fields(fields) {
            if field.name.trim().is_empty() {
                continue;
            }
            if !seen.insert(field.name.as_str()) {
                issues.push(ValidationIssue::new(index, field, "Duplicate field name"));
            }
        }
    }
}

/// Select and radio fields need at least one committed option
pub struct ChoiceOptions;

impl ValidationRule for ChoiceOptions {
    fn name(&self) -> &'static str {
        "choice-options"
    }

    fn check(&self, fields: &[FormField], issues: &mut Vec<ValidationIssue>) {
        for (index, field) in live_fields(fields) {
            if field.kind.has_options() && field.options().is_empty() {
                issues.push(ValidationIssue::new(index, field, "At least one option required"));
            }
        }
    }
}

/// Option values must be unique within each select/radio field.
/// Options written without the option list editor (imports, direct field
/// replacement) are caught here.
pub struct UniqueOptionValues;

impl ValidationRule for UniqueOptionValues {
    fn name(&self) -> &'static str {
        "unique-option-values"
    }

    fn check(&self, fields: &[FormField], issues: &mut Vec<ValidationIssue>) {
        for (index, field) in live_fields(fields) {
            if !field.kind.has_options() {
                continue;
            }
            if check_options(field.options()).contains(&Some(OptionIssue::DuplicateValue)) {
                issues.push(ValidationIssue::new(index, field, OptionIssue::DuplicateValue.to_string()));
            }
        }
    }
}

/// A `pattern` attribute must be a valid regular expression
pub struct PatternCompiles;

impl ValidationRule for PatternCompiles {
    fn name(&self) -> &'static str {
        "pattern-compiles"
    }

    fn check(&self, fields: &[FormField], issues: &mut Vec<ValidationIssue>) {
        for (index, field) in live_fields(fields) {
            if let Some(pattern) = field.pattern.as_deref() {
                if Regex::new(pattern).is_err() {
                    issues.push(ValidationIssue::new(index, field, "Invalid pattern"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::FieldKind;
    use crate::domain::options::FieldOption;

    #[test]
    fn test_default_validator_allows_loose_fields() {
        let fields = vec![FormField::text("", ""), FormField::text("", "")];
        let report = Validator::default().validate(&fields);
        assert!(report.is_valid);
        assert!(report.issues.is_empty());
        assert_eq!(Validator::default().rule_names(), vec!["unique-option-values"]);
        assert!(Validator::empty().rule_names().is_empty());
    }

    #[test]
    fn test_default_validator_rejects_duplicate_option_values() {
        let fields = vec![
            FormField::new(FieldKind::Select, "color", "Color")
                .with_options(vec![FieldOption::new("Red", "x"), FieldOption::new("Blue", "x")]),
            FormField::new(FieldKind::Radio, "size", "Size")
                .with_options(vec![FieldOption::new("S", "s"), FieldOption::new("M", "m")]),
        ];
        let report = Validator::default().validate(&fields);
        assert_eq!(
            report.issues,
            vec![ValidationIssue { index: 0, label: "Color".into(), issue: "Duplicate value".into() }]
        );
    }

    #[test]
    fn test_stale_options_on_non_choice_field_are_ignored() {
        let field = FormField::new(FieldKind::Select, "s", "S")
            .with_options(vec![FieldOption::new("A", "x"), FieldOption::new("B", "x")])
            .with_kind(FieldKind::Text);
        assert!(Validator::default().validate(&[field]).is_valid);
    }

    #[test]
    fn test_strict_duplicate_names_flag_later_occurrence() {
        let fields = vec![FormField::text("email", "Email"), FormField::text("email", "Email again")];
        let report = Validator::strict().validate(&fields);
        assert!(!report.is_valid);
        assert_eq!(
            report.issues,
            vec![ValidationIssue { index: 1, label: "Email again".into(), issue: "Duplicate field name".into() }]
        );
    }

    #[test]
    fn test_strict_issues_sorted_by_field_index() {
        let fields = vec![
            FormField::new(FieldKind::Select, "pick", "Pick"),
            FormField::text("", "Nameless"),
            FormField::text("x", "").with_pattern(Some("(".into())),
        ];
        let report = Validator::strict().validate(&fields);
        let summary: Vec<_> = report.issues.iter().map(|i| (i.index, i.issue.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (0, "At least one option required"),
                (1, "Name required"),
                (2, "Label required"),
                (2, "Invalid pattern"),
            ]
        );
    }

    #[test]
    fn test_strict_accepts_well_formed_fields() {
        let fields = vec![
            FormField::text("first", "First").with_pattern(Some("^[A-Z]".into())),
            FormField::new(FieldKind::Radio, "size", "Size").with_options(vec![FieldOption::new("S", "s")]),
        ];
        assert!(Validator::strict().validate(&fields).is_valid);
    }

    #[test]
    fn test_removed_fields_are_skipped() {
        let fields = vec![FormField::text("a", "A"), FormField::text("a", "A").marked_for_removal()];
        assert!(Validator::strict().validate(&fields).is_valid);
    }

    #[test]
    fn test_custom_rule() {
        struct NoPasswords;
        impl ValidationRule for NoPasswords {
            fn name(&self) -> &'static str {
                "no-passwords"
            }
            fn check(&self, fields: &[FormField], issues: &mut Vec<ValidationIssue>) {
                for (index, field) in fields.iter().enumerate() {
                    if field.kind == FieldKind::Password {
                        issues.push(ValidationIssue::new(index, field, "Passwords not allowed"));
                    }
                }
            }
        }

        let validator = Validator::empty().with_rule(NoPasswords);
        assert_eq!(validator.rule_names(), vec!["no-passwords"]);
        let report = validator.validate(&[FormField::new(FieldKind::Password, "pw", "Password")]);
        assert_eq!(report.issues[0].to_string(), "Password: Passwords not allowed");
    }
}
