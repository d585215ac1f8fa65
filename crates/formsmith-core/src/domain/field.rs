//! Form field value object
//!
//! A field is immutable-by-replacement: every `with_*` operation consumes the
//! field and returns a new value, so an owning list can detect changes by
//! structural comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::options::FieldOption;

/// The closed set of input kinds a field can render as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Email,
    Password,
    Select,
    Checkbox,
    Radio,
}

impl FieldKind {
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Text,
        FieldKind::Number,
        FieldKind::Email,
        FieldKind::Password,
        FieldKind::Select,
        FieldKind::Checkbox,
        FieldKind::Radio,
    ];

    /// Wire name, as used in the `type` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
        }
    }

    /// Kinds rendered as a plain `<input>` where `placeholder` applies
    pub fn is_text_like(&self) -> bool {
        match self {
            FieldKind::Text | FieldKind::Number | FieldKind::Email | FieldKind::Password => true,
            FieldKind::Select | FieldKind::Checkbox | FieldKind::Radio => false,
        }
    }

    /// Kinds whose `options` list is meaningful
    pub fn has_options(&self) -> bool {
        match self {
            FieldKind::Select | FieldKind::Radio => true,
            FieldKind::Text
            | FieldKind::Number
            | FieldKind::Email
            | FieldKind::Password
            | FieldKind::Checkbox => false,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldKind(pub String);

impl std::error::Error for UnknownFieldKind {}

impl fmt::Display for UnknownFieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field type: {}", self.0)
    }
}

impl FromStr for FieldKind {
    type Err = UnknownFieldKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| UnknownFieldKind(s.to_string()))
    }
}

/// Conditional display hint: show this field when `field` equals `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDependency {
    pub field: String,
    pub value: String,
}

/// One input element definition within a form schema.
///
/// Kind-specific attributes (`options`, `default_value`, `placeholder`) are
/// optional and are only meaningful for the kinds that use them. Absent
/// attributes are omitted from the serialized document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<FieldDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<bool>,
    /// Transient removal marker, never persisted
    #[serde(default, skip_serializing)]
    pub remove: bool,
}

impl FormField {
    /// Create a field of the given kind
    pub fn new(kind: FieldKind, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(FieldKind::Text, name, label)
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Committed options, or an empty slice when none are set
    pub fn options(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Change the field kind.
    ///
    /// Attributes specific to the previous kind are carried over unchanged:
    /// switching a `select` to `text` leaves its `options` present but inert,
    /// and switching back restores them.
    #[must_use]
    pub fn with_kind(self, kind: FieldKind) -> Self {
        Self { kind, ..self }
    }

    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self { name: name.into(), ..self }
    }

    #[must_use]
    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self { label: label.into(), ..self }
    }

    #[must_use]
    pub fn with_required(self, required: bool) -> Self {
        Self { required: Some(required), ..self }
    }

    #[must_use]
    pub fn with_placeholder(self, placeholder: Option<String>) -> Self {
        Self { placeholder, ..self }
    }

    #[must_use]
    pub fn with_pattern(self, pattern: Option<String>) -> Self {
        Self { pattern, ..self }
    }

    #[must_use]
    pub fn with_options(self, options: Vec<FieldOption>) -> Self {
        Self { options: Some(options), ..self }
    }

    #[must_use]
    pub fn with_default_value(self, default_value: Option<bool>) -> Self {
        Self { default_value, ..self }
    }

    #[must_use]
    pub fn with_dependency(self, depends_on: Option<FieldDependency>) -> Self {
        Self { depends_on, ..self }
    }

    /// Flag the field for deletion on the owning schema's next normalization
    #[must_use]
    pub fn marked_for_removal(self) -> Self {
        Self { remove: true, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_field_serializes_without_optional_attributes() {
        let field = FormField::text("a", "A");
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"type":"text","name":"a","label":"A"}"#);
    }

    #[test]
    fn test_remove_flag_is_not_serialized() {
        let field = FormField::text("a", "A").marked_for_removal();
        let json = serde_json::to_string(&field).unwrap();
        assert!(!json.contains("remove"));
    }

    #[test]
    fn test_camel_case_attributes() {
        let field = FormField::new(FieldKind::Checkbox, "terms", "Accept terms")
            .with_default_value(Some(true))
            .with_dependency(Some(FieldDependency { field: "country".into(), value: "de".into() }));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["defaultValue"], true);
        assert_eq!(json["dependsOn"]["field"], "country");
    }

    #[test]
    fn test_kind_change_keeps_stale_options() {
        let field = FormField::new(FieldKind::Select, "color", "Color")
            .with_options(vec![FieldOption::new("Red", "red")]);
        let text = field.with_kind(FieldKind::Text);
        assert_eq!(text.kind, FieldKind::Text);
        assert_eq!(text.options().len(), 1);
        assert!(!text.kind.has_options());

        let back = text.with_kind(FieldKind::Radio);
        assert_eq!(back.options()[0].value, "red");
    }

    #[test]
    fn test_with_operations_return_new_values() {
        let original = FormField::text("a", "A");
        let changed = original.clone().with_label("B").with_required(true);
        assert_eq!(original.label, "A");
        assert!(!original.is_required());
        assert_eq!(changed.label, "B");
        assert!(changed.is_required());
        assert_ne!(original, changed);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Select".parse::<FieldKind>().unwrap(), FieldKind::Select);
        assert_eq!(" radio ".parse::<FieldKind>().unwrap(), FieldKind::Radio);
        assert!("textarea".parse::<FieldKind>().is_err());
    }

    #[test]
    fn test_kind_classification() {
        let text_like: Vec<_> = FieldKind::ALL.iter().filter(|k| k.is_text_like()).collect();
        assert_eq!(text_like.len(), 4);
        assert!(FieldKind::Select.has_options());
        assert!(FieldKind::Radio.has_options());
        assert!(!FieldKind::Checkbox.has_options());
    }

    #[test]
    fn test_deserialize_accepts_remove_flag() {
        let field: FormField =
            serde_json::from_str(r#"{"type":"email","name":"e","label":"E","remove":true}"#).unwrap();
        assert_eq!(field.kind, FieldKind::Email);
        assert!(field.remove);
    }
}
