//! Form schema: metadata plus an ordered field list

use serde::{Deserialize, Serialize};

use crate::domain::document::FormDocument;
use crate::domain::field::FormField;

pub const DEFAULT_SUBMIT_LABEL: &str = "Submit";

/// The complete form definition.
///
/// `id` is absent until the schema has been persisted. Every top-level key
/// is optional when deserializing so partially written documents can still
/// be loaded into the editor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FormField>,
    pub submit_label: String,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: None,
            fields: Vec::new(),
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
        }
    }
}

impl FormSchema {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn meta(&self) -> SchemaMeta {
        SchemaMeta {
            title: self.title.clone(),
            description: self.description.clone(),
            submit_label: self.submit_label.clone(),
        }
    }

    /// Fields that survive normalization, in order
    pub fn committed_fields(&self) -> Vec<FormField> {
        self.fields.iter().filter(|f| !f.remove).cloned().collect()
    }

    /// Document blob stored alongside title and description
    pub fn document(&self) -> FormDocument {
        FormDocument {
            fields: self.committed_fields(),
            submit_label: self.submit_label.clone(),
        }
    }

    /// Drop fields flagged for removal, keeping the order of the rest
    pub(crate) fn normalize(&mut self) {
        self.fields.retain(|f| !f.remove);
    }
}

/// Editable metadata of a schema
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaMeta {
    pub title: String,
    pub description: Option<String>,
    pub submit_label: String,
}
