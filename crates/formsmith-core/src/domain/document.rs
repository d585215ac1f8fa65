//! Document blob: the `{fields, submitLabel}` payload stored as an opaque
//! string next to a record's title and description.

use serde::{Deserialize, Serialize};

use crate::domain::field::FormField;
use crate::domain::schema::DEFAULT_SUBMIT_LABEL;
use crate::error::{FormsError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
}

fn default_submit_label() -> String {
    DEFAULT_SUBMIT_LABEL.to_string()
}

impl FormDocument {
    /// Encode as the compact JSON string stored in `schema_json`
    pub fn to_blob(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| FormsError::Document(e.to_string()))
    }

    /// Decode a stored blob. Unknown keys are ignored.
    pub fn from_blob(blob: &str) -> Result<Self> {
        serde_json::from_str(blob).map_err(|e| FormsError::Document(e.to_string()))
    }
}
