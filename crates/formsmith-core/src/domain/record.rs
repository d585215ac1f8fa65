//! Persisted record wire shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored form as returned by the persistence service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// JSON-encoded `{fields, submitLabel}`
    pub schema_json: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body sent on create and update
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema_json: String,
}

impl FormPayload {
    /// Title and document are both present
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.schema_json.is_empty()
    }
}
