//! File import/export of form schemas

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::schema::FormSchema;
use crate::error::{FormsError, Result};

const FALLBACK_FILENAME: &str = "form-schema";

fn unsafe_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("static pattern"))
}

/// Serialize `{id?, title, description, fields, submitLabel}` as pretty JSON.
/// Fields flagged for removal are left out.
pub fn export_document(schema: &FormSchema) -> Result<String> {
    let exported = FormSchema {
        fields: schema.committed_fields(),
        ..schema.clone()
    };
    serde_json::to_string_pretty(&exported).map_err(|e| FormsError::Document(e.to_string()))
}

/// Download name derived from the title, e.g. `"Contact us!"` -> `Contact_us_.json`
pub fn export_filename(title: &str) -> String {
    let trimmed = title.trim();
    let sanitized = unsafe_runs().replace_all(trimmed, "_");
    let stem = if sanitized.is_empty() || sanitized == "_" {
        FALLBACK_FILENAME
    } else {
        &*sanitized
    };
    format!("{}.json", stem)
}

/// Parse an uploaded document into a schema.
///
/// Missing keys take their defaults; only malformed JSON or an unknown field
/// type is rejected.
pub fn import_document(text: &str) -> Result<FormSchema> {
    serde_json::from_str(text).map_err(|e| FormsError::ImportParse(e.to_string()))
}
