//! Error types for the form edit model

use thiserror::Error;

use crate::application::validation::ValidationIssue;
use crate::ports::gateway::GatewayError;

/// Errors surfaced by the save protocol, import, and record hydration.
///
/// `EmptyForm`, `Validation` and `MissingTitle` are raised locally before
/// any gateway call is made.
#[derive(Error, Debug)]
pub enum FormsError {
    #[error("Cannot save an empty form. Add at least one field before saving")]
    EmptyForm,

    #[error("Please fix validation errors before saving ({} issue(s))", issues.len())]
    Validation { issues: Vec<ValidationIssue> },

    #[error("Form title is required")]
    MissingTitle,

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("Persistence error: {0}")]
    Persistence(#[from] GatewayError),

    #[error("Invalid form document: {0}")]
    ImportParse(String),

    #[error("Stored document is malformed: {0}")]
    Document(String),
}

pub type Result<T> = std::result::Result<T, FormsError>;
