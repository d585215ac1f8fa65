//! Formsmith Core
//!
//! Edit model for data-entry form schemas: the field model, option list
//! editing, schema mutation, validation, and the save protocol that hands a
//! finished schema to a persistence gateway.
//!
//! ## Architecture
//!
//! - **Domain Layer**: fields, options, schemas, document blobs, records
//! - **Ports Layer**: the outbound [`FormGateway`] trait
//! - **Application Layer**: schema editor, validation engine, save service,
//!   file import/export, preview rendering
//! - **Infrastructure Layer**: in-memory and HTTP gateway implementations
//!
//! ## Flow
//!
//! ```text
//! SchemaEditor ──mutate──▶ Validator (recomputed on every field change)
//!      │
//!      └──save──▶ FormService ──payload──▶ FormGateway ──▶ storage
//!                      ◀──────── canonical FormRecord ◀────────┘
//! ```

pub mod domain;
pub mod ports;
pub mod application;
pub mod infrastructure;
pub mod error;

pub use domain::field::{FieldDependency, FieldKind, FormField};
pub use domain::options::{check_options, FieldOption, OptionIssue, OptionListEditor};
pub use domain::schema::{FormSchema, SchemaMeta, DEFAULT_SUBMIT_LABEL};
pub use domain::document::FormDocument;
pub use domain::record::{FormPayload, FormRecord};
pub use ports::gateway::{FormGateway, GatewayError};
pub use application::editor::SchemaEditor;
pub use application::validation::{ValidationIssue, ValidationReport, ValidationRule, Validator};
pub use application::service::FormService;
pub use application::transfer::{export_document, export_filename, import_document};
pub use application::preview::{render_html, FormPreview};
pub use infrastructure::memory::{GatewayCall, InMemoryFormGateway};
pub use infrastructure::http::HttpFormGateway;
pub use error::{FormsError, Result};
