//! Schema edit engine
//!
//! Owns one [`FormSchema`] and every mutation of it. Edits are total and
//! never fail; constraints are only enforced when saving.

use tracing::warn;

use crate::application::validation::{ValidationIssue, ValidationReport, Validator};
use crate::domain::document::FormDocument;
use crate::domain::field::FormField;
use crate::domain::options::OptionListEditor;
use crate::domain::record::{FormPayload, FormRecord};
use crate::domain::schema::{FormSchema, SchemaMeta};
use crate::error::Result;

#[derive(Debug)]
pub struct SchemaEditor {
    schema: FormSchema,
    validator: Validator,
    report: ValidationReport,
    saved_banner: bool,
    validation_summary_visible: bool,
}

impl Default for SchemaEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaEditor {
    /// Editor over a fresh, unsaved schema
    pub fn new() -> Self {
        Self::from_schema(FormSchema::default())
    }

    pub fn from_schema(mut schema: FormSchema) -> Self {
        schema.normalize();
        let validator = Validator::default();
        let report = validator.validate(&schema.fields);
        Self {
            schema,
            validator,
            report,
            saved_banner: false,
            validation_summary_visible: false,
        }
    }

    /// Editor over a persisted record, decoding its document blob
    pub fn hydrate(record: &FormRecord) -> Result<Self> {
        let document = FormDocument::from_blob(&record.schema_json)?;
        Ok(Self::from_schema(FormSchema {
            id: Some(record.id),
            title: record.title.clone(),
            description: record.description.clone(),
            fields: document.fields,
            submit_label: document.submit_label,
        }))
    }

    /// Swap the validation engine and recompute
    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self.revalidate();
        self
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn schema(&self) -> &FormSchema { &self.schema }
    pub fn into_schema(self) -> FormSchema { self.schema }
    pub fn id(&self) -> Option<i64> { self.schema.id }
    pub fn fields(&self) -> &[FormField] { &self.schema.fields }
    pub fn field(&self, index: usize) -> Option<&FormField> { self.schema.fields.get(index) }
    pub fn report(&self) -> &ValidationReport { &self.report }
    pub fn issues(&self) -> &[ValidationIssue] { &self.report.issues }
    pub fn is_valid(&self) -> bool { self.report.is_valid }
    pub fn saved_banner(&self) -> bool { self.saved_banner }
    pub fn validation_summary_visible(&self) -> bool { self.validation_summary_visible }

    pub fn committed_fields(&self) -> Vec<FormField> {
        self.schema.committed_fields()
    }

    /// Body for the gateway's create/update call
    pub fn payload(&self) -> Result<FormPayload> {
        Ok(FormPayload {
            title: self.schema.title.clone(),
            description: self.schema.description.clone(),
            schema_json: self.schema.document().to_blob()?,
        })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a text field named `field{N+1}` / labelled `Field {N+1}`.
    /// Returns the new field's index.
    pub fn add_field(&mut self) -> usize {
        let n = self.schema.fields.len() + 1;
        self.schema
            .fields
            .push(FormField::text(format!("field{}", n), format!("Field {}", n)));
        self.validation_summary_visible = false;
        self.revalidate();
        n - 1
    }

    /// Replace the field at `index`. A field flagged `remove` is dropped
    /// immediately. Out-of-range indices leave the schema untouched and
    /// return `false`.
    pub fn update_field(&mut self, index: usize, field: FormField) -> bool {
        let Some(slot) = self.schema.fields.get_mut(index) else {
            return false;
        };
        *slot = field;
        self.schema.normalize();
        self.validation_summary_visible = false;
        self.revalidate();
        true
    }

    pub fn remove_field(&mut self, index: usize) -> bool {
        match self.schema.fields.get(index) {
            Some(field) => {
                let flagged = field.clone().marked_for_removal();
                self.update_field(index, flagged)
            }
            None => false,
        }
    }

    /// Option list editor seeded from the field at `index`
    pub fn option_editor(&self, index: usize) -> Option<OptionListEditor> {
        self.field(index).map(OptionListEditor::for_field)
    }

    /// Write an option editor's committed rows back into the field at `index`
    pub fn apply_options(&mut self, index: usize, options: &OptionListEditor) -> bool {
        match self.field(index).cloned() {
            Some(field) => self.update_field(index, options.apply_to(field)),
            None => false,
        }
    }

    /// Transform title, description and submit label
    pub fn edit_meta<F>(&mut self, updater: F)
    where
        F: FnOnce(SchemaMeta) -> SchemaMeta,
    {
        let meta = updater(self.schema.meta());
        self.schema.title = meta.title;
        self.schema.description = meta.description;
        self.schema.submit_label = meta.submit_label;
        self.saved_banner = false;
        self.validation_summary_visible = false;
    }

    /// Replace the whole schema (file import)
    pub fn replace(&mut self, mut schema: FormSchema) {
        schema.normalize();
        self.schema = schema;
        self.saved_banner = false;
        self.validation_summary_visible = false;
        self.revalidate();
    }

    pub fn dismiss_saved_banner(&mut self) {
        self.saved_banner = false;
    }

    pub(crate) fn mark_save_attempt(&mut self) {
        self.validation_summary_visible = true;
    }

    pub(crate) fn mark_save_rejected(&mut self) {
        self.saved_banner = false;
    }

    /// Adopt the canonical record returned by a successful save
    pub(crate) fn adopt(&mut self, record: &FormRecord) {
        self.schema.id = Some(record.id);
        self.schema.title = record.title.clone();
        self.schema.description = record.description.clone();
        match FormDocument::from_blob(&record.schema_json) {
            Ok(document) => {
                self.schema.fields = document.fields;
                self.schema.submit_label = document.submit_label;
            }
            Err(e) => warn!(id = record.id, error = %e, "keeping local fields, stored document unreadable"),
        }
        self.schema.normalize();
        self.revalidate();
        self.saved_banner = true;
        self.validation_summary_visible = false;
    }

    fn revalidate(&mut self) {
        self.report = self.validator.validate(&self.schema.fields);
    }
}
