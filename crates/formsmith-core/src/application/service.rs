//! Save protocol and remote form operations
//!
//! `FormService` checks save preconditions locally, then hands the schema to
//! the gateway. Only one save may be outstanding per service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::editor::SchemaEditor;
use crate::application::validation::Validator;
use crate::domain::record::FormRecord;
use crate::error::{FormsError, Result};
use crate::ports::gateway::FormGateway;

/// Form application service
pub struct FormService {
    gateway: Arc<dyn FormGateway>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the save finishes, however it finishes
struct SaveSlot<'a>(&'a AtomicBool);

impl<'a> SaveSlot<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SaveSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FormService {
    pub fn new(gateway: Arc<dyn FormGateway>) -> Self {
        Self { gateway, in_flight: AtomicBool::new(false) }
    }

    pub fn gateway(&self) -> &Arc<dyn FormGateway> {
        &self.gateway
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Persist the editor's schema.
    ///
    /// Preconditions, in order: at least one field, no validation issues, a
    /// non-blank title. A schema with an id is updated, otherwise created.
    /// On success the editor adopts the returned record; on failure the
    /// editor's schema is left as it was.
    pub async fn save(&self, editor: &mut SchemaEditor) -> Result<FormRecord> {
        editor.mark_save_attempt();

        if editor.committed_fields().is_empty() {
            warn!("save rejected: form has no fields");
            return Err(FormsError::EmptyForm);
        }
        if !editor.is_valid() {
            editor.mark_save_rejected();
            warn!(issues = editor.issues().len(), "save rejected: validation issues outstanding");
            return Err(FormsError::Validation { issues: editor.issues().to_vec() });
        }
        if editor.schema().title.trim().is_empty() {
            warn!("save rejected: missing title");
            return Err(FormsError::MissingTitle);
        }

        let _slot = SaveSlot::acquire(&self.in_flight).ok_or(FormsError::SaveInProgress)?;
        let payload = editor.payload()?;

        let record = match editor.id() {
            Some(id) => self.gateway.update(id, &payload).await?,
            None => self.gateway.create(&payload).await?,
        };

        info!(id = record.id, title = %record.title, "form schema saved");
        editor.adopt(&record);
        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<FormRecord>> {
        Ok(self.gateway.list().await?)
    }

    pub async fn fetch(&self, id: i64) -> Result<FormRecord> {
        Ok(self.gateway.get(id).await?)
    }

    /// Load a stored form into a new editor
    pub async fn open(&self, id: i64, validator: Validator) -> Result<SchemaEditor> {
        let record = self.gateway.get(id).await?;
        Ok(SchemaEditor::hydrate(&record)?.with_validator(validator))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.gateway.delete(id).await?;
        info!(id, "form schema deleted");
        Ok(())
    }
}
