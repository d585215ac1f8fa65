//! In-memory gateway (for testing and offline drafts)

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};

use crate::domain::record::{FormPayload, FormRecord};
use crate::ports::gateway::{FormGateway, GatewayError};

/// A gateway invocation, recorded in call order
#[derive(Clone, Debug, PartialEq)]
pub enum GatewayCall {
    List,
    Get(i64),
    Create(FormPayload),
    Update(i64, FormPayload),
    Delete(i64),
}

/// Records are kept in id order; ids are assigned append-only from 1.
#[derive(Default)]
pub struct InMemoryFormGateway {
    records: RwLock<BTreeMap<i64, FormRecord>>,
    next_id: Mutex<i64>,
    calls: Mutex<Vec<GatewayCall>>,
    fail_next: Mutex<Option<GatewayError>>,
}

impl InMemoryFormGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().clone()
    }

    /// Make the next call fail with `error`
    pub fn fail_next(&self, error: GatewayError) {
        *self.fail_next.lock() = Some(error);
    }

    fn record_call(&self, call: GatewayCall) -> Result<(), GatewayError> {
        self.calls.lock().push(call);
        match self.fail_next.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn reject_incomplete(payload: &FormPayload) -> Result<(), GatewayError> {
        if payload.is_complete() {
            Ok(())
        } else {
            Err(GatewayError::Status {
                status: 400,
                message: "Title and schema_json are required".into(),
            })
        }
    }
}

#[async_trait]
impl FormGateway for InMemoryFormGateway {
    async fn list(&self) -> Result<Vec<FormRecord>, GatewayError> {
        self.record_call(GatewayCall::List)?;
        let records = self.records.read();
        let mut all: Vec<FormRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn get(&self, id: i64) -> Result<FormRecord, GatewayError> {
        self.record_call(GatewayCall::Get(id))?;
        self.records.read().get(&id).cloned().ok_or(GatewayError::NotFound(id))
    }

    async fn create(&self, payload: &FormPayload) -> Result<FormRecord, GatewayError> {
        self.record_call(GatewayCall::Create(payload.clone()))?;
        Self::reject_incomplete(payload)?;

        let id = {
            let mut next = self.next_id.lock();
            *next += 1;
            *next
        };
        let now = Utc::now();
        let record = FormRecord {
            id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            schema_json: payload.schema_json.clone(),
            created_at: now,
            updated_at: now,
        };
        self.records.write().insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, payload: &FormPayload) -> Result<FormRecord, GatewayError> {
        self.record_call(GatewayCall::Update(id, payload.clone()))?;
        Self::reject_incomplete(payload)?;

        let mut records = self.records.write();
        let record = records.get_mut(&id).ok_or(GatewayError::NotFound(id))?;
        record.title = payload.title.clone();
        record.description = payload.description.clone();
        record.schema_json = payload.schema_json.clone();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        self.record_call(GatewayCall::Delete(id))?;
        self.records.write().remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str) -> FormPayload {
        FormPayload {
            title: title.into(),
            description: None,
            schema_json: r#"{"fields":[],"submitLabel":"Submit"}"#.into(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let gateway = InMemoryFormGateway::new();
        let a = gateway.create(&payload("A")).await.unwrap();
        let b = gateway.create(&payload("B")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let gateway = InMemoryFormGateway::new();
        gateway.create(&payload("old")).await.unwrap();
        gateway.create(&payload("new")).await.unwrap();
        let titles: Vec<_> = gateway.list().await.unwrap().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_create_requires_title_and_document() {
        let gateway = InMemoryFormGateway::new();
        let err = gateway.create(&payload("")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let gateway = InMemoryFormGateway::new();
        let err = gateway.update(42, &payload("x")).await.unwrap_err();
        assert_eq!(err, GatewayError::NotFound(42));
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp() {
        let gateway = InMemoryFormGateway::new();
        let created = gateway.create(&payload("v1")).await.unwrap();
        let updated = gateway.update(created.id, &payload("v2")).await.unwrap();
        assert_eq!(updated.title, "v2");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_fail_next_applies_once() {
        let gateway = InMemoryFormGateway::new();
        gateway.fail_next(GatewayError::Transport("connection refused".into()));
        assert!(gateway.list().await.is_err());
        assert!(gateway.list().await.is_ok());
        assert_eq!(gateway.calls(), vec![GatewayCall::List, GatewayCall::List]);
    }
}
