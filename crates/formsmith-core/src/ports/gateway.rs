//! Outbound persistence port
//!
//! CRUD over the single form collection, keyed by numeric id.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::record::{FormPayload, FormRecord};

/// Persistence gateway port
#[async_trait]
pub trait FormGateway: Send + Sync {
    /// All records, newest first by creation time
    async fn list(&self) -> Result<Vec<FormRecord>, GatewayError>;

    /// One record, or `GatewayError::NotFound`
    async fn get(&self, id: i64) -> Result<FormRecord, GatewayError>;

    /// Store a new record; the store assigns id and timestamps
    async fn create(&self, payload: &FormPayload) -> Result<FormRecord, GatewayError>;

    /// Replace an existing record and refresh its modification timestamp
    async fn update(&self, id: i64, payload: &FormPayload) -> Result<FormRecord, GatewayError>;

    async fn delete(&self, id: i64) -> Result<(), GatewayError>;
}

/// Gateway error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("form {0} not found")]
    NotFound(i64),

    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),
}
