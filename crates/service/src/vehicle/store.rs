use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ServiceError;
use crate::vehicle::domain::{DeleteStatus, LoadAllSnapshot, PlateKey};

/// Trait abstraction for vehicle record storage.
/// Implementations can be file-backed, database-backed, or remote KV.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Persist `body` verbatim under `key`, replacing any earlier record.
    /// Returns where the record now lives.
    async fn save(&self, key: &PlateKey, body: &Value) -> Result<PathBuf, ServiceError>;
    async fn delete(&self, key: &PlateKey) -> Result<DeleteStatus, ServiceError>;
    /// Every stored package; fails on the first malformed record.
    async fn load_all(&self) -> Result<LoadAllSnapshot, ServiceError>;
}
