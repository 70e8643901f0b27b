use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::json_dir_store::JsonDirStore;
use crate::vehicle::domain::{DeleteStatus, LoadAllSnapshot, PlateKey, VehiclePackage};
use crate::vehicle::store::VehicleStore;

/// File-backed vehicle store: one `<plate key>.json` per record in a flat
/// directory.
#[derive(Clone)]
pub struct FileVehicleStore {
    store: Arc<JsonDirStore<Value>>,
}

impl FileVehicleStore {
    /// Open the store at `dir`. Creates the directory if missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonDirStore::<Value>::new(dir).await?;
        Ok(Arc::new(Self { store }))
    }

    pub fn path_for(&self, key: &PlateKey) -> PathBuf {
        self.store.path_for(key.as_str())
    }
}

#[async_trait]
impl VehicleStore for FileVehicleStore {
    #[instrument(skip(self, key, body), fields(key = %key))]
    async fn save(&self, key: &PlateKey, body: &Value) -> Result<PathBuf, ServiceError> {
        let path = self.store.put(key.as_str(), body).await?;
        info!(path = %path.display(), "vehicle_saved");
        Ok(path)
    }

    #[instrument(skip(self, key), fields(key = %key))]
    async fn delete(&self, key: &PlateKey) -> Result<DeleteStatus, ServiceError> {
        let status = if self.store.remove(key.as_str()).await? {
            DeleteStatus::Success
        } else {
            DeleteStatus::NotFound
        };
        info!(?status, "vehicle_delete");
        Ok(status)
    }

    #[instrument(skip(self))]
    async fn load_all(&self) -> Result<LoadAllSnapshot, ServiceError> {
        let documents = self.store.read_all().await?;
        let mut packages = Vec::with_capacity(documents.len());
        for (path, raw) in documents {
            let package: VehiclePackage =
                serde_json::from_value(raw).map_err(|e| ServiceError::malformed_record(&path, e))?;
            packages.push((path, package));
        }
        let snapshot = LoadAllSnapshot::from_packages(packages)?;
        info!(count = snapshot.vehicles.len(), "vehicles_loaded");
        Ok(snapshot)
    }
}
