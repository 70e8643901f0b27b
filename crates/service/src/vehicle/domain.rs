use std::{fmt, path::PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Plate key used when a save request carries no `plateNumber`.
pub const DEFAULT_SAVE_KEY: &str = "unknown";
/// Plate key used when a delete request carries no `plateNumber`.
pub const DEFAULT_DELETE_KEY: &str = "";

const PLATE_FIELD: &str = "plateNumber";

/// File-name-safe storage identifier derived from a plate number.
///
/// Path separators (`/` and `\`) are replaced with `_`, so distinct plate
/// numbers may collapse onto the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlateKey(String);

impl PlateKey {
    pub fn sanitize(raw: &str) -> Self {
        Self(raw.replace(['/', '\\'], "_"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn plate_key_from(body: &Value, default: &str) -> Result<PlateKey, ServiceError> {
    let obj = body
        .as_object()
        .ok_or_else(|| ServiceError::MalformedBody("expected a JSON object".into()))?;
    match obj.get(PLATE_FIELD) {
        None => Ok(PlateKey::sanitize(default)),
        Some(Value::String(s)) => Ok(PlateKey::sanitize(s)),
        Some(other) => Err(ServiceError::MalformedBody(format!(
            "`{PLATE_FIELD}` must be a string, got {other}"
        ))),
    }
}

/// A save request: the resolved key plus the body to persist verbatim.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub key: PlateKey,
    pub body: Value,
}

impl SaveRequest {
    pub fn from_json(body: Value) -> Result<Self, ServiceError> {
        let key = plate_key_from(&body, DEFAULT_SAVE_KEY)?;
        Ok(Self { key, body })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ServiceError> {
        Self::from_json(parse_body(bytes)?)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub key: PlateKey,
}

impl DeleteRequest {
    pub fn from_json(body: &Value) -> Result<Self, ServiceError> {
        Ok(Self { key: plate_key_from(body, DEFAULT_DELETE_KEY)? })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ServiceError> {
        Self::from_json(&parse_body(bytes)?)
    }
}

fn parse_body(bytes: &[u8]) -> Result<Value, ServiceError> {
    serde_json::from_slice(bytes).map_err(|e| ServiceError::MalformedBody(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStatus {
    Success,
    NotFound,
}

/// Stored document: a vehicle object plus its opaque item entries.
///
/// Only these two fields are read back; anything else in the stored body
/// (such as `plateNumber`) is ignored on load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VehiclePackage {
    pub vehicle: Map<String, Value>,
    pub items: Vec<Value>,
}

impl VehiclePackage {
    pub fn id(&self) -> Option<&str> {
        self.vehicle.get("id").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleItems {
    pub items: Vec<Value>,
}

/// Everything in the storage directory, shaped for the front-end.
///
/// `vehicleData` keeps first-insertion order of ids, like `vehicles`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadAllSnapshot {
    pub vehicles: Vec<Map<String, Value>>,
    #[serde(rename = "vehicleData")]
    pub vehicle_data: IndexMap<String, VehicleItems>,
}

impl LoadAllSnapshot {
    /// Assemble a snapshot in the given order. A package without a string
    /// `vehicle.id` fails the whole snapshot. On duplicate ids the later
    /// package's items win while both vehicles are kept.
    pub fn from_packages<I>(packages: I) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = (PathBuf, VehiclePackage)>,
    {
        let mut snapshot = Self::default();
        for (path, package) in packages {
            let id = package
                .id()
                .ok_or_else(|| ServiceError::malformed_record(&path, "`vehicle.id` missing or not a string"))?
                .to_owned();
            snapshot.vehicles.push(package.vehicle);
            snapshot.vehicle_data.insert(id, VehicleItems { items: package.items });
        }
        Ok(snapshot)
    }
}
