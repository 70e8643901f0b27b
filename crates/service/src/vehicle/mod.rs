//! Vehicle record persistence: plate keys, vehicle packages and the
//! load-all snapshot, behind the [`store::VehicleStore`] seam.

pub mod domain;
pub mod file_store;
pub mod store;

pub use domain::{DeleteRequest, DeleteStatus, LoadAllSnapshot, PlateKey, SaveRequest, VehicleItems, VehiclePackage};
pub use file_store::FileVehicleStore;
pub use store::VehicleStore;
