//! Service layer for the vehicle record store.
//! - `storage` holds the generic one-file-per-key JSON directory store.
//! - `vehicle` holds the domain types, the `VehicleStore` seam and its
//!   file-backed implementation.
//! - `errors` defines the error type shared by both.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod vehicle;

#[cfg(test)]
pub mod test_support;
