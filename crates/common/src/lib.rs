//! Shared helpers for the vehicle store workspace: logging setup, startup
//! environment checks and small response types used across crates.

pub mod types;
pub mod utils;
pub mod env;
