//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores that persist JSON documents to disk.

pub mod json_dir_store;
