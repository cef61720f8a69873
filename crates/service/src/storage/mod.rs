//! Storage abstractions for service layer
//!
//! Contains the file-backed list store every repository is built on.

pub mod json_list_store;

pub use json_list_store::{JsonListStore, WriteMode};
