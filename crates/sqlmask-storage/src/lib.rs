//! Storage layer for sqlmask
//!
//! This crate provides:
//! - SQLite persistence of mask/restore history
//! - Schema migration on open

pub mod db;
pub mod error;

pub use db::Storage;
pub use error::{Result, StorageError};
