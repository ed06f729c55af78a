//! NailAide Storage crate - durable key-value persistence for chat state.
//!
//! Provides a WAL-mode SQLite database with migrations, the
//! [`KeyValueStore`] abstraction the context tracker persists through, and
//! an in-memory store for tests and `--in-memory` runs.

pub mod db;
pub mod kv;
pub mod migrations;

pub use db::Database;
pub use kv::{KeyValueStore, MemoryStore};
