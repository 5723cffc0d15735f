//! SQLite backend for the Mission Control record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every collection lives in one
//! `documents` table as JSON bodies; secondary indexes are SQLite expression
//! indexes over `json_extract`.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
