//! SQLite backend for the Sightline person/report ledger.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Every write executes its
//! consistency-gate checks and its mutation inside one `BEGIN IMMEDIATE`
//! transaction; SQLite's writer serialization is what makes the uniqueness
//! and referential-integrity invariants hold under concurrent callers.

mod encode;
mod gate;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
