//! Core types and trait definitions for the Sightline person/report ledger.
//!
//! This crate is deliberately free of database dependencies. The storage
//! backend (`sightline-store-sqlite`) and the embedding service both depend
//! on it; it depends on nothing heavier than `chrono` and `serde`.

pub mod error;
pub mod lifecycle;
pub mod person;
pub mod report;
pub mod store;

pub use error::{Error, Result};
