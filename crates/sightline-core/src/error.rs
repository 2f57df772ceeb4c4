//! Error taxonomy for the ledger.
//!
//! Every failed write reports exactly one of these kinds with no partial
//! effect. Soft-deleting an already-deleted record is deliberately NOT an
//! error; both soft-delete operations are idempotent.

use thiserror::Error;

use crate::{person::PersonId, report::ReportId};

#[derive(Debug, Error)]
pub enum Error {
  /// The person id was never assigned.
  #[error("person not found: {0}")]
  PersonNotFound(PersonId),

  /// The report id was never assigned.
  #[error("report not found: {0}")]
  ReportNotFound(ReportId),

  /// An active person already holds this email.
  #[error("email already in use: {0}")]
  DuplicateEmail(String),

  /// Reports cannot be filed against a retired person.
  #[error("person {0} is deleted")]
  PersonDeleted(PersonId),

  /// A retired person accepts no mutation other than (idempotent) deletion.
  #[error("person {0} is already deleted")]
  AlreadyDeleted(PersonId),

  /// A required field was empty or the input was otherwise malformed.
  #[error("invalid input: {0}")]
  InvalidInput(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
