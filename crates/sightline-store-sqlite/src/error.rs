//! Error type for `sightline-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A ledger-level outcome: not-found, duplicate email, deleted-person
  /// policy violation, invalid input.
  #[error("ledger error: {0}")]
  Ledger(#[from] sightline_core::Error),

  /// Another writer held the database when this transaction tried to start
  /// or commit. Nothing was written; the caller may retry the whole
  /// operation.
  #[error("database contended: {0}")]
  Contended(rusqlite::Error),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl Error {
  /// True for transient failures where retrying the whole operation is the
  /// right response.
  pub fn is_retriable(&self) -> bool { matches!(self, Self::Contended(_)) }
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match e {
      tokio_rusqlite::Error::Rusqlite(inner) if is_busy(&inner) => {
        Self::Contended(inner)
      }
      other => Self::Database(other),
    }
  }
}

fn is_busy(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(
      rusqlite::ffi::Error {
        code: rusqlite::ErrorCode::DatabaseBusy
          | rusqlite::ErrorCode::DatabaseLocked,
        ..
      },
      _,
    )
  )
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
