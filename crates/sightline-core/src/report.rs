//! Observation reports — append-only records referencing exactly one person.
//!
//! A report is immutable once created apart from soft deletion; there is no
//! `updated_at`. The `observations` and `evidence` payloads are produced by
//! the external vision pipeline and are opaque to the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, lifecycle::Lifecycle, person::PersonId};

/// Store-assigned surrogate identity, monotonically increasing per table.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReportId(pub i64);

impl std::fmt::Display for ReportId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

/// An observation report filed against a person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
  pub id:           ReportId,
  /// The person this report was filed against; immutable, and guaranteed to
  /// have referenced an existing active person at creation time.
  pub person_id:    PersonId,
  /// Opaque payload describing what was observed.
  pub observations: String,
  /// Opaque payload referencing supporting media.
  pub evidence:     String,
  pub created_at:   DateTime<Utc>,
  pub lifecycle:    Lifecycle,
}

/// Input to [`crate::store::RecordStore::create_report`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
  pub person_id:    PersonId,
  pub observations: String,
  pub evidence:     String,
}

impl NewReport {
  /// `evidence` is required; `observations` may be empty.
  pub fn validate(&self) -> Result<()> {
    if self.evidence.trim().is_empty() {
      return Err(Error::InvalidInput("evidence must not be empty"));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::NewReport;
  use crate::{Error, person::PersonId};

  #[test]
  fn evidence_is_required() {
    let input = NewReport {
      person_id:    PersonId(1),
      observations: "loitering near gate 4".into(),
      evidence:     "".into(),
    };
    assert!(matches!(input.validate(), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn observations_may_be_empty() {
    let input = NewReport {
      person_id:    PersonId(1),
      observations: String::new(),
      evidence:     "evidence/7f3a.jpg".into(),
    };
    assert!(input.validate().is_ok());
  }
}
