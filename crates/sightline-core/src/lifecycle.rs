//! The two-state record lifecycle shared by persons and reports.
//!
//! Soft deletion is a one-way transition: once a record is `Deleted` it never
//! becomes `Active` again, and its deletion timestamp never changes. The
//! timestamp is metadata about when the transition happened, not an ordinary
//! nullable business field to compare against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a record is live or has been retired, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Lifecycle {
  Active,
  Deleted { at: DateTime<Utc> },
}

impl Lifecycle {
  pub fn is_active(&self) -> bool { matches!(self, Self::Active) }

  /// The deletion timestamp, if the record has been retired.
  pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
    match self {
      Self::Active => None,
      Self::Deleted { at } => Some(*at),
    }
  }
}
