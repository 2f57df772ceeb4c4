//! Person records and their input types.
//!
//! A person owns identity metadata only; the observation reports filed
//! against a person live in the report ledger and reference it by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, lifecycle::Lifecycle};

/// Store-assigned surrogate identity, monotonically increasing per table.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl std::fmt::Display for PersonId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

/// A person identity record.
///
/// `id` and `created_at` never change after creation. `updated_at` is
/// stamped on every content mutation; `None` means never modified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub id:         PersonId,
  pub name:       String,
  /// Contact identifier; unique among active persons (case-sensitive).
  pub email:      String,
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
  pub lifecycle:  Lifecycle,
}

/// Input to [`crate::store::RecordStore::create_person`].
/// Identity and timestamps are always assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
  pub name:  String,
  pub email: String,
}

impl NewPerson {
  /// Reject empty required fields before any storage work happens.
  pub fn validate(&self) -> Result<()> {
    validate_name(&self.name)?;
    validate_email(&self.email)
  }
}

/// Partial update for a person; `None` means "leave unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonUpdate {
  pub name:  Option<String>,
  pub email: Option<String>,
}

impl PersonUpdate {
  /// An update must touch at least one field, and any field it touches must
  /// pass the same checks as creation.
  pub fn validate(&self) -> Result<()> {
    if self.name.is_none() && self.email.is_none() {
      return Err(Error::InvalidInput("no fields to update"));
    }
    if let Some(name) = &self.name {
      validate_name(name)?;
    }
    if let Some(email) = &self.email {
      validate_email(email)?;
    }
    Ok(())
  }
}

fn validate_name(name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(Error::InvalidInput("name must not be empty"));
  }
  Ok(())
}

// Full address validation belongs to the service edge; the ledger keeps the
// cheap structural check so garbage never reaches the uniqueness index.
fn validate_email(email: &str) -> Result<()> {
  if email.trim().is_empty() {
    return Err(Error::InvalidInput("email must not be empty"));
  }
  if !email.contains('@') {
    return Err(Error::InvalidInput("email must contain '@'"));
  }
  Ok(())
}
