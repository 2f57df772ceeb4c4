//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. The two-state lifecycle is
//! encoded as the nullable `deleted_at` column and decoded back into
//! [`Lifecycle`] on read.

use chrono::{DateTime, Utc};
use sightline_core::{
  lifecycle::Lifecycle,
  person::{Person, PersonId},
  report::{Report, ReportId},
};

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn decode_lifecycle(deleted_at: Option<&str>) -> Result<Lifecycle> {
  match deleted_at {
    None => Ok(Lifecycle::Active),
    Some(s) => Ok(Lifecycle::Deleted { at: decode_dt(s)? }),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `persons` row.
///
/// Column order is fixed: `id, name, email, created_at, updated_at,
/// deleted_at` — every `persons` SELECT in this crate uses it.
pub struct RawPerson {
  pub id:         i64,
  pub name:       String,
  pub email:      String,
  pub created_at: String,
  pub updated_at: Option<String>,
  pub deleted_at: Option<String>,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      created_at: row.get(3)?,
      updated_at: row.get(4)?,
      deleted_at: row.get(5)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         PersonId(self.id),
      name:       self.name,
      email:      self.email,
      created_at: decode_dt(&self.created_at)?,
      updated_at: self.updated_at.as_deref().map(decode_dt).transpose()?,
      lifecycle:  decode_lifecycle(self.deleted_at.as_deref())?,
    })
  }
}

/// Raw values read directly from a `reports` row.
///
/// Column order is fixed: `id, person_id, observations, evidence,
/// created_at, deleted_at`.
pub struct RawReport {
  pub id:           i64,
  pub person_id:    i64,
  pub observations: String,
  pub evidence:     String,
  pub created_at:   String,
  pub deleted_at:   Option<String>,
}

impl RawReport {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      person_id:    row.get(1)?,
      observations: row.get(2)?,
      evidence:     row.get(3)?,
      created_at:   row.get(4)?,
      deleted_at:   row.get(5)?,
    })
  }

  pub fn into_report(self) -> Result<Report> {
    Ok(Report {
      id:           ReportId(self.id),
      person_id:    PersonId(self.person_id),
      observations: self.observations,
      evidence:     self.evidence,
      created_at:   decode_dt(&self.created_at)?,
      lifecycle:    decode_lifecycle(self.deleted_at.as_deref())?,
    })
  }
}
