//! The consistency gate — invariant probes shared by the write paths.
//!
//! Every function takes a plain [`rusqlite::Connection`] reference so it
//! composes into whatever transaction the caller has open; a gate check is
//! only meaningful when the subsequent insert or update commits in the same
//! transaction.

use rusqlite::OptionalExtension as _;
use sightline_core::person::PersonId;

/// What the gate knows about a person id inside the current transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonState {
  /// The id was never assigned.
  Missing,
  Active,
  Deleted,
}

/// Case-sensitive exact match over active persons, optionally excluding the
/// record being updated.
pub fn email_in_use(
  conn: &rusqlite::Connection,
  email: &str,
  excluding: Option<PersonId>,
) -> rusqlite::Result<bool> {
  let hit: Option<i64> = match excluding {
    Some(PersonId(id)) => conn
      .query_row(
        "SELECT id FROM persons
         WHERE email = ?1 AND deleted_at IS NULL AND id != ?2",
        rusqlite::params![email, id],
        |row| row.get(0),
      )
      .optional()?,
    None => conn
      .query_row(
        "SELECT id FROM persons WHERE email = ?1 AND deleted_at IS NULL",
        rusqlite::params![email],
        |row| row.get(0),
      )
      .optional()?,
  };
  Ok(hit.is_some())
}

/// Existence and lifecycle state of a person in one probe.
pub fn person_state(
  conn: &rusqlite::Connection,
  id: PersonId,
) -> rusqlite::Result<PersonState> {
  let deleted_at: Option<Option<String>> = conn
    .query_row(
      "SELECT deleted_at FROM persons WHERE id = ?1",
      rusqlite::params![id.0],
      |row| row.get(0),
    )
    .optional()?;

  Ok(match deleted_at {
    None => PersonState::Missing,
    Some(None) => PersonState::Active,
    Some(Some(_)) => PersonState::Deleted,
  })
}
