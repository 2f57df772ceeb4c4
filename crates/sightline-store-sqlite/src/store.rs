//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].
//!
//! Write methods run gate checks and the mutation inside a single
//! `BEGIN IMMEDIATE` transaction. SQLite admits one writer at a time, so a
//! check that passes inside the transaction still holds when the mutation
//! commits — two concurrent creates with the same email cannot both pass.

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, TransactionBehavior};
use sightline_core::{
  Error as LedgerError,
  person::{NewPerson, Person, PersonId, PersonUpdate},
  report::{NewReport, Report, ReportId},
  store::RecordStore,
};

use crate::{
  Error, Result,
  encode::{RawPerson, RawReport, encode_dt},
  gate::{self, PersonState},
  schema::SCHEMA,
};

/// Outcome of a write transaction. Ledger-level failures travel out of the
/// [`tokio_rusqlite::Connection::call`] closure separately from storage
/// failures, so `DuplicateEmail` never masquerades as a database error.
type TxOutcome<T> = std::result::Result<T, LedgerError>;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Sightline ledger backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is channel-backed and shared.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_owned();
    tracing::info!(path = %path.display(), "opening sightline store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row fetch helpers ───────────────────────────────────────────────────────

fn fetch_person(
  conn: &rusqlite::Connection,
  id: PersonId,
) -> rusqlite::Result<Option<RawPerson>> {
  conn
    .query_row(
      "SELECT id, name, email, created_at, updated_at, deleted_at
       FROM persons WHERE id = ?1",
      rusqlite::params![id.0],
      RawPerson::from_row,
    )
    .optional()
}

fn fetch_report(
  conn: &rusqlite::Connection,
  id: ReportId,
) -> rusqlite::Result<Option<RawReport>> {
  conn
    .query_row(
      "SELECT id, person_id, observations, evidence, created_at, deleted_at
       FROM reports WHERE id = ?1",
      rusqlite::params![id.0],
      RawReport::from_row,
    )
    .optional()
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Person registry ───────────────────────────────────────────────────────

  async fn create_person(&self, input: NewPerson) -> Result<Person> {
    input.validate()?;

    let now_str = encode_dt(Utc::now());
    let NewPerson { name, email } = input;

    let outcome: TxOutcome<RawPerson> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if gate::email_in_use(&tx, &email, None)? {
          return Ok(Err(LedgerError::DuplicateEmail(email)));
        }

        tx.execute(
          "INSERT INTO persons (name, email, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![name, email, now_str],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Ok(RawPerson {
          id,
          name,
          email,
          created_at: now_str,
          updated_at: None,
          deleted_at: None,
        }))
      })
      .await?;

    let raw = outcome?;
    tracing::debug!(id = raw.id, "created person");
    raw.into_person()
  }

  async fn get_person(&self, id: PersonId) -> Result<Person> {
    let raw: Option<RawPerson> =
      self.conn.call(move |conn| Ok(fetch_person(conn, id)?)).await?;

    match raw {
      Some(raw) => raw.into_person(),
      None => Err(LedgerError::PersonNotFound(id).into()),
    }
  }

  async fn list_persons(&self, include_deleted: bool) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let sql = if include_deleted {
          "SELECT id, name, email, created_at, updated_at, deleted_at
           FROM persons ORDER BY id ASC"
        } else {
          "SELECT id, name, email, created_at, updated_at, deleted_at
           FROM persons WHERE deleted_at IS NULL ORDER BY id ASC"
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn update_person(
    &self,
    id: PersonId,
    update: PersonUpdate,
  ) -> Result<Person> {
    update.validate()?;

    let now_str = encode_dt(Utc::now());
    let PersonUpdate { name, email } = update;

    let outcome: TxOutcome<RawPerson> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let raw = match fetch_person(&tx, id)? {
          Some(raw) => raw,
          None => return Ok(Err(LedgerError::PersonNotFound(id))),
        };
        if raw.deleted_at.is_some() {
          return Ok(Err(LedgerError::AlreadyDeleted(id)));
        }

        if let Some(email) = &email
          && gate::email_in_use(&tx, email, Some(id))?
        {
          return Ok(Err(LedgerError::DuplicateEmail(email.clone())));
        }

        let name = name.unwrap_or(raw.name);
        let email = email.unwrap_or(raw.email);

        tx.execute(
          "UPDATE persons SET name = ?1, email = ?2, updated_at = ?3
           WHERE id = ?4",
          rusqlite::params![name, email, now_str, id.0],
        )?;
        tx.commit()?;

        Ok(Ok(RawPerson {
          id: id.0,
          name,
          email,
          created_at: raw.created_at,
          updated_at: Some(now_str),
          deleted_at: None,
        }))
      })
      .await?;

    let raw = outcome?;
    tracing::debug!(id = raw.id, "updated person");
    raw.into_person()
  }

  async fn soft_delete_person(&self, id: PersonId) -> Result<Person> {
    let now_str = encode_dt(Utc::now());

    let outcome: TxOutcome<RawPerson> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut raw = match fetch_person(&tx, id)? {
          Some(raw) => raw,
          None => return Ok(Err(LedgerError::PersonNotFound(id))),
        };

        // Idempotent: a second delete leaves the record untouched and
        // returns it with the original deletion timestamp.
        if raw.deleted_at.is_none() {
          tx.execute(
            "UPDATE persons SET deleted_at = ?1 WHERE id = ?2",
            rusqlite::params![now_str, id.0],
          )?;
          raw.deleted_at = Some(now_str);
        }
        tx.commit()?;

        Ok(Ok(raw))
      })
      .await?;

    let raw = outcome?;
    tracing::debug!(id = raw.id, "soft-deleted person");
    raw.into_person()
  }

  // ── Report ledger ─────────────────────────────────────────────────────────

  async fn create_report(&self, input: NewReport) -> Result<Report> {
    input.validate()?;

    let now_str = encode_dt(Utc::now());
    let NewReport { person_id, observations, evidence } = input;

    let outcome: TxOutcome<RawReport> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        match gate::person_state(&tx, person_id)? {
          PersonState::Missing => {
            return Ok(Err(LedgerError::PersonNotFound(person_id)));
          }
          PersonState::Deleted => {
            return Ok(Err(LedgerError::PersonDeleted(person_id)));
          }
          PersonState::Active => {}
        }

        tx.execute(
          "INSERT INTO reports (person_id, observations, evidence, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![person_id.0, observations, evidence, now_str],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Ok(RawReport {
          id,
          person_id: person_id.0,
          observations,
          evidence,
          created_at: now_str,
          deleted_at: None,
        }))
      })
      .await?;

    let raw = outcome?;
    tracing::debug!(id = raw.id, person_id = raw.person_id, "created report");
    raw.into_report()
  }

  async fn get_report(&self, id: ReportId) -> Result<Report> {
    let raw: Option<RawReport> =
      self.conn.call(move |conn| Ok(fetch_report(conn, id)?)).await?;

    match raw {
      Some(raw) => raw.into_report(),
      None => Err(LedgerError::ReportNotFound(id).into()),
    }
  }

  async fn list_reports_for_person(
    &self,
    person_id: PersonId,
    include_deleted: bool,
  ) -> Result<Vec<Report>> {
    let outcome: TxOutcome<Vec<RawReport>> = self
      .conn
      .call(move |conn| {
        // NotFound only if the person never existed; an empty list is a
        // valid answer for an existing person (deleted or not).
        if gate::person_state(conn, person_id)? == PersonState::Missing {
          return Ok(Err(LedgerError::PersonNotFound(person_id)));
        }

        let sql = if include_deleted {
          "SELECT id, person_id, observations, evidence, created_at, deleted_at
           FROM reports WHERE person_id = ?1
           ORDER BY created_at ASC, id ASC"
        } else {
          "SELECT id, person_id, observations, evidence, created_at, deleted_at
           FROM reports WHERE person_id = ?1 AND deleted_at IS NULL
           ORDER BY created_at ASC, id ASC"
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params![person_id.0], RawReport::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Ok(rows))
      })
      .await?;

    let raws = outcome?;
    raws.into_iter().map(RawReport::into_report).collect()
  }

  async fn soft_delete_report(&self, id: ReportId) -> Result<Report> {
    let now_str = encode_dt(Utc::now());

    let outcome: TxOutcome<RawReport> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut raw = match fetch_report(&tx, id)? {
          Some(raw) => raw,
          None => return Ok(Err(LedgerError::ReportNotFound(id))),
        };

        if raw.deleted_at.is_none() {
          tx.execute(
            "UPDATE reports SET deleted_at = ?1 WHERE id = ?2",
            rusqlite::params![now_str, id.0],
          )?;
          raw.deleted_at = Some(now_str);
        }
        tx.commit()?;

        Ok(Ok(raw))
      })
      .await?;

    let raw = outcome?;
    tracing::debug!(id = raw.id, "soft-deleted report");
    raw.into_report()
  }
}
