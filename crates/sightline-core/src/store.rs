//! The `RecordStore` trait — the ledger's operations surface.
//!
//! Implemented by storage backends (e.g. `sightline-store-sqlite`). The
//! external request-handling service depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  person::{NewPerson, Person, PersonId, PersonUpdate},
  report::{NewReport, Report, ReportId},
};

/// Abstraction over a durable person/report store.
///
/// Every write method runs its consistency checks and its mutation as one
/// atomic unit against the backing store: either the full mutation is
/// visible afterwards or none of it is, even under concurrent writers.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Person registry ───────────────────────────────────────────────────

  /// Create and persist a new person.
  ///
  /// Fails with a duplicate-email error if an active person already holds
  /// `email`; of two concurrent calls with the same email, exactly one
  /// succeeds. A soft-deleted person's email is free for reuse.
  fn create_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id, regardless of lifecycle state. Callers own
  /// the visibility policy for deleted records.
  fn get_person(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// List persons ordered by id ascending. Deleted records are excluded
  /// unless `include_deleted` is set.
  fn list_persons(
    &self,
    include_deleted: bool,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Apply a partial update (`name`, `email`) and stamp `updated_at`.
  ///
  /// Fails if the person is missing or already retired. A changed email is
  /// re-checked for uniqueness among active persons, excluding this record.
  fn update_person(
    &self,
    id: PersonId,
    update: PersonUpdate,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retire a person.
  ///
  /// Idempotent: retiring an already-deleted person succeeds and returns
  /// the record with its original deletion timestamp unchanged. The
  /// person's reports are unaffected.
  fn soft_delete_person(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  // ── Report ledger ─────────────────────────────────────────────────────

  /// File a report against an existing, active person.
  fn create_report(
    &self,
    input: NewReport,
  ) -> impl Future<Output = Result<Report, Self::Error>> + Send + '_;

  /// Retrieve a report by id, regardless of lifecycle state.
  fn get_report(
    &self,
    id: ReportId,
  ) -> impl Future<Output = Result<Report, Self::Error>> + Send + '_;

  /// List a person's reports ordered by `created_at` ascending, ties broken
  /// by id ascending. Deleted reports are excluded unless
  /// `include_deleted` is set.
  ///
  /// Fails only if the person never existed; an existing person with no
  /// reports yields an empty list.
  fn list_reports_for_person(
    &self,
    person_id: PersonId,
    include_deleted: bool,
  ) -> impl Future<Output = Result<Vec<Report>, Self::Error>> + Send + '_;

  /// Retire a report. Same idempotent contract as person soft-delete.
  fn soft_delete_report(
    &self,
    id: ReportId,
  ) -> impl Future<Output = Result<Report, Self::Error>> + Send + '_;
}
