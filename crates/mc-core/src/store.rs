//! The `RecordStore` trait and the change events it publishes.
//!
//! The trait is implemented by storage backends (e.g. `mc-store-sqlite`).
//! Higher layers (`mc-api`, `mc-server`) depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  Classify,
  record::{Collection, Document, RecordId},
};

// ─── Change feed ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
  Inserted,
  Patched,
  Deleted,
}

/// Emitted once per successful mutation, after it has committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
  pub collection: Collection,
  pub id:         RecordId,
  pub op:         ChangeOp,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Mission Control document store.
///
/// Every method is generic over the [`Document`] type, which names the
/// collection it lives in. Drafts and patches are validated by the store
/// before anything is written, so a rejected call leaves the collection
/// untouched.
///
/// Each mutation is atomic per record: a patch is a read-modify-write that no
/// concurrent patch of the same record can interleave with.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error
    + Classify
    + From<crate::Error>
    + Send
    + Sync
    + 'static;

  /// Every record of the collection, in insertion order.
  fn list<D: Document>(
    &self,
  ) -> impl Future<Output = Result<Vec<D>, Self::Error>> + Send + '_;

  /// Records whose indexed field equals the key's value, in insertion order.
  fn lookup<D: Document>(
    &self,
    key: D::Index,
  ) -> impl Future<Output = Result<Vec<D>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get<D: Document>(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<D>, Self::Error>> + Send + '_;

  /// Validate the draft, assign an id and creation time, and persist it.
  fn insert<D: Document>(
    &self,
    draft: D::Draft,
  ) -> impl Future<Output = Result<D, Self::Error>> + Send + '_;

  /// Validate and apply a partial update, returning the stored result.
  ///
  /// Fails with a not-found error if no record has `id`.
  fn patch<D: Document>(
    &self,
    id: RecordId,
    patch: D::Patch,
  ) -> impl Future<Output = Result<D, Self::Error>> + Send + '_;

  /// Permanently remove a record. Fails with a not-found error if no record
  /// has `id`. Nothing referencing the record is touched.
  fn delete<D: Document>(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
