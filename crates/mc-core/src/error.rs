//! Error types for `mc-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::record::Collection;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{collection} record not found: {id}")]
  NotFound { collection: Collection, id: Uuid },

  #[error("invalid {field}: {reason}")]
  Validation { field: &'static str, reason: String },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn not_found(collection: Collection, id: Uuid) -> Self {
    Self::NotFound { collection, id }
  }

  pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Validation { field, reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Classification ──────────────────────────────────────────────────────────

/// The coarse error taxonomy callers branch on.
///
/// Backends wrap their own failures in richer types; the API layer only needs
/// to know which of these three buckets an error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A get/patch/delete targeted an id that does not exist.
  NotFound,
  /// A create/update carried a value outside its allowed set or range.
  Validation,
  /// The store itself failed. Propagated unchanged.
  Transport,
}

/// Implemented by every error type that can surface from a
/// [`RecordStore`](crate::store::RecordStore).
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::NotFound { .. } => ErrorKind::NotFound,
      Self::Validation { .. } => ErrorKind::Validation,
      Self::Serialization(_) => ErrorKind::Transport,
    }
  }
}
