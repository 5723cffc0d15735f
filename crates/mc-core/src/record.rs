//! The document abstraction shared by every Mission Control module.
//!
//! A module's record type implements [`Document`], which ties together the
//! collection it lives in, the input accepted on creation (`Draft`), the
//! partial update it understands (`Patch`), and the secondary indexes the
//! store maintains for it (`Index`).

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

/// Opaque record identifier, assigned by the store at creation.
pub type RecordId = Uuid;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Current wall-clock time as a [`Timestamp`].
pub fn now_ms() -> Timestamp { Utc::now().timestamp_millis() }

// ─── Collections ─────────────────────────────────────────────────────────────

/// One document collection per dashboard module.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
  Tasks,
  Content,
  Media,
  Memories,
  CalendarEvents,
  TeamMembers,
  ActivityLog,
}

// ─── Indexes ─────────────────────────────────────────────────────────────────

/// A scalar value an index lookup compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexValue {
  Text(String),
  Integer(i64),
}

/// A single-field equality lookup against a secondary index.
pub trait IndexKey {
  /// The top-level JSON field the index covers (camelCase, as stored).
  fn field(&self) -> &'static str;
  fn value(&self) -> IndexValue;
}

/// Index type for collections that only support full scans.
#[derive(Debug, Clone, Copy)]
pub enum Unindexed {}

impl IndexKey for Unindexed {
  fn field(&self) -> &'static str { match *self {} }

  fn value(&self) -> IndexValue { match *self {} }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Checks run on drafts and patches before anything touches the store.
pub trait Validate {
  fn validate(&self) -> Result<()>;
}

/// Patch type for append-only collections; it has no values.
#[derive(Debug, Clone, Copy)]
pub enum Immutable {}

impl Validate for Immutable {
  fn validate(&self) -> Result<()> { match *self {} }
}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::invalid(field, "must not be empty"));
  }
  Ok(())
}

// ─── Document ────────────────────────────────────────────────────────────────

/// A record type stored in its own collection.
pub trait Document:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  const COLLECTION: Collection;

  /// Fields accepted on insert. Missing optional fields get their defaults
  /// in [`Document::from_draft`].
  type Draft: Validate + Send + 'static;

  /// Partial update. Absent fields are left untouched.
  type Patch: Validate + Send + 'static;

  type Index: IndexKey + Send + 'static;

  fn id(&self) -> RecordId;

  /// Build the stored record. `id` and `now` come from the store.
  fn from_draft(id: RecordId, now: Timestamp, draft: Self::Draft) -> Self;

  /// Apply a validated patch in place. `now` is the mutation time.
  fn apply_patch(&mut self, patch: Self::Patch, now: Timestamp);
}

// ─── Patch helpers ───────────────────────────────────────────────────────────

/// Deserialise a field that distinguishes "absent" from "explicitly null".
///
/// Use together with `#[serde(default)]`: an absent key yields `None`, a JSON
/// `null` yields `Some(None)` (clear the field), and a value yields
/// `Some(Some(v))`.
pub fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

/// Overwrite `slot` when the patch supplied a value.
pub(crate) fn set<T>(slot: &mut T, value: Option<T>) {
  if let Some(v) = value {
    *slot = v;
  }
}

#[cfg(test)]
mod tests {
  use serde::Deserialize;

  use super::*;

  #[derive(Deserialize)]
  struct Probe {
    #[serde(default, deserialize_with = "double_option")]
    rating: Option<Option<u8>>,
  }

  #[test]
  fn double_option_distinguishes_absent_null_and_value() {
    let absent: Probe = serde_json::from_str("{}").unwrap();
    let null: Probe = serde_json::from_str(r#"{"rating":null}"#).unwrap();
    let value: Probe = serde_json::from_str(r#"{"rating":4}"#).unwrap();

    assert_eq!(absent.rating, None);
    assert_eq!(null.rating, Some(None));
    assert_eq!(value.rating, Some(Some(4)));
  }

  #[test]
  fn collection_names_are_snake_case() {
    assert_eq!(Collection::CalendarEvents.as_ref(), "calendar_events");
    assert_eq!(Collection::ActivityLog.to_string(), "activity_log");
  }

  #[test]
  fn blank_strings_fail_validation() {
    assert!(require_non_empty("title", "  ").is_err());
    assert!(require_non_empty("title", "x").is_ok());
  }
}
