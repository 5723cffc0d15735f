//! Memory bank records.
//!
//! Memories are the one module with popularity tracking: every explicit view
//! bumps `view_count` by exactly one, and the default listing is ordered by
//! it. Archiving hides a memory from the main listing without deleting it;
//! search still finds archived memories.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
  Result,
  record::{
    Collection, Document, RecordId, Timestamp, Unindexed, Validate,
    require_non_empty, set,
  },
  view::{SortKey, Viewable},
};

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
pub enum MemoryCategory {
  Decision,
  Learning,
  Preference,
  Project,
  Conversation,
  Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
  pub id:          RecordId,
  pub title:       String,
  pub content:     String,
  pub category:    MemoryCategory,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tags:        Option<Vec<String>>,
  /// Where the memory came from.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source:      Option<String>,
  #[serde(default)]
  pub archived:    bool,
  /// Last time the memory was reviewed or archived.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reviewed_at: Option<Timestamp>,
  #[serde(default)]
  pub view_count:  u64,
  pub created_at:  Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMemory {
  pub title:    String,
  pub content:  String,
  pub category: MemoryCategory,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tags:     Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source:   Option<String>,
  /// Create straight into the archive.
  #[serde(default)]
  pub archived: bool,
}

impl NewMemory {
  pub fn new(
    title: impl Into<String>,
    content: impl Into<String>,
    category: MemoryCategory,
  ) -> Self {
    Self {
      title: title.into(),
      content: content.into(),
      category,
      tags: None,
      source: None,
      archived: false,
    }
  }
}

impl Validate for NewMemory {
  fn validate(&self) -> Result<()> { require_non_empty("title", &self.title) }
}

/// Partial update.
///
/// Only the editable fields deserialise from a request body. Archiving,
/// review stamps and view counting are expressed through the dedicated
/// constructors so they stay atomic with the rest of the patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<MemoryCategory>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tags:     Option<Vec<String>>,
  #[serde(skip)]
  archived:     Option<bool>,
  #[serde(skip)]
  mark_reviewed: bool,
  #[serde(skip)]
  record_view:  bool,
}

impl MemoryPatch {
  /// Increment the view count by one.
  pub fn view() -> Self {
    Self { record_view: true, ..Self::default() }
  }

  /// Hide from the main listing and stamp the review time.
  pub fn archive() -> Self {
    Self { archived: Some(true), mark_reviewed: true, ..Self::default() }
  }

  pub fn unarchive() -> Self {
    Self { archived: Some(false), ..Self::default() }
  }

  pub fn reviewed() -> Self {
    Self { mark_reviewed: true, ..Self::default() }
  }
}

impl Validate for MemoryPatch {
  fn validate(&self) -> Result<()> {
    match &self.title {
      Some(title) => require_non_empty("title", title),
      None => Ok(()),
    }
  }
}

impl Document for Memory {
  const COLLECTION: Collection = Collection::Memories;

  type Draft = NewMemory;
  type Index = Unindexed;
  type Patch = MemoryPatch;

  fn id(&self) -> RecordId { self.id }

  fn from_draft(id: RecordId, now: Timestamp, draft: NewMemory) -> Self {
    Self {
      id,
      title: draft.title,
      content: draft.content,
      category: draft.category,
      tags: draft.tags,
      source: draft.source,
      archived: draft.archived,
      reviewed_at: None,
      view_count: 0,
      created_at: now,
    }
  }

  fn apply_patch(&mut self, patch: MemoryPatch, now: Timestamp) {
    set(&mut self.title, patch.title);
    set(&mut self.content, patch.content);
    set(&mut self.category, patch.category);
    if let Some(tags) = patch.tags {
      self.tags = Some(tags);
    }
    set(&mut self.archived, patch.archived);
    if patch.mark_reviewed {
      self.reviewed_at = Some(now);
    }
    if patch.record_view {
      self.view_count = self.view_count.saturating_add(1);
    }
  }
}

impl Viewable for Memory {
  type Category = MemoryCategory;

  const DEFAULT_SORT: SortKey = SortKey::ViewCountDesc;

  fn category(&self) -> Option<MemoryCategory> { Some(self.category) }

  fn created_at(&self) -> Timestamp { self.created_at }

  fn title(&self) -> &str { &self.title }

  fn body(&self) -> Option<&str> { Some(&self.content) }

  fn tags(&self) -> &[String] { self.tags.as_deref().unwrap_or(&[]) }

  fn archived(&self) -> bool { self.archived }

  fn view_count(&self) -> Option<u64> { Some(self.view_count) }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  fn memory() -> Memory {
    Memory::from_draft(
      Uuid::new_v4(),
      100,
      NewMemory::new("Prefers dark mode", "Always dark UI", MemoryCategory::Preference),
    )
  }

  #[test]
  fn new_memory_is_active_and_unviewed() {
    let m = memory();
    assert!(!m.archived);
    assert_eq!(m.view_count, 0);
    assert_eq!(m.reviewed_at, None);
  }

  #[test]
  fn can_be_created_archived() {
    let mut draft = NewMemory::new("old", "stale", MemoryCategory::Reference);
    draft.archived = true;
    let m = Memory::from_draft(Uuid::new_v4(), 1, draft);
    assert!(m.archived);
  }

  #[test]
  fn view_increments_by_exactly_one() {
    let mut m = memory();
    m.apply_patch(MemoryPatch::view(), 200);
    m.apply_patch(MemoryPatch::view(), 300);
    assert_eq!(m.view_count, 2);
    assert_eq!(m.created_at, 100);
  }

  #[test]
  fn archive_stamps_review_time_and_unarchive_keeps_it() {
    let mut m = memory();
    m.apply_patch(MemoryPatch::archive(), 500);
    assert!(m.archived);
    assert_eq!(m.reviewed_at, Some(500));

    m.apply_patch(MemoryPatch::unarchive(), 600);
    assert!(!m.archived);
    assert_eq!(m.reviewed_at, Some(500));
  }

  #[test]
  fn request_bodies_cannot_flip_internal_flags() {
    let patch: MemoryPatch =
      serde_json::from_str(r#"{"archived":true,"recordView":true,"title":"t"}"#).unwrap();
    let mut m = memory();
    m.apply_patch(patch, 1);
    assert!(!m.archived);
    assert_eq!(m.view_count, 0);
    assert_eq!(m.title, "t");
  }
}
