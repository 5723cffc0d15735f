//! Content pipeline records: ideas moving through production to publication.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
  Result,
  record::{
    Collection, Document, IndexKey, IndexValue, RecordId, Timestamp, Validate,
    double_option, require_non_empty, set,
  },
  view::Viewable,
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentKind {
  Article,
  Video,
  Podcast,
  SocialPost,
  Newsletter,
}

/// Pipeline stage, in board order.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
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
pub enum ContentStatus {
  #[default]
  Idea,
  Scripting,
  Thumbnail,
  Production,
  Review,
  Scheduled,
  Published,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
  pub id:            RecordId,
  pub title:         String,
  #[serde(rename = "type")]
  pub kind:          ContentKind,
  pub status:        ContentStatus,
  /// Full script or article body.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub thumbnail_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scheduled_for: Option<Timestamp>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub published_url: Option<String>,
  pub created_at:    Timestamp,
  pub updated_at:    Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
  pub title:   String,
  #[serde(rename = "type")]
  pub kind:    ContentKind,
  /// Defaults to [`ContentStatus::Idea`].
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:  Option<ContentStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:   Option<String>,
}

impl NewContent {
  pub fn new(title: impl Into<String>, kind: ContentKind) -> Self {
    Self { title: title.into(), kind, status: None, content: None, notes: None }
  }
}

impl Validate for NewContent {
  fn validate(&self) -> Result<()> { require_non_empty("title", &self.title) }
}

/// Partial update. The content type is fixed at creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:        Option<ContentStatus>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub content:       Option<Option<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub notes:         Option<Option<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub thumbnail_url: Option<Option<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub scheduled_for: Option<Option<Timestamp>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub published_url: Option<Option<String>>,
}

impl ContentPatch {
  pub fn status(status: ContentStatus) -> Self {
    Self { status: Some(status), ..Self::default() }
  }
}

impl Validate for ContentPatch {
  fn validate(&self) -> Result<()> {
    match &self.title {
      Some(title) => require_non_empty("title", title),
      None => Ok(()),
    }
  }
}

/// Secondary indexes on the content collection.
#[derive(Debug, Clone, Copy)]
pub enum ContentIndex {
  ByStatus(ContentStatus),
}

impl IndexKey for ContentIndex {
  fn field(&self) -> &'static str {
    match self {
      Self::ByStatus(_) => "status",
    }
  }

  fn value(&self) -> IndexValue {
    match self {
      Self::ByStatus(s) => IndexValue::Text(s.as_ref().to_owned()),
    }
  }
}

impl Document for ContentItem {
  const COLLECTION: Collection = Collection::Content;

  type Draft = NewContent;
  type Index = ContentIndex;
  type Patch = ContentPatch;

  fn id(&self) -> RecordId { self.id }

  fn from_draft(id: RecordId, now: Timestamp, draft: NewContent) -> Self {
    Self {
      id,
      title: draft.title,
      kind: draft.kind,
      status: draft.status.unwrap_or_default(),
      content: draft.content,
      notes: draft.notes,
      thumbnail_url: None,
      scheduled_for: None,
      published_url: None,
      created_at: now,
      updated_at: now,
    }
  }

  fn apply_patch(&mut self, patch: ContentPatch, now: Timestamp) {
    set(&mut self.title, patch.title);
    set(&mut self.status, patch.status);
    set(&mut self.content, patch.content);
    set(&mut self.notes, patch.notes);
    set(&mut self.thumbnail_url, patch.thumbnail_url);
    set(&mut self.scheduled_for, patch.scheduled_for);
    set(&mut self.published_url, patch.published_url);
    self.updated_at = now;
  }
}

impl Viewable for ContentItem {
  type Category = ContentStatus;

  fn category(&self) -> Option<ContentStatus> { Some(self.status) }

  fn created_at(&self) -> Timestamp { self.created_at }

  fn title(&self) -> &str { &self.title }

  fn body(&self) -> Option<&str> { self.content.as_deref() }

  fn scheduled_for(&self) -> Option<Timestamp> { self.scheduled_for }
}
