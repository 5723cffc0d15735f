//! Tasks board records.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
  Result,
  record::{
    Collection, Document, RecordId, Timestamp, Unindexed, Validate,
    double_option, require_non_empty, set,
  },
  view::Viewable,
};

/// Board column. Any status may be set from any other.
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
pub enum TaskStatus {
  #[default]
  Backlog,
  InProgress,
  Review,
  Completed,
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
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
pub enum Assignee {
  #[default]
  Singularity,
  Cj,
}

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
pub enum Priority {
  Low,
  Medium,
  High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id:          RecordId,
  pub title:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub status:      TaskStatus,
  pub assigned_to: Assignee,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub priority:    Option<Priority>,
  pub created_at:  Timestamp,
  /// Bumped on every update.
  pub updated_at:  Timestamp,
}

/// Input to task creation. `status` defaults to backlog and `assigned_to`
/// to singularity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
  pub title:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:      Option<TaskStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub assigned_to: Option<Assignee>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub priority:    Option<Priority>,
}

impl NewTask {
  pub fn new(title: impl Into<String>) -> Self {
    Self { title: title.into(), ..Self::default() }
  }
}

impl Validate for NewTask {
  fn validate(&self) -> Result<()> { require_non_empty("title", &self.title) }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:       Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub description: Option<Option<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:      Option<TaskStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub assigned_to: Option<Assignee>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub priority:    Option<Option<Priority>>,
}

impl TaskPatch {
  pub fn status(status: TaskStatus) -> Self {
    Self { status: Some(status), ..Self::default() }
  }
}

impl Validate for TaskPatch {
  fn validate(&self) -> Result<()> {
    match &self.title {
      Some(title) => require_non_empty("title", title),
      None => Ok(()),
    }
  }
}

impl Document for Task {
  const COLLECTION: Collection = Collection::Tasks;

  type Draft = NewTask;
  type Index = Unindexed;
  type Patch = TaskPatch;

  fn id(&self) -> RecordId { self.id }

  fn from_draft(id: RecordId, now: Timestamp, draft: NewTask) -> Self {
    Self {
      id,
      title: draft.title,
      description: draft.description,
      status: draft.status.unwrap_or_default(),
      assigned_to: draft.assigned_to.unwrap_or_default(),
      priority: draft.priority,
      created_at: now,
      updated_at: now,
    }
  }

  fn apply_patch(&mut self, patch: TaskPatch, now: Timestamp) {
    set(&mut self.title, patch.title);
    set(&mut self.description, patch.description);
    set(&mut self.status, patch.status);
    set(&mut self.assigned_to, patch.assigned_to);
    set(&mut self.priority, patch.priority);
    self.updated_at = now;
  }
}

impl Viewable for Task {
  type Category = TaskStatus;

  fn category(&self) -> Option<TaskStatus> { Some(self.status) }

  fn created_at(&self) -> Timestamp { self.created_at }

  fn title(&self) -> &str { &self.title }

  fn body(&self) -> Option<&str> { self.description.as_deref() }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  #[test]
  fn draft_defaults_to_backlog_for_singularity() {
    let task = Task::from_draft(Uuid::new_v4(), 42, NewTask::new("Fix embeddings"));

    assert_eq!(task.status, TaskStatus::Backlog);
    assert_eq!(task.assigned_to, Assignee::Singularity);
    assert_eq!(task.created_at, 42);
    assert_eq!(task.updated_at, 42);
  }

  #[test]
  fn patch_touches_only_supplied_fields_and_bumps_updated_at() {
    let mut draft = NewTask::new("Write post");
    draft.description = Some("draft it".into());
    draft.priority = Some(Priority::High);
    let mut task = Task::from_draft(Uuid::new_v4(), 1, draft);

    task.apply_patch(TaskPatch::status(TaskStatus::Completed), 5);

    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.description.as_deref(), Some("draft it"));
    assert_eq!(task.priority, Some(Priority::High));
    assert_eq!(task.created_at, 1);
    assert_eq!(task.updated_at, 5);
  }

  #[test]
  fn explicit_null_clears_priority() {
    let mut draft = NewTask::new("t");
    draft.priority = Some(Priority::Low);
    let mut task = Task::from_draft(Uuid::new_v4(), 1, draft);

    let patch: TaskPatch = serde_json::from_str(r#"{"priority":null}"#).unwrap();
    task.apply_patch(patch, 2);

    assert_eq!(task.priority, None);
  }

  #[test]
  fn status_can_jump_backwards() {
    let mut task = Task::from_draft(Uuid::new_v4(), 1, NewTask::new("t"));
    task.apply_patch(TaskPatch::status(TaskStatus::Completed), 2);
    task.apply_patch(TaskPatch::status(TaskStatus::Backlog), 3);
    assert_eq!(task.status, TaskStatus::Backlog);
  }

  #[test]
  fn blank_title_is_rejected() {
    assert!(NewTask::new("  ").validate().is_err());
    let patch = TaskPatch { title: Some(String::new()), ..TaskPatch::default() };
    assert!(patch.validate().is_err());
  }

  #[test]
  fn wire_format_is_camel_case() {
    let task = Task::from_draft(Uuid::nil(), 7, NewTask::new("t"));
    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["assignedTo"], "singularity");
    assert_eq!(json["status"], "backlog");
    assert_eq!(json["createdAt"], 7);
  }
}
