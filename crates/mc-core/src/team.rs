//! Team roster.

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
pub enum MemberStatus {
  #[default]
  Idle,
  Working,
  AwaitingInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
  pub id:           RecordId,
  pub name:         String,
  pub role:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:  Option<String>,
  pub status:       MemberStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub current_task: Option<String>,
  /// Model backing an agent member, if any.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub model_id:     Option<String>,
  pub created_at:   Timestamp,
}

/// New members always start idle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamMember {
  pub name:        String,
  pub role:        String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub model_id:    Option<String>,
}

impl NewTeamMember {
  pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
    Self { name: name.into(), role: role.into(), description: None, model_id: None }
  }
}

impl Validate for NewTeamMember {
  fn validate(&self) -> Result<()> {
    require_non_empty("name", &self.name)?;
    require_non_empty("role", &self.role)
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role:         Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub description:  Option<Option<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:       Option<MemberStatus>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub current_task: Option<Option<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub model_id:     Option<Option<String>>,
}

/// Body of the status endpoint. An absent `currentTask` keeps the current
/// one; an explicit `null` clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
  pub status:       MemberStatus,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub current_task: Option<Option<String>>,
}

impl StatusUpdate {
  /// Change only the status.
  pub fn status(status: MemberStatus) -> Self { Self { status, current_task: None } }
}

impl From<StatusUpdate> for TeamMemberPatch {
  fn from(update: StatusUpdate) -> Self {
    Self {
      status: Some(update.status),
      current_task: update.current_task,
      ..Self::default()
    }
  }
}

impl Validate for TeamMemberPatch {
  fn validate(&self) -> Result<()> {
    if let Some(name) = &self.name {
      require_non_empty("name", name)?;
    }
    if let Some(role) = &self.role {
      require_non_empty("role", role)?;
    }
    Ok(())
  }
}

impl Document for TeamMember {
  const COLLECTION: Collection = Collection::TeamMembers;

  type Draft = NewTeamMember;
  type Index = Unindexed;
  type Patch = TeamMemberPatch;

  fn id(&self) -> RecordId { self.id }

  fn from_draft(id: RecordId, now: Timestamp, draft: NewTeamMember) -> Self {
    Self {
      id,
      name: draft.name,
      role: draft.role,
      description: draft.description,
      status: MemberStatus::Idle,
      current_task: None,
      model_id: draft.model_id,
      created_at: now,
    }
  }

  fn apply_patch(&mut self, patch: TeamMemberPatch, _now: Timestamp) {
    set(&mut self.name, patch.name);
    set(&mut self.role, patch.role);
    set(&mut self.description, patch.description);
    set(&mut self.status, patch.status);
    set(&mut self.current_task, patch.current_task);
    set(&mut self.model_id, patch.model_id);
  }
}

impl Viewable for TeamMember {
  type Category = MemberStatus;

  fn category(&self) -> Option<MemberStatus> { Some(self.status) }

  fn created_at(&self) -> Timestamp { self.created_at }

  fn title(&self) -> &str { &self.name }

  fn body(&self) -> Option<&str> { self.description.as_deref() }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  #[test]
  fn members_start_idle_without_a_task() {
    let m = TeamMember::from_draft(Uuid::new_v4(), 1, NewTeamMember::new("Scout", "research"));
    assert_eq!(m.status, MemberStatus::Idle);
    assert_eq!(m.current_task, None);
  }

  #[test]
  fn status_update_keeps_current_task_unless_cleared() {
    let mut m = TeamMember::from_draft(Uuid::new_v4(), 1, NewTeamMember::new("Scout", "research"));

    m.apply_patch(
      StatusUpdate {
        status:       MemberStatus::Working,
        current_task: Some(Some("indexing".into())),
      }
      .into(),
      2,
    );
    assert_eq!(m.status, MemberStatus::Working);
    assert_eq!(m.current_task.as_deref(), Some("indexing"));

    m.apply_patch(StatusUpdate::status(MemberStatus::AwaitingInput).into(), 3);
    assert_eq!(m.status, MemberStatus::AwaitingInput);
    assert_eq!(m.current_task.as_deref(), Some("indexing"));

    m.apply_patch(
      StatusUpdate { status: MemberStatus::Idle, current_task: Some(None) }.into(),
      4,
    );
    assert_eq!(m.status, MemberStatus::Idle);
    assert_eq!(m.current_task, None);
  }

  #[test]
  fn status_update_body_distinguishes_absent_from_null() {
    let absent: StatusUpdate = serde_json::from_str(r#"{"status":"idle"}"#).unwrap();
    let null: StatusUpdate =
      serde_json::from_str(r#"{"status":"idle","currentTask":null}"#).unwrap();
    assert_eq!(absent.current_task, None);
    assert_eq!(null.current_task, Some(None));
  }

  #[test]
  fn name_and_role_are_required() {
    assert!(NewTeamMember::new("", "role").validate().is_err());
    assert!(NewTeamMember::new("name", " ").validate().is_err());
  }

  #[test]
  fn awaiting_input_wire_name() {
    let json = serde_json::to_value(MemberStatus::AwaitingInput).unwrap();
    assert_eq!(json, "awaiting_input");
    assert_eq!("awaiting_input".parse::<MemberStatus>().unwrap(), MemberStatus::AwaitingInput);
  }
}
