//! Activity log: an append-only feed of what team members did.

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  record::{
    Collection, Document, Immutable, RecordId, Timestamp, Unindexed, Validate,
    require_non_empty,
  },
  team::TeamMember,
  view::Viewable,
};

/// Default number of entries returned by a listing.
pub const LIST_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
  pub id:        RecordId,
  /// May point at a member that has since been removed.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub member_id: Option<RecordId>,
  pub action:    String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub details:   Option<String>,
  pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub member_id: Option<RecordId>,
  pub action:    String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub details:   Option<String>,
}

impl NewActivity {
  pub fn new(member_id: Option<RecordId>, action: impl Into<String>) -> Self {
    Self { member_id, action: action.into(), details: None }
  }
}

impl Validate for NewActivity {
  fn validate(&self) -> Result<()> { require_non_empty("action", &self.action) }
}

impl Document for ActivityEntry {
  const COLLECTION: Collection = Collection::ActivityLog;

  type Draft = NewActivity;
  type Index = Unindexed;
  type Patch = Immutable;

  fn id(&self) -> RecordId { self.id }

  fn from_draft(id: RecordId, now: Timestamp, draft: NewActivity) -> Self {
    Self {
      id,
      member_id: draft.member_id,
      action: draft.action,
      details: draft.details,
      timestamp: now,
    }
  }

  fn apply_patch(&mut self, patch: Immutable, _now: Timestamp) { match patch {} }
}

impl Viewable for ActivityEntry {
  type Category = RecordId;

  fn category(&self) -> Option<RecordId> { self.member_id }

  fn created_at(&self) -> Timestamp { self.timestamp }

  fn title(&self) -> &str { &self.action }

  fn body(&self) -> Option<&str> { self.details.as_deref() }
}

/// An entry with its member reference resolved. `member` is `None` when the
/// entry has no member or the member no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
  #[serde(flatten)]
  pub entry:  ActivityEntry,
  pub member: Option<TeamMember>,
}

/// Resolve member references against `roster`.
pub fn resolve<'a, I>(entries: I, roster: &[TeamMember]) -> Vec<ActivityView>
where
  I: IntoIterator<Item = &'a ActivityEntry>,
{
  entries
    .into_iter()
    .map(|entry| ActivityView {
      member: entry
        .member_id
        .and_then(|id| roster.iter().find(|m| m.id == id).cloned()),
      entry:  entry.clone(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;
  use crate::team::NewTeamMember;

  #[test]
  fn dangling_member_resolves_to_absent() {
    let member =
      TeamMember::from_draft(Uuid::new_v4(), 1, NewTeamMember::new("Scout", "research"));
    let known = ActivityEntry::from_draft(
      Uuid::new_v4(),
      10,
      NewActivity::new(Some(member.id), "started crawl"),
    );
    let orphan = ActivityEntry::from_draft(
      Uuid::new_v4(),
      11,
      NewActivity::new(Some(Uuid::new_v4()), "left"),
    );
    let system = ActivityEntry::from_draft(Uuid::new_v4(), 12, NewActivity::new(None, "boot"));

    let views = resolve([&known, &orphan, &system], std::slice::from_ref(&member));

    assert_eq!(views[0].member.as_ref().map(|m| m.id), Some(member.id));
    assert!(views[1].member.is_none());
    assert!(views[2].member.is_none());
  }

  #[test]
  fn resolved_view_flattens_the_entry() {
    let entry =
      ActivityEntry::from_draft(Uuid::nil(), 5, NewActivity::new(None, "deployed"));
    let json = serde_json::to_value(&resolve([&entry], &[])[0]).unwrap();
    assert_eq!(json["action"], "deployed");
    assert_eq!(json["timestamp"], 5);
    assert!(json["member"].is_null());
  }

  #[test]
  fn blank_action_is_rejected() {
    assert!(NewActivity::new(None, "").validate().is_err());
  }
}
