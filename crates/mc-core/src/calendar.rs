//! Calendar events.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
  Result,
  record::{
    Collection, Document, RecordId, Timestamp, Unindexed, Validate,
    double_option, require_non_empty, set,
  },
  view::{SortKey, Viewable, sort_records},
};

/// Default number of events returned by [`upcoming`].
pub const UPCOMING_LIMIT: usize = 10;

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
pub enum EventType {
  Task,
  Cron,
  Reminder,
  Deadline,
  Meeting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
  pub id:            RecordId,
  pub title:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:   Option<String>,
  #[serde(rename = "type")]
  pub kind:          EventType,
  pub scheduled_for: Timestamp,
  pub completed:     bool,
  pub created_at:    Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalendarEvent {
  pub title:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:   Option<String>,
  #[serde(rename = "type")]
  pub kind:          EventType,
  pub scheduled_for: Timestamp,
}

impl Validate for NewCalendarEvent {
  fn validate(&self) -> Result<()> { require_non_empty("title", &self.title) }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:         Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub description:   Option<Option<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
  pub kind:          Option<EventType>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scheduled_for: Option<Timestamp>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub completed:     Option<bool>,
}

impl CalendarPatch {
  pub fn complete() -> Self {
    Self { completed: Some(true), ..Self::default() }
  }
}

impl Validate for CalendarPatch {
  fn validate(&self) -> Result<()> {
    match &self.title {
      Some(title) => require_non_empty("title", title),
      None => Ok(()),
    }
  }
}

impl Document for CalendarEvent {
  const COLLECTION: Collection = Collection::CalendarEvents;

  type Draft = NewCalendarEvent;
  type Index = Unindexed;
  type Patch = CalendarPatch;

  fn id(&self) -> RecordId { self.id }

  fn from_draft(id: RecordId, now: Timestamp, draft: NewCalendarEvent) -> Self {
    Self {
      id,
      title: draft.title,
      description: draft.description,
      kind: draft.kind,
      scheduled_for: draft.scheduled_for,
      completed: false,
      created_at: now,
    }
  }

  fn apply_patch(&mut self, patch: CalendarPatch, _now: Timestamp) {
    set(&mut self.title, patch.title);
    set(&mut self.description, patch.description);
    set(&mut self.kind, patch.kind);
    set(&mut self.scheduled_for, patch.scheduled_for);
    set(&mut self.completed, patch.completed);
  }
}

/// A completed event counts as archived: it drops out of filter mode unless
/// archived records are requested.
impl Viewable for CalendarEvent {
  type Category = EventType;

  const DEFAULT_SORT: SortKey = SortKey::ScheduledForAsc;

  fn category(&self) -> Option<EventType> { Some(self.kind) }

  fn created_at(&self) -> Timestamp { self.created_at }

  fn title(&self) -> &str { &self.title }

  fn body(&self) -> Option<&str> { self.description.as_deref() }

  fn archived(&self) -> bool { self.completed }

  fn scheduled_for(&self) -> Option<Timestamp> { Some(self.scheduled_for) }
}

// ─── Windows ─────────────────────────────────────────────────────────────────

/// Events whose `scheduled_for` falls in `[from, to]`; either bound may be
/// open. Keeps incoming order.
pub fn in_window(
  events: &[CalendarEvent],
  from: Option<Timestamp>,
  to: Option<Timestamp>,
) -> Vec<CalendarEvent> {
  events
    .iter()
    .filter(|e| from.is_none_or(|f| e.scheduled_for >= f))
    .filter(|e| to.is_none_or(|t| e.scheduled_for <= t))
    .cloned()
    .collect()
}

/// Incomplete events at or after `now`, soonest first, at most `limit`.
pub fn upcoming(
  events: &[CalendarEvent],
  now: Timestamp,
  limit: usize,
) -> Vec<&CalendarEvent> {
  let mut pending: Vec<&CalendarEvent> = events
    .iter()
    .filter(|e| !e.completed && e.scheduled_for >= now)
    .collect();
  sort_records(&mut pending, SortKey::ScheduledForAsc);
  pending.truncate(limit);
  pending
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  fn event(title: &str, at: Timestamp) -> CalendarEvent {
    CalendarEvent::from_draft(
      Uuid::new_v4(),
      0,
      NewCalendarEvent {
        title:         title.into(),
        description:   None,
        kind:          EventType::Reminder,
        scheduled_for: at,
      },
    )
  }

  fn titles(events: &[&CalendarEvent]) -> Vec<String> {
    events.iter().map(|e| e.title.clone()).collect()
  }

  #[test]
  fn new_events_are_never_completed() {
    assert!(!event("standup", 10).completed);
  }

  #[test]
  fn upcoming_skips_past_and_completed_and_sorts_soonest_first() {
    let mut done = event("done", 300);
    done.apply_patch(CalendarPatch::complete(), 1);
    let events = vec![event("later", 500), event("past", 50), done, event("soon", 200)];

    let next = upcoming(&events, 100, UPCOMING_LIMIT);

    assert_eq!(titles(&next), ["soon", "later"]);
  }

  #[test]
  fn upcoming_respects_limit() {
    let events: Vec<_> = (0..5).map(|i| event(&format!("e{i}"), 100 + i)).collect();
    assert_eq!(upcoming(&events, 0, 2).len(), 2);
  }

  #[test]
  fn window_bounds_are_inclusive_and_optional() {
    let events = vec![event("a", 10), event("b", 20), event("c", 30)];

    let mid: Vec<String> =
      in_window(&events, Some(20), Some(30)).into_iter().map(|e| e.title).collect();
    assert_eq!(mid, ["b", "c"]);

    assert_eq!(in_window(&events, None, Some(10)).len(), 1);
    assert_eq!(in_window(&events, None, None).len(), 3);
  }
}
