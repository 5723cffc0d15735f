//! Bulk-loading a store from a JSON seed file.
//!
//! A seed file holds creation drafts for every collection. Activity entries
//! name their team member instead of carrying an id, since ids only exist
//! once the members have been inserted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
  activity::{ActivityEntry, NewActivity},
  calendar::{CalendarEvent, NewCalendarEvent},
  content::{ContentItem, NewContent},
  media::{MediaItem, NewMedia},
  memory::{Memory, NewMemory},
  record::{Document, RecordId},
  store::RecordStore,
  task::{NewTask, Task},
  team::{NewTeamMember, TeamMember},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedFile {
  pub tasks:    Vec<NewTask>,
  pub content:  Vec<NewContent>,
  pub media:    Vec<NewMedia>,
  pub memories: Vec<NewMemory>,
  pub calendar: Vec<NewCalendarEvent>,
  pub team:     Vec<NewTeamMember>,
  pub activity: Vec<SeedActivity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedActivity {
  /// Name of a member in the same seed file.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub member:  Option<String>,
  pub action:  String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub details: Option<String>,
}

/// How many records of each kind a seed run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
  pub tasks:    usize,
  pub content:  usize,
  pub media:    usize,
  pub memories: usize,
  pub calendar: usize,
  pub team:     usize,
  pub activity: usize,
}

impl SeedReport {
  pub fn total(&self) -> usize {
    self.tasks
      + self.content
      + self.media
      + self.memories
      + self.calendar
      + self.team
      + self.activity
  }
}

impl SeedFile {
  pub fn from_json(json: &str) -> crate::Result<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Insert everything into `store`. Stops at the first failure; records
  /// inserted before it stay in place.
  ///
  /// An activity entry whose member name does not match a seeded member is
  /// logged without a member.
  pub async fn apply<S: RecordStore>(self, store: &S) -> Result<SeedReport, S::Error> {
    let mut report = SeedReport {
      tasks:    insert_all::<Task, _>(store, self.tasks).await?,
      content:  insert_all::<ContentItem, _>(store, self.content).await?,
      media:    insert_all::<MediaItem, _>(store, self.media).await?,
      memories: insert_all::<Memory, _>(store, self.memories).await?,
      calendar: insert_all::<CalendarEvent, _>(store, self.calendar).await?,
      ..SeedReport::default()
    };

    let mut members: HashMap<String, RecordId> = HashMap::new();
    for draft in self.team {
      let member: TeamMember = store.insert(draft).await?;
      members.insert(member.name.clone(), member.id);
      report.team += 1;
    }

    for seed in self.activity {
      let draft = NewActivity {
        member_id: seed.member.and_then(|name| members.get(&name).copied()),
        action:    seed.action,
        details:   seed.details,
      };
      let _: ActivityEntry = store.insert(draft).await?;
      report.activity += 1;
    }

    Ok(report)
  }
}

async fn insert_all<D, S>(store: &S, drafts: Vec<D::Draft>) -> Result<usize, S::Error>
where
  D: Document,
  S: RecordStore,
{
  let n = drafts.len();
  for draft in drafts {
    store.insert::<D>(draft).await?;
  }
  Ok(n)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_sections_default_to_empty() {
    let seed = SeedFile::from_json(r#"{"tasks":[{"title":"one"}]}"#).unwrap();
    assert_eq!(seed.tasks.len(), 1);
    assert!(seed.media.is_empty());
    assert!(seed.activity.is_empty());
  }

  #[test]
  fn malformed_seed_is_a_serialization_error() {
    let err = SeedFile::from_json(r#"{"tasks":[{"status":"backlog"}]}"#).unwrap_err();
    assert!(matches!(err, crate::Error::Serialization(_)));
  }
}
