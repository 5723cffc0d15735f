//! Aggregate figures shown in module headers and on the dashboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;

use crate::{
  calendar::{self, CalendarEvent},
  content::{ContentItem, ContentStatus},
  media::{MediaItem, MediaType, Project},
  memory::Memory,
  record::Timestamp,
  task::{Task, TaskStatus},
  team::{MemberStatus, TeamMember},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaStats {
  pub total:      usize,
  pub images:     usize,
  pub videos:     usize,
  /// Every project is listed, including those with no items.
  pub by_project: BTreeMap<Project, usize>,
  /// Keyed by star count; unrated items are not listed here.
  pub by_rating:  BTreeMap<u8, usize>,
  pub rated:      usize,
  pub unrated:    usize,
}

impl MediaStats {
  pub fn compute(items: &[MediaItem]) -> Self {
    let mut stats = Self {
      total: items.len(),
      by_project: Project::iter().map(|p| (p, 0)).collect(),
      ..Self::default()
    };
    for item in items {
      match item.media_type {
        MediaType::Image => stats.images += 1,
        MediaType::Video => stats.videos += 1,
      }
      *stats.by_project.entry(item.project).or_default() += 1;
      match item.rating.filter(|_| item.is_rated()) {
        Some(r) => {
          stats.rated += 1;
          *stats.by_rating.entry(r).or_default() += 1;
        }
        None => stats.unrated += 1,
      }
    }
    stats
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
  pub total:          usize,
  pub working:        usize,
  pub idle:           usize,
  pub awaiting_input: usize,
  /// Share of members currently working, as a whole percentage.
  pub utilization:    u8,
}

impl TeamStats {
  pub fn compute(members: &[TeamMember]) -> Self {
    let mut stats = Self { total: members.len(), ..Self::default() };
    for m in members {
      match m.status {
        MemberStatus::Working => stats.working += 1,
        MemberStatus::Idle => stats.idle += 1,
        MemberStatus::AwaitingInput => stats.awaiting_input += 1,
      }
    }
    if stats.total > 0 {
      let pct = (stats.working * 100 + stats.total / 2) / stats.total;
      stats.utilization = u8::try_from(pct).unwrap_or(100);
    }
    stats
  }
}

/// Headline numbers for the landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
  /// Tasks not yet completed.
  pub active_tasks:    usize,
  pub content_ideas:   usize,
  pub media_total:     usize,
  /// Memories not archived.
  pub active_memories: usize,
  pub upcoming_events: usize,
}

impl DashboardSummary {
  pub fn compute(
    tasks: &[Task],
    content: &[ContentItem],
    media: &[MediaItem],
    memories: &[Memory],
    events: &[CalendarEvent],
    now: Timestamp,
  ) -> Self {
    Self {
      active_tasks:    tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .count(),
      content_ideas:   content
        .iter()
        .filter(|c| c.status == ContentStatus::Idea)
        .count(),
      media_total:     media.len(),
      active_memories: memories.iter().filter(|m| !m.archived).count(),
      upcoming_events: calendar::upcoming(events, now, usize::MAX).len(),
    }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;
  use uuid::Uuid;

  use super::*;
  use crate::{
    media::{MediaPatch, NewMedia},
    record::Document,
    team::{NewTeamMember, StatusUpdate},
  };

  fn media(kind: MediaType, project: Project, rating: Option<u8>) -> MediaItem {
    let mut draft = NewMedia::new("f.jpg", "/in/f.jpg", kind);
    draft.project = Some(project);
    let mut item = MediaItem::from_draft(Uuid::new_v4(), 1, draft);
    if let Some(r) = rating {
      item.apply_patch(MediaPatch::rate(r), 2);
    }
    item
  }

  #[test]
  fn media_stats_split_by_type_project_and_rating() {
    let items = vec![
      media(MediaType::Image, Project::SolarSurf, Some(5)),
      media(MediaType::Image, Project::SolarSurf, None),
      media(MediaType::Video, Project::Personal, Some(5)),
      media(MediaType::Image, Project::Uncategorized, Some(2)),
    ];

    let stats = MediaStats::compute(&items);

    assert_eq!(stats.total, 4);
    assert_eq!((stats.images, stats.videos), (3, 1));
    assert_eq!((stats.rated, stats.unrated), (3, 1));
    assert_eq!(stats.by_project[&Project::SolarSurf], 2);
    assert_eq!(stats.by_project[&Project::Business], 0);
    assert_eq!(stats.by_rating[&5], 2);
    assert_eq!(stats.by_rating.get(&3), None);
  }

  #[test]
  fn empty_media_stats_list_every_project_at_zero() {
    let stats = MediaStats::compute(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.by_project.len(), Project::iter().count());
    assert!(stats.by_project.values().all(|n| *n == 0));
    assert!(stats.by_rating.is_empty());
  }

  #[test]
  fn team_utilization_rounds_to_whole_percent() {
    let mut members: Vec<TeamMember> = (0..3)
      .map(|i| {
        TeamMember::from_draft(Uuid::new_v4(), i, NewTeamMember::new(format!("m{i}"), "agent"))
      })
      .collect();
    members[0].apply_patch(StatusUpdate::status(MemberStatus::Working).into(), 5);
    members[1].apply_patch(StatusUpdate::status(MemberStatus::AwaitingInput).into(), 5);

    let stats = TeamStats::compute(&members);

    assert_eq!(stats.total, 3);
    assert_eq!((stats.working, stats.idle, stats.awaiting_input), (1, 1, 1));
    assert_eq!(stats.utilization, 33);
  }

  #[test]
  fn empty_team_has_zero_utilization() {
    assert_eq!(TeamStats::compute(&[]).utilization, 0);
  }
}
