//! Plain-text rendering of API records, one line per record.

use std::fmt::Display;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, TimeZone as _};
use mc_core::{
  activity::ActivityView,
  calendar::CalendarEvent,
  content::ContentItem,
  media::MediaItem,
  memory::Memory,
  record::Timestamp,
  stats::{DashboardSummary, MediaStats, TeamStats},
  task::Task,
  team::TeamMember,
};
use serde::Deserialize;

/// A record that prints as a single summary line.
pub trait Line {
  fn line(&self) -> String;
}

pub fn print_all<T: Line>(records: &[T]) {
  if records.is_empty() {
    println!("(none)");
  }
  for r in records {
    println!("{}", r.line());
  }
}

/// Format a millisecond timestamp in the local timezone.
pub fn timestamp(ms: Timestamp) -> String {
  match Local.timestamp_millis_opt(ms).single() {
    Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
    None => ms.to_string(),
  }
}

/// Parse a user-supplied time: either epoch milliseconds or RFC 3339.
pub fn parse_when(input: &str) -> Result<Timestamp> {
  let input = input.trim();
  if input.is_empty() {
    bail!("empty time");
  }
  if let Ok(ms) = input.parse::<Timestamp>() {
    return Ok(ms);
  }
  DateTime::parse_from_rfc3339(input)
    .map(|t| t.timestamp_millis())
    .with_context(|| format!("not epoch ms or RFC 3339: {input:?}"))
}

fn short_id(id: &uuid::Uuid) -> String { id.simple().to_string()[..8].to_owned() }

fn suffix(label: &str, value: Option<impl Display>) -> String {
  value.map(|v| format!("  {label}: {v}")).unwrap_or_default()
}

fn stars(rating: Option<u8>) -> String {
  match rating.filter(|r| *r > 0) {
    Some(r) => "*".repeat(usize::from(r)),
    None => "-".to_owned(),
  }
}

// ─── Records ──────────────────────────────────────────────────────────────────

impl Line for Task {
  fn line(&self) -> String {
    format!(
      "{}  [{}] {}  @{}{}",
      self.id,
      self.status,
      self.title,
      self.assigned_to,
      suffix("priority", self.priority),
    )
  }
}

impl Line for ContentItem {
  fn line(&self) -> String {
    format!(
      "{}  [{}] {} ({}){}",
      self.id,
      self.status,
      self.title,
      self.kind,
      suffix("scheduled", self.scheduled_for.map(timestamp)),
    )
  }
}

impl Line for MediaItem {
  fn line(&self) -> String {
    format!(
      "{}  {:<5} {:<5} {}  {}",
      self.id,
      self.media_type.to_string(),
      stars(self.rating),
      self.filename,
      self.project,
    )
  }
}

impl Line for Memory {
  fn line(&self) -> String {
    format!(
      "{}  [{}] {}  views: {}{}",
      self.id,
      self.category,
      self.title,
      self.view_count,
      if self.archived { "  (archived)" } else { "" },
    )
  }
}

impl Line for CalendarEvent {
  fn line(&self) -> String {
    format!(
      "{}  {}  [{}] {}{}",
      self.id,
      timestamp(self.scheduled_for),
      self.kind,
      self.title,
      if self.completed { "  (done)" } else { "" },
    )
  }
}

impl Line for TeamMember {
  fn line(&self) -> String {
    format!(
      "{}  {} ({})  {}{}",
      self.id,
      self.name,
      self.role,
      self.status,
      suffix("on", self.current_task.as_deref()),
    )
  }
}

impl Line for ActivityView {
  fn line(&self) -> String {
    let who = match (&self.member, self.entry.member_id) {
      (Some(m), _) => m.name.clone(),
      (None, Some(id)) => format!("<{}>", short_id(&id)),
      (None, None) => "system".to_owned(),
    };
    format!(
      "{}  {}  {}{}",
      timestamp(self.entry.timestamp),
      who,
      self.entry.action,
      suffix("details", self.entry.details.as_deref()),
    )
  }
}

// ─── Boards and aggregates ────────────────────────────────────────────────────

/// One board column as returned by the `/board` endpoints.
#[derive(Debug, Deserialize)]
pub struct Column<C, R> {
  pub category: C,
  pub count:    usize,
  pub records:  Vec<R>,
}

pub fn print_board<C: Display, R: Line>(columns: &[Column<C, R>]) {
  for col in columns {
    println!("== {} ({}) ==", col.category, col.count);
    for r in &col.records {
      println!("  {}", r.line());
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
  pub category: String,
  pub count:    usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryCounts {
  pub total:       usize,
  pub archived:    usize,
  pub by_category: Vec<CategoryCount>,
}

pub fn print_memory_counts(counts: &MemoryCounts) {
  println!("active: {}  archived: {}", counts.total, counts.archived);
  for c in &counts.by_category {
    println!("  {:<14} {}", c.category, c.count);
  }
}

pub fn print_media_stats(stats: &MediaStats) {
  println!(
    "total: {}  images: {}  videos: {}  rated: {}  unrated: {}",
    stats.total, stats.images, stats.videos, stats.rated, stats.unrated
  );
  for (project, n) in &stats.by_project {
    println!("  {:<18} {n}", project.to_string());
  }
  for (rating, n) in stats.by_rating.iter().rev() {
    println!("  {:<18} {n}", stars(Some(*rating)));
  }
}

pub fn print_team_stats(stats: &TeamStats) {
  println!(
    "total: {}  working: {}  idle: {}  awaiting input: {}  utilization: {}%",
    stats.total, stats.working, stats.idle, stats.awaiting_input, stats.utilization
  );
}

pub fn print_dashboard(summary: &DashboardSummary) {
  println!("active tasks     {}", summary.active_tasks);
  println!("content ideas    {}", summary.content_ideas);
  println!("media items      {}", summary.media_total);
  println!("active memories  {}", summary.active_memories);
  println!("upcoming events  {}", summary.upcoming_events);
}
