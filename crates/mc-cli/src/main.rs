//! `mc`, the command-line client for the Mission Control API.
//!
//! # Usage
//!
//! ```text
//! mc --url http://localhost:4000 tasks board
//! mc tasks add "Write launch post" --priority high
//! mc memories list -q rust --threshold 4
//! mc --config ~/.config/mission-control/cli.toml dashboard
//! ```

mod client;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use mc_core::{
  activity::{ActivityView, NewActivity},
  calendar::{CalendarEvent, EventType, NewCalendarEvent},
  content::{ContentItem, ContentKind, ContentPatch, ContentStatus, NewContent},
  media::{MediaItem, MediaType, NewMedia, Project},
  memory::{Memory, MemoryCategory, NewMemory},
  record::RecordId,
  stats::{DashboardSummary, MediaStats, TeamStats},
  task::{Assignee, NewTask, Priority, Task, TaskPatch, TaskStatus},
  team::{MemberStatus, NewTeamMember, StatusUpdate, TeamMember},
};
use render::{Column, Line as _, MemoryCounts, print_all, print_board};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "mc", about = "Command-line client for Mission Control")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the Mission Control server (default: http://localhost:4000).
  #[arg(long, env = "MC_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

/// Filtering shared by every listing.
#[derive(ClapArgs, Debug, Default)]
struct ViewArgs {
  /// Restrict to one category (status, type, project, ...).
  #[arg(long)]
  category:  Option<String>,
  /// Include archived or completed records.
  #[arg(short, long)]
  all:       bool,
  /// Free-text search.
  #[arg(short, long)]
  q:         Option<String>,
  /// Minimum search length before filtering kicks in.
  #[arg(long)]
  threshold: Option<usize>,
  /// Sort key: createdAt-desc, scheduledFor-asc, viewCount-desc.
  #[arg(long)]
  sort:      Option<String>,
}

impl ViewArgs {
  fn query(&self) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(c) = &self.category {
      query.push(("category", c.clone()));
    }
    if self.all {
      query.push(("include_archived", "true".to_owned()));
    }
    if let Some(q) = &self.q {
      query.push(("q", q.clone()));
    }
    if let Some(t) = self.threshold {
      query.push(("threshold", t.to_string()));
    }
    if let Some(s) = &self.sort {
      query.push(("sort", s.clone()));
    }
    query
  }
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Task board.
  #[command(subcommand)]
  Tasks(TaskCmd),
  /// Content pipeline.
  #[command(subcommand)]
  Content(ContentCmd),
  /// Media library.
  #[command(subcommand)]
  Media(MediaCmd),
  /// Memory bank.
  #[command(subcommand)]
  Memories(MemoryCmd),
  /// Calendar.
  #[command(subcommand)]
  Calendar(CalendarCmd),
  /// Team roster.
  #[command(subcommand)]
  Team(TeamCmd),
  /// Activity log.
  #[command(subcommand)]
  Activity(ActivityCmd),
  /// Headline numbers.
  Dashboard,
}

#[derive(Subcommand, Debug)]
enum TaskCmd {
  List {
    #[command(flatten)]
    view: ViewArgs,
  },
  Board {
    #[arg(short, long)]
    q: Option<String>,
  },
  Add {
    title:       String,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(long)]
    status:      Option<TaskStatus>,
    #[arg(long)]
    assign:      Option<Assignee>,
    #[arg(long)]
    priority:    Option<Priority>,
  },
  /// Move a task to another column.
  Move { id: RecordId, status: TaskStatus },
  Rm { id: RecordId },
}

#[derive(Subcommand, Debug)]
enum ContentCmd {
  List {
    #[command(flatten)]
    view: ViewArgs,
  },
  Board {
    #[arg(short, long)]
    q: Option<String>,
  },
  Add {
    title:  String,
    #[arg(long = "type")]
    kind:   ContentKind,
    #[arg(long)]
    status: Option<ContentStatus>,
    #[arg(long)]
    notes:  Option<String>,
  },
  /// Move an item to another pipeline stage.
  Move { id: RecordId, status: ContentStatus },
  Rm { id: RecordId },
}

#[derive(Subcommand, Debug)]
enum MediaCmd {
  List {
    #[command(flatten)]
    view:       ViewArgs,
    #[arg(long)]
    project:    Option<Project>,
    #[arg(long = "type")]
    media_type: Option<MediaType>,
    #[arg(long)]
    min_rating: Option<u8>,
  },
  Add {
    filename:   String,
    path:       String,
    #[arg(long = "type")]
    media_type: MediaType,
    #[arg(long)]
    project:    Option<Project>,
  },
  /// Set a 1-5 star rating; omit the rating to clear it.
  Rate { id: RecordId, rating: Option<u8> },
  /// Remove every rating in the library.
  ClearRatings,
  Stats,
  Rm { id: RecordId },
}

#[derive(Subcommand, Debug)]
enum MemoryCmd {
  List {
    #[command(flatten)]
    view: ViewArgs,
  },
  Archived {
    #[command(flatten)]
    view: ViewArgs,
  },
  Add {
    title:    String,
    content:  String,
    #[arg(long)]
    category: MemoryCategory,
    #[arg(long, value_delimiter = ',')]
    tags:     Vec<String>,
  },
  /// Print a memory in full and count the view.
  Show { id: RecordId },
  Archive { id: RecordId },
  Unarchive { id: RecordId },
  Review { id: RecordId },
  Counts,
  Rm { id: RecordId },
}

#[derive(Subcommand, Debug)]
enum CalendarCmd {
  List {
    #[command(flatten)]
    view: ViewArgs,
    /// Window start (epoch ms or RFC 3339).
    #[arg(long)]
    from: Option<String>,
    /// Window end (epoch ms or RFC 3339).
    #[arg(long)]
    to:   Option<String>,
  },
  Upcoming {
    #[arg(short = 'n', long)]
    limit: Option<usize>,
  },
  Add {
    title:       String,
    /// When (epoch ms or RFC 3339).
    at:          String,
    #[arg(long = "type")]
    kind:        EventType,
    #[arg(short, long)]
    description: Option<String>,
  },
  Done { id: RecordId },
  Rm { id: RecordId },
}

#[derive(Subcommand, Debug)]
enum TeamCmd {
  List {
    #[command(flatten)]
    view: ViewArgs,
  },
  Add {
    name: String,
    role: String,
    #[arg(short, long)]
    description: Option<String>,
  },
  Status {
    id:         RecordId,
    status:     MemberStatus,
    /// What the member is working on; omitted keeps the current task.
    #[arg(long, conflicts_with = "clear_task")]
    task:       Option<String>,
    /// Clear the current task.
    #[arg(long)]
    clear_task: bool,
  },
  Stats,
  Rm { id: RecordId },
}

#[derive(Subcommand, Debug)]
enum ActivityCmd {
  List {
    #[command(flatten)]
    view:  ViewArgs,
    #[arg(short = 'n', long)]
    limit: Option<usize>,
  },
  /// Append an entry to the log.
  Log {
    action:  String,
    #[arg(long)]
    member:  Option<RecordId>,
    #[arg(short, long)]
    details: Option<String>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:4000".to_string()),
  };
  let client = ApiClient::new(api_config)?;

  match args.command {
    Command::Tasks(cmd) => tasks(&client, cmd).await,
    Command::Content(cmd) => content(&client, cmd).await,
    Command::Media(cmd) => media(&client, cmd).await,
    Command::Memories(cmd) => memories(&client, cmd).await,
    Command::Calendar(cmd) => calendar(&client, cmd).await,
    Command::Team(cmd) => team(&client, cmd).await,
    Command::Activity(cmd) => activity(&client, cmd).await,
    Command::Dashboard => {
      let summary: DashboardSummary = client.get("/dashboard", &[]).await?;
      render::print_dashboard(&summary);
      Ok(())
    }
  }
}

fn search(q: Option<String>) -> Vec<(&'static str, String)> {
  q.map(|q| vec![("q", q)]).unwrap_or_default()
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn tasks(client: &ApiClient, cmd: TaskCmd) -> Result<()> {
  match cmd {
    TaskCmd::List { view } => {
      let tasks: Vec<Task> = client.get("/tasks", &view.query()).await?;
      print_all(&tasks);
    }
    TaskCmd::Board { q } => {
      let columns: Vec<Column<TaskStatus, Task>> =
        client.get("/tasks/board", &search(q)).await?;
      print_board(&columns);
    }
    TaskCmd::Add { title, description, status, assign, priority } => {
      let draft = NewTask { title, description, status, assigned_to: assign, priority };
      let task: Task = client.send(Method::POST, "/tasks", &draft).await?;
      println!("{}", task.line());
    }
    TaskCmd::Move { id, status } => {
      let patch = TaskPatch::status(status);
      let task: Task = client.send(Method::PATCH, &format!("/tasks/{id}"), &patch).await?;
      println!("{}", task.line());
    }
    TaskCmd::Rm { id } => client.delete(&format!("/tasks/{id}")).await?,
  }
  Ok(())
}

async fn content(client: &ApiClient, cmd: ContentCmd) -> Result<()> {
  match cmd {
    ContentCmd::List { view } => {
      let items: Vec<ContentItem> = client.get("/content", &view.query()).await?;
      print_all(&items);
    }
    ContentCmd::Board { q } => {
      let columns: Vec<Column<ContentStatus, ContentItem>> =
        client.get("/content/board", &search(q)).await?;
      print_board(&columns);
    }
    ContentCmd::Add { title, kind, status, notes } => {
      let mut draft = NewContent::new(title, kind);
      draft.status = status;
      draft.notes = notes;
      let item: ContentItem = client.send(Method::POST, "/content", &draft).await?;
      println!("{}", item.line());
    }
    ContentCmd::Move { id, status } => {
      let item: ContentItem = client
        .send(Method::PATCH, &format!("/content/{id}"), &ContentPatch::status(status))
        .await?;
      println!("{}", item.line());
    }
    ContentCmd::Rm { id } => client.delete(&format!("/content/{id}")).await?,
  }
  Ok(())
}

async fn media(client: &ApiClient, cmd: MediaCmd) -> Result<()> {
  match cmd {
    MediaCmd::List { view, project, media_type, min_rating } => {
      let mut query = view.query();
      if let Some(p) = project {
        query.push(("project", p.to_string()));
      }
      if let Some(t) = media_type {
        query.push(("type", t.to_string()));
      }
      if let Some(r) = min_rating {
        query.push(("minRating", r.to_string()));
      }
      let items: Vec<MediaItem> = client.get("/media", &query).await?;
      print_all(&items);
    }
    MediaCmd::Add { filename, path, media_type, project } => {
      let mut draft = NewMedia::new(filename, path, media_type);
      draft.project = project;
      let item: MediaItem = client.send(Method::POST, "/media", &draft).await?;
      println!("{}", item.line());
    }
    MediaCmd::Rate { id, rating } => {
      let item: MediaItem = client
        .send(Method::PUT, &format!("/media/{id}/rating"), &json!({ "rating": rating }))
        .await?;
      println!("{}", item.line());
    }
    MediaCmd::ClearRatings => {
      let reply: serde_json::Value = client.action("/media/ratings/clear").await?;
      println!("cleared {} ratings", reply["cleared"]);
    }
    MediaCmd::Stats => {
      let stats: MediaStats = client.get("/media/stats", &[]).await?;
      render::print_media_stats(&stats);
    }
    MediaCmd::Rm { id } => client.delete(&format!("/media/{id}")).await?,
  }
  Ok(())
}

async fn memories(client: &ApiClient, cmd: MemoryCmd) -> Result<()> {
  match cmd {
    MemoryCmd::List { view } => {
      let memories: Vec<Memory> = client.get("/memories", &view.query()).await?;
      print_all(&memories);
    }
    MemoryCmd::Archived { view } => {
      let memories: Vec<Memory> = client.get("/memories/archived", &view.query()).await?;
      print_all(&memories);
    }
    MemoryCmd::Add { title, content, category, tags } => {
      let mut draft = NewMemory::new(title, content, category);
      draft.tags = (!tags.is_empty()).then_some(tags);
      let memory: Memory = client.send(Method::POST, "/memories", &draft).await?;
      println!("{}", memory.line());
    }
    MemoryCmd::Show { id } => {
      let memory: Memory = client.action(&format!("/memories/{id}/view")).await?;
      println!("{}\n\n{}", memory.line(), memory.content);
      if let Some(at) = memory.reviewed_at {
        println!("\nreviewed {}", render::timestamp(at));
      }
    }
    MemoryCmd::Archive { id } => memory_action(client, id, "archive").await?,
    MemoryCmd::Unarchive { id } => memory_action(client, id, "unarchive").await?,
    MemoryCmd::Review { id } => memory_action(client, id, "review").await?,
    MemoryCmd::Counts => {
      let counts: MemoryCounts = client.get("/memories/counts", &[]).await?;
      render::print_memory_counts(&counts);
    }
    MemoryCmd::Rm { id } => client.delete(&format!("/memories/{id}")).await?,
  }
  Ok(())
}

async fn memory_action(client: &ApiClient, id: RecordId, action: &str) -> Result<()> {
  let memory: Memory = client.action(&format!("/memories/{id}/{action}")).await?;
  println!("{}", memory.line());
  Ok(())
}

async fn calendar(client: &ApiClient, cmd: CalendarCmd) -> Result<()> {
  match cmd {
    CalendarCmd::List { view, from, to } => {
      let mut query = view.query();
      if let Some(from) = from {
        query.push(("from", render::parse_when(&from)?.to_string()));
      }
      if let Some(to) = to {
        query.push(("to", render::parse_when(&to)?.to_string()));
      }
      let events: Vec<CalendarEvent> = client.get("/calendar", &query).await?;
      print_all(&events);
    }
    CalendarCmd::Upcoming { limit } => {
      let query: Vec<_> = limit.map(|n| ("limit", n.to_string())).into_iter().collect();
      let events: Vec<CalendarEvent> = client.get("/calendar/upcoming", &query).await?;
      print_all(&events);
    }
    CalendarCmd::Add { title, at, kind, description } => {
      let draft =
        NewCalendarEvent { title, description, kind, scheduled_for: render::parse_when(&at)? };
      let event: CalendarEvent = client.send(Method::POST, "/calendar", &draft).await?;
      println!("{}", event.line());
    }
    CalendarCmd::Done { id } => {
      let event: CalendarEvent = client.action(&format!("/calendar/{id}/complete")).await?;
      println!("{}", event.line());
    }
    CalendarCmd::Rm { id } => client.delete(&format!("/calendar/{id}")).await?,
  }
  Ok(())
}

async fn team(client: &ApiClient, cmd: TeamCmd) -> Result<()> {
  match cmd {
    TeamCmd::List { view } => {
      let members: Vec<TeamMember> = client.get("/team", &view.query()).await?;
      print_all(&members);
    }
    TeamCmd::Add { name, role, description } => {
      let mut draft = NewTeamMember::new(name, role);
      draft.description = description;
      let member: TeamMember = client.send(Method::POST, "/team", &draft).await?;
      println!("{}", member.line());
    }
    TeamCmd::Status { id, status, task, clear_task } => {
      let current_task = if clear_task { Some(None) } else { task.map(Some) };
      let update = StatusUpdate { status, current_task };
      let member: TeamMember =
        client.send(Method::PUT, &format!("/team/{id}/status"), &update).await?;
      println!("{}", member.line());
    }
    TeamCmd::Stats => {
      let stats: TeamStats = client.get("/team/stats", &[]).await?;
      render::print_team_stats(&stats);
    }
    TeamCmd::Rm { id } => client.delete(&format!("/team/{id}")).await?,
  }
  Ok(())
}

async fn activity(client: &ApiClient, cmd: ActivityCmd) -> Result<()> {
  match cmd {
    ActivityCmd::List { view, limit } => {
      let mut query = view.query();
      if let Some(n) = limit {
        query.push(("limit", n.to_string()));
      }
      let entries: Vec<ActivityView> = client.get("/activity", &query).await?;
      print_all(&entries);
    }
    ActivityCmd::Log { action, member, details } => {
      let mut draft = NewActivity::new(member, action);
      draft.details = details;
      client
        .send::<_, serde_json::Value>(Method::POST, "/activity", &draft)
        .await?;
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory as _;
  use uuid::Uuid;

  use super::*;

  #[test]
  fn cli_definition_is_consistent() { Args::command().debug_assert(); }

  #[test]
  fn view_args_become_query_pairs() {
    let args = Args::parse_from(["mc", "memories", "list", "-a", "-q", "rust", "--threshold", "4"]);
    let Command::Memories(MemoryCmd::List { view }) = args.command else {
      panic!("wrong command");
    };
    assert_eq!(
      view.query(),
      vec![
        ("include_archived", "true".to_owned()),
        ("q", "rust".to_owned()),
        ("threshold", "4".to_owned()),
      ]
    );
  }

  #[test]
  fn enum_arguments_use_wire_names() {
    let args = Args::parse_from(["mc", "tasks", "move", &Uuid::nil().to_string(), "in_progress"]);
    let Command::Tasks(TaskCmd::Move { status, .. }) = args.command else {
      panic!("wrong command");
    };
    assert_eq!(status, TaskStatus::InProgress);
  }
}
