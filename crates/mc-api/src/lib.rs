//! JSON REST API for Mission Control.
//!
//! Exposes an axum [`Router`] backed by any [`mc_core::store::RecordStore`].
//! Every list endpoint runs its records through the view engine, so the
//! same `category`, `include_archived`, `q`, `threshold` and `sort`
//! parameters work everywhere. Auth, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", mc_api::api_router(store.clone()))
//! ```

pub mod activity;
pub mod calendar;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod media;
pub mod memories;
pub mod params;
pub mod records;
pub mod tasks;
pub mod team;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use mc_core::{
  activity::ActivityEntry, calendar::CalendarEvent, content::ContentItem,
  media::MediaItem, memory::Memory, store::RecordStore, task::Task,
  team::TeamMember,
};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Tasks
    .route("/tasks", get(records::list::<S, Task>).post(records::create::<S, Task>))
    .route("/tasks/board", get(tasks::board_view::<S>))
    .route(
      "/tasks/{id}",
      get(records::get_one::<S, Task>)
        .patch(records::update::<S, Task>)
        .delete(records::delete_one::<S, Task>),
    )
    // Content pipeline
    .route(
      "/content",
      get(content::list::<S>).post(records::create::<S, ContentItem>),
    )
    .route("/content/board", get(content::board_view::<S>))
    .route(
      "/content/{id}",
      get(records::get_one::<S, ContentItem>)
        .patch(records::update::<S, ContentItem>)
        .delete(records::delete_one::<S, ContentItem>),
    )
    // Media library
    .route("/media", get(media::list::<S>).post(records::create::<S, MediaItem>))
    .route("/media/stats", get(media::stats::<S>))
    .route("/media/ratings/clear", post(media::clear_ratings::<S>))
    .route(
      "/media/{id}",
      get(records::get_one::<S, MediaItem>)
        .patch(records::update::<S, MediaItem>)
        .delete(records::delete_one::<S, MediaItem>),
    )
    .route("/media/{id}/rating", put(media::set_rating::<S>))
    // Memory bank
    .route(
      "/memories",
      get(records::list::<S, Memory>).post(records::create::<S, Memory>),
    )
    .route("/memories/archived", get(memories::archived::<S>))
    .route("/memories/counts", get(memories::counts::<S>))
    .route(
      "/memories/{id}",
      get(records::get_one::<S, Memory>)
        .patch(records::update::<S, Memory>)
        .delete(records::delete_one::<S, Memory>),
    )
    .route("/memories/{id}/view", post(memories::view::<S>))
    .route("/memories/{id}/archive", post(memories::archive::<S>))
    .route("/memories/{id}/unarchive", post(memories::unarchive::<S>))
    .route("/memories/{id}/review", post(memories::review::<S>))
    // Calendar
    .route(
      "/calendar",
      get(calendar::list::<S>).post(records::create::<S, CalendarEvent>),
    )
    .route("/calendar/upcoming", get(calendar::upcoming::<S>))
    .route(
      "/calendar/{id}",
      get(records::get_one::<S, CalendarEvent>)
        .patch(records::update::<S, CalendarEvent>)
        .delete(records::delete_one::<S, CalendarEvent>),
    )
    .route("/calendar/{id}/complete", post(calendar::complete::<S>))
    // Team
    .route(
      "/team",
      get(records::list::<S, TeamMember>).post(records::create::<S, TeamMember>),
    )
    .route("/team/stats", get(team::stats::<S>))
    .route(
      "/team/{id}",
      get(records::get_one::<S, TeamMember>)
        .patch(records::update::<S, TeamMember>)
        .delete(records::delete_one::<S, TeamMember>),
    )
    .route("/team/{id}/status", put(team::set_status::<S>))
    // Activity
    .route(
      "/activity",
      get(activity::list::<S>).post(records::create::<S, ActivityEntry>),
    )
    // Dashboard
    .route("/dashboard", get(dashboard::summary::<S>))
    .with_state(store)
}
