//! Handlers for the calendar.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/calendar` | Optional `from`/`to` (ms) window on `scheduledFor`; soonest first |
//! | `GET`  | `/calendar/upcoming` | Incomplete events from now on; `limit` defaults to 10 |
//! | `POST` | `/calendar/{id}/complete` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use mc_core::{
  calendar::{self, CalendarEvent, CalendarPatch, EventType, UPCOMING_LIMIT},
  record::{RecordId, now_ms},
  store::RecordStore,
  view::{Viewable as _, compute_view},
};
use serde::Deserialize;

use crate::{error::ApiError, params::ViewParams, records::apply};

#[derive(Debug, Default, Deserialize)]
pub struct CalendarParams {
  #[serde(flatten)]
  pub view: ViewParams,
  pub from: Option<String>,
  pub to:   Option<String>,
}

/// `GET /calendar[?from=<ms>][&to=<ms>][&category=<type>][&include_archived=true]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<CalendarParams>,
) -> Result<Json<Vec<CalendarEvent>>, ApiError>
where
  S: RecordStore,
{
  let events: Vec<CalendarEvent> = store.list().await.map_err(ApiError::from_store)?;
  let from = params.from.as_deref().and_then(|f| f.parse().ok());
  let to = params.to.as_deref().and_then(|t| t.parse().ok());
  let window = calendar::in_window(&events, from, to);

  let config = params.view.config::<EventType>(CalendarEvent::DEFAULT_SORT);
  Ok(Json(compute_view(&window, &config).into_iter().cloned().collect()))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpcomingParams {
  pub limit: Option<usize>,
}

/// `GET /calendar/upcoming[?limit=n]`
pub async fn upcoming<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<UpcomingParams>,
) -> Result<Json<Vec<CalendarEvent>>, ApiError>
where
  S: RecordStore,
{
  let events: Vec<CalendarEvent> = store.list().await.map_err(ApiError::from_store)?;
  let limit = params.limit.unwrap_or(UPCOMING_LIMIT);
  Ok(Json(
    calendar::upcoming(&events, now_ms(), limit)
      .into_iter()
      .cloned()
      .collect(),
  ))
}

/// `POST /calendar/{id}/complete`
pub async fn complete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<CalendarEvent>, ApiError>
where
  S: RecordStore,
{
  apply::<S, CalendarEvent>(&store, id, CalendarPatch::complete())
    .await
    .map(Json)
}
