//! Handlers for the team roster.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `PUT`  | `/team/{id}/status` | Body: [`StatusUpdate`] |
//! | `GET`  | `/team/stats` | Counts per status and utilization |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use mc_core::{
  record::RecordId,
  stats::TeamStats,
  store::RecordStore,
  team::{StatusUpdate, TeamMember},
};

use crate::{error::ApiError, extract::Body, records::apply};

/// `PUT /team/{id}/status`, body: `{"status":"working","currentTask":"..."}`.
/// Without `currentTask` the current task is kept; `null` clears it.
pub async fn set_status<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
  Body(update): Body<StatusUpdate>,
) -> Result<Json<TeamMember>, ApiError>
where
  S: RecordStore,
{
  apply::<S, TeamMember>(&store, id, update.into()).await.map(Json)
}

/// `GET /team/stats`
pub async fn stats<S>(State(store): State<Arc<S>>) -> Result<Json<TeamStats>, ApiError>
where
  S: RecordStore,
{
  let members: Vec<TeamMember> = store.list().await.map_err(ApiError::from_store)?;
  Ok(Json(TeamStats::compute(&members)))
}
