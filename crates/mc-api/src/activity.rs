//! Handlers for `/activity`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/activity` | Newest first; `limit` defaults to 50; `category=<member id>` filters |
//! | `POST` | `/activity` | Body: `NewActivity`; returns 201 + entry |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use mc_core::{
  activity::{self, ActivityEntry, ActivityView, LIST_LIMIT},
  record::RecordId,
  store::RecordStore,
  team::TeamMember,
  view::{Viewable as _, compute_view},
};
use serde::Deserialize;

use crate::{error::ApiError, params::ViewParams};

#[derive(Debug, Default, Deserialize)]
pub struct ActivityParams {
  #[serde(flatten)]
  pub view:  ViewParams,
  pub limit: Option<String>,
}

/// `GET /activity[?limit=n][&category=<member id>][&q=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ActivityParams>,
) -> Result<Json<Vec<ActivityView>>, ApiError>
where
  S: RecordStore,
{
  let entries: Vec<ActivityEntry> = store.list().await.map_err(ApiError::from_store)?;
  let roster: Vec<TeamMember> = store.list().await.map_err(ApiError::from_store)?;

  let limit = params
    .limit
    .as_deref()
    .and_then(|l| l.parse().ok())
    .unwrap_or(LIST_LIMIT);
  let config = params.view.config::<RecordId>(ActivityEntry::DEFAULT_SORT);
  let visible = compute_view(&entries, &config);

  Ok(Json(activity::resolve(visible.into_iter().take(limit), &roster)))
}
