//! Handlers for the media library.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/media` | View params plus `project`, `type`, `minRating`; at most 100 items |
//! | `GET`  | `/media/stats` | Totals by type, project and rating |
//! | `PUT`  | `/media/{id}/rating` | Body: `{"rating":1..5}` or `{"rating":null}` |
//! | `POST` | `/media/ratings/clear` | Unrates everything; returns `{"cleared":n}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use mc_core::{
  media::{LIST_LIMIT, MediaFilter, MediaIndex, MediaItem, MediaPatch, Project},
  record::RecordId,
  stats::MediaStats,
  store::RecordStore,
  view::{ViewMode, Viewable as _, compute_view},
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::Body, params::ViewParams, records::apply};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct MediaParams {
  #[serde(flatten)]
  pub view:       ViewParams,
  /// Alias for `category`; wins when both are given.
  pub project:    Option<String>,
  #[serde(rename = "type")]
  pub media_type: Option<String>,
  #[serde(rename = "minRating")]
  pub min_rating: Option<String>,
}

/// `GET /media[?project=...][&type=image|video][&minRating=1..5][&q=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<MediaParams>,
) -> Result<Json<Vec<MediaItem>>, ApiError>
where
  S: RecordStore,
{
  let mut config = params.view.config::<Project>(MediaItem::DEFAULT_SORT);
  if let Some(project) = params.project.as_deref().and_then(|p| p.parse().ok()) {
    config.category = Some(project);
  }
  let filter = MediaFilter {
    media_type: params.media_type.as_deref().and_then(|t| t.parse().ok()),
    min_rating: params.min_rating.as_deref().and_then(|r| r.parse().ok()),
  };

  let items: Vec<MediaItem> = match (config.mode(), config.category) {
    (ViewMode::Filter, Some(project)) => store
      .lookup(MediaIndex::ByProject(project))
      .await
      .map_err(ApiError::from_store)?,
    _ => store.list().await.map_err(ApiError::from_store)?,
  };

  Ok(Json(
    compute_view(&items, &config)
      .into_iter()
      .filter(|item| filter.matches(item))
      .take(LIST_LIMIT)
      .cloned()
      .collect(),
  ))
}

// ─── Ratings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RatingBody {
  /// `null` unrates the item.
  pub rating: Option<u8>,
}

/// `PUT /media/{id}/rating`
pub async fn set_rating<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
  Body(body): Body<RatingBody>,
) -> Result<Json<MediaItem>, ApiError>
where
  S: RecordStore,
{
  let patch = match body.rating {
    Some(rating) => MediaPatch::rate(rating),
    None => MediaPatch::unrate(),
  };
  apply::<S, MediaItem>(&store, id, patch).await.map(Json)
}

#[derive(Debug, Serialize)]
pub struct ClearedRatings {
  pub cleared: usize,
}

/// `POST /media/ratings/clear`
pub async fn clear_ratings<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<ClearedRatings>, ApiError>
where
  S: RecordStore,
{
  let items: Vec<MediaItem> = store.list().await.map_err(ApiError::from_store)?;
  let rated: Vec<RecordId> = items
    .iter()
    .filter(|item| item.rating.is_some())
    .map(|item| item.id)
    .collect();

  for id in &rated {
    apply::<S, MediaItem>(&store, *id, MediaPatch::unrate()).await?;
  }
  tracing::info!(cleared = rated.len(), "cleared media ratings");
  Ok(Json(ClearedRatings { cleared: rated.len() }))
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// `GET /media/stats`
pub async fn stats<S>(State(store): State<Arc<S>>) -> Result<Json<MediaStats>, ApiError>
where
  S: RecordStore,
{
  let items: Vec<MediaItem> = store.list().await.map_err(ApiError::from_store)?;
  Ok(Json(MediaStats::compute(&items)))
}
