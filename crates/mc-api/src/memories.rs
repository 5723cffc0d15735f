//! Handlers for the memory bank.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/memories/archived` | Archived memories only; view params apply |
//! | `GET`  | `/memories/counts` | Per-category counts of active memories |
//! | `POST` | `/memories/{id}/view` | Increments `viewCount` by one |
//! | `POST` | `/memories/{id}/archive` | Also stamps `reviewedAt` |
//! | `POST` | `/memories/{id}/unarchive` | |
//! | `POST` | `/memories/{id}/review` | Stamps `reviewedAt` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use mc_core::{
  memory::{Memory, MemoryCategory, MemoryPatch},
  record::RecordId,
  store::RecordStore,
  view::{Viewable as _, compute_view, count_by_category},
};
use serde::Serialize;
use strum::IntoEnumIterator as _;

use crate::{error::ApiError, params::ViewParams, records::apply};

/// `GET /memories/archived[?category=...][&sort=...]`
pub async fn archived<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ViewParams>,
) -> Result<Json<Vec<Memory>>, ApiError>
where
  S: RecordStore,
{
  let memories: Vec<Memory> = store.list().await.map_err(ApiError::from_store)?;
  let archived: Vec<Memory> = memories.into_iter().filter(|m| m.archived).collect();
  let config = params
    .config::<MemoryCategory>(Memory::DEFAULT_SORT)
    .with_archived(true);
  Ok(Json(compute_view(&archived, &config).into_iter().cloned().collect()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
  pub category: MemoryCategory,
  pub count:    usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryCounts {
  /// Active (non-archived) memories.
  pub total:       usize,
  pub archived:    usize,
  pub by_category: Vec<CategoryCount>,
}

/// `GET /memories/counts`
pub async fn counts<S>(State(store): State<Arc<S>>) -> Result<Json<MemoryCounts>, ApiError>
where
  S: RecordStore,
{
  let memories: Vec<Memory> = store.list().await.map_err(ApiError::from_store)?;
  let (archived, active): (Vec<Memory>, Vec<Memory>) =
    memories.into_iter().partition(|m| m.archived);

  let by_category = count_by_category(&active, MemoryCategory::iter())
    .into_iter()
    .map(|(category, count)| CategoryCount { category, count })
    .collect();

  Ok(Json(MemoryCounts { total: active.len(), archived: archived.len(), by_category }))
}

/// `POST /memories/{id}/view`
pub async fn view<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<Memory>, ApiError>
where
  S: RecordStore,
{
  apply::<S, Memory>(&store, id, MemoryPatch::view()).await.map(Json)
}

/// `POST /memories/{id}/archive`
pub async fn archive<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<Memory>, ApiError>
where
  S: RecordStore,
{
  apply::<S, Memory>(&store, id, MemoryPatch::archive()).await.map(Json)
}

/// `POST /memories/{id}/unarchive`
pub async fn unarchive<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<Memory>, ApiError>
where
  S: RecordStore,
{
  apply::<S, Memory>(&store, id, MemoryPatch::unarchive()).await.map(Json)
}

/// `POST /memories/{id}/review`
pub async fn review<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<Memory>, ApiError>
where
  S: RecordStore,
{
  apply::<S, Memory>(&store, id, MemoryPatch::reviewed()).await.map(Json)
}
