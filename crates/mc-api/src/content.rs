//! Handlers for the content pipeline.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/content` | View params; a stage filter is served from the status index |
//! | `GET`  | `/content/board` | One column per pipeline stage |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  response::{IntoResponse, Response},
};
use mc_core::{
  content::{ContentIndex, ContentItem, ContentStatus},
  store::RecordStore,
  view::{ViewMode, Viewable as _, board, compute_view},
};
use strum::IntoEnumIterator as _;

use crate::{error::ApiError, params::ViewParams};

/// `GET /content[?category=<status>][&q=...][&sort=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ViewParams>,
) -> Result<Json<Vec<ContentItem>>, ApiError>
where
  S: RecordStore,
{
  let config = params.config::<ContentStatus>(ContentItem::DEFAULT_SORT);

  let items: Vec<ContentItem> = match (config.mode(), config.category) {
    (ViewMode::Filter, Some(status)) => store
      .lookup(ContentIndex::ByStatus(status))
      .await
      .map_err(ApiError::from_store)?,
    _ => store.list().await.map_err(ApiError::from_store)?,
  };

  Ok(Json(compute_view(&items, &config).into_iter().cloned().collect()))
}

/// `GET /content/board[?q=...]`
pub async fn board_view<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ViewParams>,
) -> Result<Response, ApiError>
where
  S: RecordStore,
{
  let items: Vec<ContentItem> = store.list().await.map_err(ApiError::from_store)?;
  let config = params.config(ContentItem::DEFAULT_SORT).with_category(None);
  let visible = compute_view(&items, &config);
  Ok(Json(board(&visible, ContentStatus::iter())).into_response())
}
