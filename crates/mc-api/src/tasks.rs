//! Handlers for task-board endpoints beyond plain CRUD.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/tasks/board` | One column per status, in workflow order |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  response::{IntoResponse, Response},
};
use mc_core::{
  store::RecordStore,
  task::{Task, TaskStatus},
  view::{Viewable as _, board, compute_view},
};
use strum::IntoEnumIterator as _;

use crate::{error::ApiError, params::ViewParams};

/// `GET /tasks/board[?q=...]`
pub async fn board_view<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ViewParams>,
) -> Result<Response, ApiError>
where
  S: RecordStore,
{
  let tasks: Vec<Task> = store.list().await.map_err(ApiError::from_store)?;
  // Columns are the categories, so a category filter would empty all but one.
  let config = params.config(Task::DEFAULT_SORT).with_category(None);
  let visible = compute_view(&tasks, &config);
  Ok(Json(board(&visible, TaskStatus::iter())).into_response())
}
