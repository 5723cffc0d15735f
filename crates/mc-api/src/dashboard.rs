//! Handler for `GET /dashboard`.

use std::sync::Arc;

use axum::{Json, extract::State};
use mc_core::{
  calendar::CalendarEvent,
  content::ContentItem,
  media::MediaItem,
  memory::Memory,
  record::now_ms,
  stats::DashboardSummary,
  store::RecordStore,
  task::Task,
};

use crate::error::ApiError;

/// `GET /dashboard`
pub async fn summary<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<DashboardSummary>, ApiError>
where
  S: RecordStore,
{
  let (tasks, content, media, memories, events) = tokio::try_join!(
    store.list::<Task>(),
    store.list::<ContentItem>(),
    store.list::<MediaItem>(),
    store.list::<Memory>(),
    store.list::<CalendarEvent>(),
  )
  .map_err(ApiError::from_store)?;

  Ok(Json(DashboardSummary::compute(
    &tasks, &content, &media, &memories, &events, now_ms(),
  )))
}
