//! Handlers shared by every collection.
//!
//! Each is generic over the store and the document type; `lib.rs` mounts
//! them once per module with both parameters fixed.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/<module>` | [`ViewParams`] applied through the view engine |
//! | `POST`   | `/<module>` | Body: the module's draft; returns 201 + record |
//! | `GET`    | `/<module>/{id}` | 404 if not found |
//! | `PATCH`  | `/<module>/{id}` | Body: the module's patch; 404 if not found |
//! | `DELETE` | `/<module>/{id}` | 204; 404 if not found |

use std::{str::FromStr, sync::Arc};

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use mc_core::{
  record::{Document, RecordId},
  store::RecordStore,
  view::{Viewable, compute_view},
};
use serde::de::DeserializeOwned;

use crate::{error::ApiError, extract::Body, params::ViewParams};

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /<module>[?category=...][&include_archived=...][&q=...][&threshold=...][&sort=...]`
pub async fn list<S, D>(
  State(store): State<Arc<S>>,
  Query(params): Query<ViewParams>,
) -> Result<Json<Vec<D>>, ApiError>
where
  S: RecordStore,
  D: Document + Viewable,
  D::Category: FromStr,
{
  let records: Vec<D> = store.list().await.map_err(ApiError::from_store)?;
  let config = params.config(D::DEFAULT_SORT);
  Ok(Json(compute_view(&records, &config).into_iter().cloned().collect()))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /<module>`
pub async fn create<S, D>(
  State(store): State<Arc<S>>,
  Body(draft): Body<D::Draft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
  D: Document,
  D::Draft: DeserializeOwned,
{
  let record: D = store.insert(draft).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /<module>/{id}`
pub async fn get_one<S, D>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<D>, ApiError>
where
  S: RecordStore,
  D: Document,
{
  let record = store
    .get::<D>(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| mc_core::Error::not_found(D::COLLECTION, id))?;
  Ok(Json(record))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PATCH /<module>/{id}`
pub async fn update<S, D>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
  Body(patch): Body<D::Patch>,
) -> Result<Json<D>, ApiError>
where
  S: RecordStore,
  D: Document,
  D::Patch: DeserializeOwned,
{
  apply::<S, D>(&store, id, patch).await.map(Json)
}

/// Patch helper for the action endpoints (`/complete`, `/archive`, ...).
pub(crate) async fn apply<S, D>(
  store: &S,
  id: RecordId,
  patch: D::Patch,
) -> Result<D, ApiError>
where
  S: RecordStore,
  D: Document,
{
  store.patch::<D>(id, patch).await.map_err(ApiError::from_store)
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /<module>/{id}`
pub async fn delete_one<S, D>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore,
  D: Document,
{
  store.delete::<D>(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
