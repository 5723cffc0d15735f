//! HTTP server wiring for Mission Control.
//!
//! Mounts the JSON API under `/api`, adds request tracing, and follows the
//! store's change feed so every committed mutation shows up in the log.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use mc_core::store::Change;
use mc_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::{sync::broadcast, task::JoinHandle};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `MC_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       4000,
      store_path: PathBuf::from("~/.local/share/mission-control/mc.db"),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router(store: Arc<SqliteStore>) -> Router {
  Router::new()
    .nest("/api", mc_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Change feed ─────────────────────────────────────────────────────────────

/// Log every change received on `changes` until the store is dropped.
pub fn spawn_change_logger(mut changes: broadcast::Receiver<Change>) -> JoinHandle<()> {
  tokio::spawn(async move {
    loop {
      match changes.recv().await {
        Ok(Change { collection, id, op }) => {
          tracing::info!(%collection, %id, ?op, "record changed");
        }
        Err(broadcast::error::RecvError::Lagged(missed)) => {
          tracing::warn!(missed, "change logger fell behind");
        }
        Err(broadcast::error::RecvError::Closed) => break,
      }
    }
  })
}

// ─── Integration tests ────────────────────────────────────────────────────────
