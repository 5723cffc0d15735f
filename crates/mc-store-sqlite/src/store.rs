//! The SQLite implementation of [`RecordStore`].

use std::path::Path;

use mc_core::{
  record::{Document, IndexKey as _, RecordId, Validate as _, now_ms},
  store::{Change, ChangeOp, RecordStore},
};
use rusqlite::OptionalExtension as _;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{
  Result,
  encode::{
    decode_document, decode_documents, encode_document, encode_index_value,
    encode_uuid, index_expr, json_in_call,
  },
  schema::SCHEMA,
};

/// How many unreceived change events a slow subscriber may fall behind by
/// before it starts missing them.
const CHANGE_BUFFER: usize = 256;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Mission Control record store backed by a single SQLite file.
///
/// Cloning is cheap; clones share the connection and the change feed.
#[derive(Clone)]
pub struct SqliteStore {
  conn:    tokio_rusqlite::Connection,
  changes: broadcast::Sender<Change>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    let (changes, _) = broadcast::channel(CHANGE_BUFFER);
    Ok(Self { conn, changes })
  }

  /// Receive a [`Change`] for every mutation committed after this call.
  pub fn subscribe(&self) -> broadcast::Receiver<Change> { self.changes.subscribe() }

  fn publish<D: Document>(&self, id: RecordId, op: ChangeOp) {
    tracing::debug!(collection = %D::COLLECTION, %id, ?op, "record changed");
    // Sending only fails when nobody is subscribed.
    let _ = self.changes.send(Change { collection: D::COLLECTION, id, op });
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn list<D: Document>(&self) -> Result<Vec<D>> {
    let collection = D::COLLECTION.to_string();

    let bodies: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare("SELECT body FROM documents WHERE collection = ?1 ORDER BY seq")?;
        let rows = stmt
          .query_map(rusqlite::params![collection], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    decode_documents(&bodies)
  }

  async fn lookup<D: Document>(&self, key: D::Index) -> Result<Vec<D>> {
    let collection = D::COLLECTION.to_string();
    let sql = format!(
      "SELECT body FROM documents WHERE collection = ?1 AND {} = ?2 ORDER BY seq",
      index_expr(key.field()),
    );
    let value = encode_index_value(key.value());

    let bodies: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![collection, value], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    decode_documents(&bodies)
  }

  async fn get<D: Document>(&self, id: RecordId) -> Result<Option<D>> {
    let collection = D::COLLECTION.to_string();
    let id_str = encode_uuid(id);

    let body: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
              rusqlite::params![collection, id_str],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    body.as_deref().map(decode_document).transpose()
  }

  async fn insert<D: Document>(&self, draft: D::Draft) -> Result<D> {
    draft.validate()?;

    let record = D::from_draft(Uuid::new_v4(), now_ms(), draft);
    let collection = D::COLLECTION.to_string();
    let id_str = encode_uuid(record.id());
    let body = encode_document(&record)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
          rusqlite::params![collection, id_str, body],
        )?;
        Ok(())
      })
      .await?;

    self.publish::<D>(record.id(), ChangeOp::Inserted);
    Ok(record)
  }

  async fn patch<D: Document>(&self, id: RecordId, patch: D::Patch) -> Result<D> {
    patch.validate()?;

    let now = now_ms();
    let collection = D::COLLECTION.to_string();
    let id_str = encode_uuid(id);

    // Read, apply and write back inside one transaction so concurrent
    // patches of the same record serialise.
    let updated: Option<D> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let body: Option<String> = tx
          .query_row(
            "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
            rusqlite::params![collection, id_str],
            |row| row.get(0),
          )
          .optional()?;
        let Some(body) = body else {
          return Ok(None);
        };

        let mut record: D = serde_json::from_str(&body).map_err(json_in_call)?;
        record.apply_patch(patch, now);
        let body = serde_json::to_string(&record).map_err(json_in_call)?;

        tx.execute(
          "UPDATE documents SET body = ?1 WHERE collection = ?2 AND id = ?3",
          rusqlite::params![body, collection, id_str],
        )?;
        tx.commit()?;
        Ok(Some(record))
      })
      .await?;

    let record = updated.ok_or_else(|| mc_core::Error::not_found(D::COLLECTION, id))?;
    self.publish::<D>(id, ChangeOp::Patched);
    Ok(record)
  }

  async fn delete<D: Document>(&self, id: RecordId) -> Result<()> {
    let collection = D::COLLECTION.to_string();
    let id_str = encode_uuid(id);

    let removed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
          rusqlite::params![collection, id_str],
        )?)
      })
      .await?;

    if removed == 0 {
      return Err(mc_core::Error::not_found(D::COLLECTION, id).into());
    }
    self.publish::<D>(id, ChangeOp::Deleted);
    Ok(())
  }
}
