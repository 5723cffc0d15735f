//! Encoding helpers between domain types and the values bound into SQLite
//! statements.
//!
//! UUIDs are stored as hyphenated lowercase strings. Record bodies are
//! compact JSON in the record's own wire format.

use mc_core::record::{Document, IndexValue};
use rusqlite::types::Value;
use uuid::Uuid;

use crate::Result;

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_document<D: Document>(record: &D) -> Result<String> {
  Ok(serde_json::to_string(record)?)
}

pub fn decode_document<D: Document>(body: &str) -> Result<D> {
  Ok(serde_json::from_str(body)?)
}

pub fn decode_documents<D: Document>(bodies: &[String]) -> Result<Vec<D>> {
  bodies.iter().map(|b| decode_document(b)).collect()
}

pub fn encode_index_value(value: IndexValue) -> Value {
  match value {
    IndexValue::Text(s) => Value::Text(s),
    IndexValue::Integer(i) => Value::Integer(i),
  }
}

/// The expression an index covers, as it must appear in a `WHERE` clause.
/// `field` is always a static identifier from an `IndexKey` impl.
pub fn index_expr(field: &str) -> String { format!("json_extract(body, '$.{field}')") }

/// Convert a JSON error raised inside a `Connection::call` closure.
pub fn json_in_call(e: serde_json::Error) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn index_expression_matches_schema_text() {
    assert_eq!(index_expr("status"), "json_extract(body, '$.status')");
    assert!(crate::schema::SCHEMA.contains(&index_expr("rating")));
  }

  #[test]
  fn uuids_are_hyphenated_lowercase() {
    let id = Uuid::parse_str("A1B2C3D4-0000-0000-0000-00000000000F").unwrap();
    assert_eq!(encode_uuid(id), "a1b2c3d4-0000-0000-0000-00000000000f");
  }
}
