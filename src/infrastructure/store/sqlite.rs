use crate::domain::error::DomainError;
use crate::domain::ports::document_store::{apply_write, Document, DocumentStore, WriteMode};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

/// Document store over a single SQLite table, one JSON body per row.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn read(conn: &Connection, collection: &str, doc_id: &str) -> Result<Option<Document>, DomainError> {
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND doc_id = ?2",
                params![collection, doc_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        match body {
            None => Ok(None),
            Some(body) => match serde_json::from_str::<serde_json::Value>(&body)? {
                serde_json::Value::Object(doc) => Ok(Some(doc)),
                other => Err(DomainError::Parse(format!(
                    "Document {collection}/{doc_id} is not an object: {other}"
                ))),
            },
        }
    }
}

impl DocumentStore for SqliteStore {
    fn get(&self, collection: &str, doc_id: &str) -> Result<Option<Document>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Self::read(&conn, collection, doc_id)
    }

    fn set(
        &self,
        collection: &str,
        doc_id: &str,
        doc: Document,
        mode: WriteMode,
    ) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let current = match mode {
            WriteMode::Merge => Self::read(&conn, collection, doc_id)?,
            WriteMode::Replace => None,
        };
        let body = serde_json::to_string(&apply_write(current, doc, mode))?;

        conn.execute(
            "INSERT INTO documents (collection, doc_id, body, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(collection, doc_id) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
            params![collection, doc_id, body, chrono::Utc::now().to_rfc3339()],
        )
        .map_err(|e| DomainError::Database(format!("Failed to write {collection}/{doc_id}: {e}")))?;
        Ok(())
    }
}
