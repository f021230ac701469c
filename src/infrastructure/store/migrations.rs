use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            doc_id TEXT NOT NULL,
            body TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (collection, doc_id)
        );

        CREATE INDEX IF NOT EXISTS idx_documents_updated ON documents(updated_at);
        "
    ).map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
