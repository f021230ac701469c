use crate::domain::error::DomainError;
use crate::domain::ports::document_store::{apply_write, Document, DocumentStore, WriteMode};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process document store. Same merge semantics as the SQLite store.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<(String, String), Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, DomainError> {
        self.docs
            .lock()
            .map(|d| d.len())
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, collection: &str, doc_id: &str) -> Result<Option<Document>, DomainError> {
        let docs = self
            .docs
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(docs.get(&(collection.to_string(), doc_id.to_string())).cloned())
    }

    fn set(
        &self,
        collection: &str,
        doc_id: &str,
        doc: Document,
        mode: WriteMode,
    ) -> Result<(), DomainError> {
        let mut docs = self
            .docs
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let key = (collection.to_string(), doc_id.to_string());
        let current = docs.remove(&key);
        docs.insert(key, apply_write(current, doc, mode));
        Ok(())
    }
}
