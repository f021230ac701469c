use crate::domain::error::DomainError;
use serde_json::{Map, Value};

/// A stored record: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Upsert: fields in the new document overwrite, every other field survives.
    Merge,
    /// Replace the whole document.
    Replace,
}

/// Key-value document store, one namespace per collection.
///
/// There is no compare-and-swap: a read followed by a write is not atomic and
/// the later write wins.
pub trait DocumentStore: Send + Sync {
    fn get(&self, collection: &str, doc_id: &str) -> Result<Option<Document>, DomainError>;
    fn set(
        &self,
        collection: &str,
        doc_id: &str,
        doc: Document,
        mode: WriteMode,
    ) -> Result<(), DomainError>;
}

/// Merge-upsert semantics shared by the adapters: nested objects merge
/// recursively, arrays and scalars are replaced.
pub fn merge_into(target: &mut Document, patch: Document) {
    for (key, value) in patch {
        let Value::Object(incoming) = value else {
            target.insert(key, value);
            continue;
        };
        if let Some(Value::Object(existing)) = target.get_mut(&key) {
            merge_into(existing, incoming);
            continue;
        }
        target.insert(key, Value::Object(incoming));
    }
}

/// Applies a write to whatever is currently stored under the key.
pub fn apply_write(current: Option<Document>, doc: Document, mode: WriteMode) -> Document {
    match (mode, current) {
        (WriteMode::Merge, Some(mut existing)) => {
            merge_into(&mut existing, doc);
            existing
        }
        _ => doc,
    }
}
