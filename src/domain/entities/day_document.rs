use crate::domain::entities::pick::Pick;
use crate::domain::error::DomainError;
use crate::domain::ports::document_store::Document;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Every pick for one tier on one calendar day.
#[derive(Debug, Clone)]
pub struct DayDocument {
    pub date: NaiveDate,
    pub picks: Vec<Pick>,
    /// Stored entries that do not decode as picks. Written back untouched.
    pub unreadable: Vec<Value>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DayDocument {
    pub fn doc_id(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            picks: Vec::new(),
            unreadable: Vec::new(),
            updated_at: None,
        }
    }

    /// Decodes a stored document. Entries that no longer parse as picks are
    /// kept aside in `unreadable` so a write-back does not lose them.
    pub fn from_document(date: NaiveDate, doc: &Document) -> Self {
        let mut picks = Vec::new();
        let mut unreadable = Vec::new();
        if let Some(Value::Array(items)) = doc.get("picks") {
            for item in items {
                match serde_json::from_value::<Pick>(item.clone()) {
                    Ok(p) => picks.push(p),
                    Err(e) => {
                        tracing::warn!(%date, error = %e, "stored pick is unreadable, keeping it as is");
                        unreadable.push(item.clone());
                    }
                }
            }
        }
        let updated_at = doc
            .get("updatedAt")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Self {
            date,
            picks,
            unreadable,
            updated_at,
        }
    }

    /// The fields this crate owns. Written with merge so other fields survive.
    pub fn to_document(&self, now: DateTime<Utc>) -> Result<Document, DomainError> {
        let mut doc = Document::new();
        doc.insert("date".into(), Value::String(Self::doc_id(self.date)));
        let mut entries = Vec::with_capacity(self.picks.len() + self.unreadable.len());
        for pick in &self.picks {
            entries.push(serde_json::to_value(pick)?);
        }
        entries.extend(self.unreadable.iter().cloned());
        doc.insert("picks".into(), Value::Array(entries));
        doc.insert("updatedAt".into(), Value::String(now.to_rfc3339()));
        Ok(doc)
    }
}
