//! Shared test helpers.
#![allow(dead_code)]

use chrono::NaiveDate;
use pickboard::domain::entities::pick::{IncomingPick, PickIdentity};
use pickboard::domain::error::DomainError;
use pickboard::domain::ports::document_store::{Document, DocumentStore, WriteMode};
use pickboard::infrastructure::store::memory::MemoryStore;
use pickboard::PickBoard;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn setup() -> PickBoard {
    PickBoard::with_store(PickBoard::open_sqlite(":memory:").unwrap())
}

pub fn setup_counting() -> (PickBoard, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::default());
    (PickBoard::with_store(store.clone()), store)
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn incoming(home: &str, away: &str, market: &str, selection: &str, odds: Option<f64>) -> IncomingPick {
    IncomingPick {
        home: Some(home.to_string()),
        away: Some(away.to_string()),
        market: Some(market.to_string()),
        selection: Some(selection.to_string()),
        odds,
        ..Default::default()
    }
}

pub fn identity(date: &str, home: &str, away: &str, market: &str, selection: &str) -> PickIdentity {
    PickIdentity {
        date: Some(date.to_string()),
        home: Some(home.to_string()),
        away: Some(away.to_string()),
        market: Some(market.to_string()),
        selection: Some(selection.to_string()),
        pick: None,
    }
}

/// Memory store that counts reads and writes.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl CountingStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl DocumentStore for CountingStore {
    fn get(&self, collection: &str, doc_id: &str) -> Result<Option<Document>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(collection, doc_id)
    }

    fn set(&self, collection: &str, doc_id: &str, doc: Document, mode: WriteMode) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(collection, doc_id, doc, mode)
    }
}

/// Store whose backend is unavailable.
pub struct FailingStore;

impl DocumentStore for FailingStore {
    fn get(&self, _collection: &str, _doc_id: &str) -> Result<Option<Document>, DomainError> {
        Err(DomainError::Database("backend unavailable".into()))
    }

    fn set(&self, _collection: &str, _doc_id: &str, _doc: Document, _mode: WriteMode) -> Result<(), DomainError> {
        Err(DomainError::Database("backend unavailable".into()))
    }
}
