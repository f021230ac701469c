use crate::domain::entities::day_document::DayDocument;
use crate::domain::entities::pick::{IncomingPick, Pick};
use crate::domain::error::DomainError;
use crate::domain::ports::document_store::{DocumentStore, WriteMode};
use crate::domain::values::identity_key::IdentityKey;
use crate::domain::values::tier::Tier;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

pub struct WritePicksUseCase {
    store: Arc<dyn DocumentStore>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeReport {
    pub tier: Tier,
    pub date: String,
    pub received: usize,
    pub dropped: usize,
    pub inserted: usize,
    pub replaced: usize,
    pub kept_settled: usize,
    pub total: usize,
}

impl WritePicksUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Merges `incoming` into the day's stored picks, one read and one write.
    ///
    /// Picks are matched by identity key. A stored pick that already has an
    /// outcome keeps it; only its descriptive fields are refreshed.
    pub fn execute(
        &self,
        tier: Tier,
        date: NaiveDate,
        incoming: Vec<IncomingPick>,
    ) -> Result<MergeReport, DomainError> {
        let collection = tier.collection();
        let doc_id = DayDocument::doc_id(date);
        let now = Utc::now();

        let mut day = match self.store.get(collection, &doc_id)? {
            Some(doc) => DayDocument::from_document(date, &doc),
            None => DayDocument::empty(date),
        };

        let mut report = MergeReport {
            tier,
            date: doc_id.clone(),
            received: incoming.len(),
            ..Default::default()
        };

        // Stored order is kept; duplicate stored keys collapse onto the last entry.
        let mut slots: Vec<Pick> = Vec::with_capacity(day.picks.len() + incoming.len());
        let mut index: HashMap<IdentityKey, usize> = HashMap::new();
        for pick in day.picks.drain(..) {
            let key = pick.identity_key();
            match index.get(&key) {
                Some(&i) => slots[i] = pick,
                None => {
                    index.insert(key, slots.len());
                    slots.push(pick);
                }
            }
        }

        for raw in incoming {
            let supplied_source = raw.supplied_source();
            let Some(pick) = raw.into_pick(date, now) else {
                tracing::debug!(%tier, date = %doc_id, "dropping pick without home/away");
                report.dropped += 1;
                continue;
            };
            let key = pick.identity_key();

            match index.get(&key) {
                Some(&i) if slots[i].status.is_settled() => {
                    slots[i].refresh_descriptive(pick, supplied_source);
                    report.kept_settled += 1;
                }
                Some(&i) => {
                    slots[i] = pick;
                    report.replaced += 1;
                }
                None => {
                    index.insert(key, slots.len());
                    slots.push(pick);
                    report.inserted += 1;
                }
            }
        }

        day.picks = slots;
        report.total = day.picks.len();
        self.store
            .set(collection, &doc_id, day.to_document(now)?, WriteMode::Merge)?;

        tracing::info!(
            %tier,
            date = %doc_id,
            inserted = report.inserted,
            replaced = report.replaced,
            kept_settled = report.kept_settled,
            dropped = report.dropped,
            "merged daily picks"
        );
        Ok(report)
    }
}
