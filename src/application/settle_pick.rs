use crate::domain::entities::day_document::DayDocument;
use crate::domain::entities::pick::{Pick, PickIdentity, SettlementPatch};
use crate::domain::error::DomainError;
use crate::domain::ports::document_store::{DocumentStore, WriteMode};
use crate::domain::values::tier::Tier;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

pub struct SettlePickUseCase {
    store: Arc<dyn DocumentStore>,
}

/// What a settlement call did. Neither no-op is an error: callers may settle speculatively.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SettleOutcome {
    NoDocument,
    NoMatch,
    Settled { pick: Box<Pick> },
}

impl SettleOutcome {
    pub fn is_settled(&self) -> bool {
        matches!(self, SettleOutcome::Settled { .. })
    }
}

impl SettlePickUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn execute(
        &self,
        tier: Tier,
        identity: &PickIdentity,
        patch: &SettlementPatch,
    ) -> Result<SettleOutcome, DomainError> {
        let key = identity.resolve()?;
        let date = key.date();
        let collection = tier.collection();
        let doc_id = DayDocument::doc_id(date);

        let Some(doc) = self.store.get(collection, &doc_id)? else {
            tracing::debug!(%tier, date = %doc_id, "no day document, nothing to settle");
            return Ok(SettleOutcome::NoDocument);
        };
        let mut day = DayDocument::from_document(date, &doc);

        let now = Utc::now();
        let mut settled = None;
        for pick in day.picks.iter_mut() {
            if settled.is_none() && pick.identity_key() == key {
                pick.apply(patch, now);
                settled = Some(pick.clone());
            }
        }

        let Some(pick) = settled else {
            tracing::debug!(%tier, key = %key, "no stored pick matches, nothing to settle");
            return Ok(SettleOutcome::NoMatch);
        };

        self.store
            .set(collection, &doc_id, day.to_document(now)?, WriteMode::Merge)?;
        tracing::info!(%tier, key = %key, status = %pick.status, "settled pick");
        Ok(SettleOutcome::Settled { pick: Box::new(pick) })
    }
}
