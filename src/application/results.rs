use crate::domain::entities::day_document::DayDocument;
use crate::domain::entities::pick::Pick;
use crate::domain::error::DomainError;
use crate::domain::ports::document_store::DocumentStore;
use crate::domain::values::pick_status::PickStatus;
use crate::domain::values::tier::Tier;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// Widest range a single history request may cover, in days.
pub const MAX_RANGE_DAYS: i64 = 120;

pub struct ResultsUseCase {
    store: Arc<dyn DocumentStore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub win: usize,
    pub lose: usize,
    pub push: usize,
    pub pending: usize,
    /// Flat one-unit stakes.
    pub profit_units: f64,
}

impl Record {
    fn add(&mut self, pick: &Pick) {
        match pick.status {
            PickStatus::Win => {
                self.win += 1;
                let price = pick.odds.or(pick.closing).unwrap_or(2.0);
                self.profit_units += price - 1.0;
            }
            PickStatus::Lose => {
                self.lose += 1;
                self.profit_units -= 1.0;
            }
            PickStatus::Push => self.push += 1,
            PickStatus::Pending => self.pending += 1,
        }
    }

    fn absorb(&mut self, other: &Record) {
        self.win += other.win;
        self.lose += other.lose;
        self.push += other.push;
        self.pending += other.pending;
        self.profit_units += other.profit_units;
    }

    /// `win / (win + lose)`, undefined until something has been decided.
    pub fn hit_rate(&self) -> Option<f64> {
        let decided = self.win + self.lose;
        (decided > 0).then(|| self.win as f64 / decided as f64)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayResult {
    pub date: String,
    pub record: Record,
    pub picks: Vec<Pick>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsReport {
    pub tier: Tier,
    pub from: String,
    pub to: String,
    pub days: Vec<DayResult>,
    pub total: Record,
    pub hit_rate: Option<f64>,
}

impl ResultsUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Settlement record for every stored day in `[from, to]`. Days without a document are skipped.
    pub fn execute(&self, tier: Tier, from: NaiveDate, to: NaiveDate) -> Result<ResultsReport, DomainError> {
        if to < from {
            return Err(DomainError::InvalidInput(format!("range ends before it starts: {from}..{to}")));
        }
        let span = (to - from).num_days() + 1;
        if span > MAX_RANGE_DAYS {
            return Err(DomainError::InvalidInput(format!(
                "range of {span} days exceeds the {MAX_RANGE_DAYS}-day limit"
            )));
        }

        let mut days = Vec::new();
        let mut total = Record::default();
        for date in from.iter_days().take_while(|d| *d <= to) {
            let doc_id = DayDocument::doc_id(date);
            let Some(doc) = self.store.get(tier.collection(), &doc_id)? else {
                continue;
            };
            let day = DayDocument::from_document(date, &doc);
            let mut record = Record::default();
            for pick in &day.picks {
                record.add(pick);
            }
            total.absorb(&record);
            days.push(DayResult {
                date: doc_id,
                record,
                picks: day.picks,
            });
        }

        Ok(ResultsReport {
            tier,
            from: DayDocument::doc_id(from),
            to: DayDocument::doc_id(to),
            hit_rate: total.hit_rate(),
            days,
            total,
        })
    }
}
