pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::generate_picks::{GenerateOptions, GeneratePicksUseCase, GenerateReport};
use crate::application::results::{ResultsReport, ResultsUseCase};
use crate::application::settle_pick::{SettleOutcome, SettlePickUseCase};
use crate::application::write_picks::{MergeReport, WritePicksUseCase};
use crate::config::Config;
use crate::domain::entities::day_document::DayDocument;
use crate::domain::entities::pick::{IncomingPick, PickIdentity, SettlementPatch};
use crate::domain::error::DomainError;
use crate::domain::ports::document_store::DocumentStore;
use crate::domain::ports::fixture_feed::FixtureFeed;
use crate::domain::values::tier::Tier;
use crate::infrastructure::feeds::api_football::ApiFootballFeed;
use crate::infrastructure::store::migrations::run_migrations;
use crate::infrastructure::store::sqlite::SqliteStore;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::Arc;

pub struct PickBoard {
    store: Arc<dyn DocumentStore>,
    feed: Option<Arc<dyn FixtureFeed>>,
    generate_opts: GenerateOptions,
    write_uc: WritePicksUseCase,
    settle_uc: SettlePickUseCase,
    results_uc: ResultsUseCase,
    generate_uc: GeneratePicksUseCase,
}

impl PickBoard {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let store = Self::open_sqlite(&config.db_path)?;
        let feed: Option<Arc<dyn FixtureFeed>> = config.api_football_key.as_ref().map(|key| {
            Arc::new(ApiFootballFeed::new(key.clone(), config.api_football_url.clone()))
                as Arc<dyn FixtureFeed>
        });

        let mut board = Self::with_store(store);
        board.feed = feed;
        board.generate_opts = config.generate.clone();
        Ok(board)
    }

    pub fn open_sqlite(db_path: &str) -> Result<Arc<dyn DocumentStore>, DomainError> {
        let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;
        Ok(Arc::new(SqliteStore::new(conn)))
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            write_uc: WritePicksUseCase::new(store.clone()),
            settle_uc: SettlePickUseCase::new(store.clone()),
            results_uc: ResultsUseCase::new(store.clone()),
            generate_uc: GeneratePicksUseCase::new(store.clone()),
            store,
            feed: None,
            generate_opts: GenerateOptions::default(),
        }
    }

    pub fn with_feed(mut self, feed: Arc<dyn FixtureFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn with_generate_options(mut self, opts: GenerateOptions) -> Self {
        self.generate_opts = opts;
        self
    }

    // Delegating methods
    pub fn write_daily_picks(
        &self,
        tier: Tier,
        date: NaiveDate,
        picks: Vec<IncomingPick>,
    ) -> Result<MergeReport, DomainError> {
        self.write_uc.execute(tier, date, picks)
    }

    pub fn settle_pick(
        &self,
        tier: Tier,
        identity: &PickIdentity,
        patch: &SettlementPatch,
    ) -> Result<SettleOutcome, DomainError> {
        self.settle_uc.execute(tier, identity, patch)
    }

    /// The stored day, if one has been written.
    pub fn day(&self, tier: Tier, date: NaiveDate) -> Result<Option<DayDocument>, DomainError> {
        let doc = self.store.get(tier.collection(), &DayDocument::doc_id(date))?;
        Ok(doc.map(|d| DayDocument::from_document(date, &d)))
    }

    pub fn results(&self, tier: Tier, from: NaiveDate, to: NaiveDate) -> Result<ResultsReport, DomainError> {
        self.results_uc.execute(tier, from, to)
    }

    pub async fn generate_picks(&self, tier: Tier, date: NaiveDate) -> Result<GenerateReport, DomainError> {
        let feed = self.feed.as_ref().ok_or_else(|| {
            DomainError::InvalidInput("no fixture feed configured (set PICKBOARD_API_FOOTBALL_KEY)".into())
        })?;
        self.generate_uc
            .execute(feed.as_ref(), tier, date, &self.generate_opts)
            .await
    }
}
