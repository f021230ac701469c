use crate::application::write_picks::{MergeReport, WritePicksUseCase};
use crate::domain::entities::fixture::Fixture;
use crate::domain::entities::pick::IncomingPick;
use crate::domain::error::DomainError;
use crate::domain::ports::document_store::DocumentStore;
use crate::domain::ports::fixture_feed::FixtureFeed;
use crate::domain::values::market_model::{estimate_markets, MarketEstimate, ModelConfig};
use crate::domain::values::tier::Tier;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

pub const MODEL_SOURCE: &str = "model";

#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    pub min_confidence: u8,
    pub limit: usize,
    pub model: ModelConfig,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            min_confidence: 60,
            limit: 10,
            model: ModelConfig::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProposedPick {
    pub fixture_id: i64,
    pub home: String,
    pub away: String,
    pub estimate: MarketEstimate,
}

#[derive(Debug, Serialize)]
pub struct GenerateReport {
    pub feed: String,
    pub fixtures_seen: usize,
    pub fixtures_open: usize,
    pub proposed: Vec<ProposedPick>,
    pub errors: Vec<String>,
    pub merge: MergeReport,
}

pub struct GeneratePicksUseCase {
    writer: WritePicksUseCase,
}

impl GeneratePicksUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            writer: WritePicksUseCase::new(store),
        }
    }

    /// Scores every open fixture of the day and merges the strongest picks.
    /// A fixture whose stats cannot be fetched is reported and skipped.
    pub async fn execute(
        &self,
        feed: &dyn FixtureFeed,
        tier: Tier,
        date: NaiveDate,
        opts: &GenerateOptions,
    ) -> Result<GenerateReport, DomainError> {
        let fixtures = feed.fixtures(date).await?;
        let fixtures_seen = fixtures.len();
        let open: Vec<Fixture> = fixtures.into_iter().filter(Fixture::is_open).collect();

        let mut proposed = Vec::new();
        let mut errors = Vec::new();

        for fixture in &open {
            match Self::best_estimate(feed, fixture, &opts.model).await {
                Ok(Some(estimate)) if estimate.confidence.value() >= opts.min_confidence => {
                    proposed.push(ProposedPick {
                        fixture_id: fixture.id,
                        home: fixture.home.clone(),
                        away: fixture.away.clone(),
                        estimate,
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    let msg = format!("fixture {} ({} v {}): {e}", fixture.id, fixture.home, fixture.away);
                    tracing::warn!(feed = feed.name(), "skipping {msg}");
                    errors.push(msg);
                }
            }
        }

        proposed.sort_by(|a, b| {
            b.estimate
                .confidence
                .cmp(&a.estimate.confidence)
                .then(b.estimate.probability.total_cmp(&a.estimate.probability))
        });
        proposed.truncate(opts.limit);

        let incoming: Vec<IncomingPick> = proposed
            .iter()
            .filter_map(|p| {
                let fixture = open.iter().find(|f| f.id == p.fixture_id)?;
                Some(IncomingPick {
                    match_time: fixture.kickoff,
                    country: fixture.country.clone(),
                    league: Some(fixture.league.clone()),
                    home: Some(fixture.home.clone()),
                    away: Some(fixture.away.clone()),
                    market: Some(p.estimate.label.clone()),
                    selection: Some(p.estimate.selection.clone()),
                    odds: None,
                    confidence: Some(p.estimate.confidence),
                    status: None,
                    source: Some(MODEL_SOURCE.to_string()),
                })
            })
            .collect();

        // Nothing cleared the threshold: leave the day unwritten rather than create an empty one.
        let merge = if incoming.is_empty() {
            MergeReport {
                tier,
                date: date.format("%Y-%m-%d").to_string(),
                ..Default::default()
            }
        } else {
            self.writer.execute(tier, date, incoming)?
        };

        Ok(GenerateReport {
            feed: feed.name().to_string(),
            fixtures_seen,
            fixtures_open: open.len(),
            proposed,
            errors,
            merge,
        })
    }

    async fn best_estimate(
        feed: &dyn FixtureFeed,
        fixture: &Fixture,
        model: &ModelConfig,
    ) -> Result<Option<MarketEstimate>, DomainError> {
        let home = feed
            .team_stats(fixture.league_id, fixture.season, fixture.home_id)
            .await?;
        let away = feed
            .team_stats(fixture.league_id, fixture.season, fixture.away_id)
            .await?;

        Ok(estimate_markets(&home, &away, model)
            .into_iter()
            .max_by(|a, b| {
                a.confidence
                    .cmp(&b.confidence)
                    .then(a.probability.total_cmp(&b.probability))
            }))
    }
}
