use crate::domain::entities::fixture::{Fixture, TeamStats};
use crate::domain::error::DomainError;
use chrono::NaiveDate;

/// Source of fixtures and team statistics for the pick generator.
#[async_trait::async_trait]
pub trait FixtureFeed: Send + Sync {
    fn name(&self) -> &str;

    async fn fixtures(&self, date: NaiveDate) -> Result<Vec<Fixture>, DomainError>;

    async fn team_stats(&self, league_id: i64, season: i32, team_id: i64) -> Result<TeamStats, DomainError>;
}
