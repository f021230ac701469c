use super::FeedError;
use crate::domain::entities::fixture::{Fixture, TeamStats};
use crate::domain::error::DomainError;
use crate::domain::ports::fixture_feed::FixtureFeed;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";

/// API-Football v3 client. Authenticates with the `x-apisports-key` header.
pub struct ApiFootballFeed {
    api_key: String,
    base_url: String,
    max_attempts: u32,
    backoff: Duration,
    client: reqwest::Client,
}

impl ApiFootballFeed {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            max_attempts: 3,
            backoff: Duration::from_millis(750),
            client: reqwest::Client::builder()
                .user_agent("pickboard/0.1")
                .timeout(Duration::from_secs(20))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff = backoff;
        self
    }

    /// GET with a bounded retry loop on network errors, 429 and 5xx.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, FeedError> {
        if self.api_key.is_empty() {
            return Err(FeedError::Config("PICKBOARD_API_FOOTBALL_KEY is not set".into()));
        }

        let url = format!("{}{}", self.base_url, path);
        let mut last_err = FeedError::Network(format!("no attempt made for {path}"));

        for attempt in 1..=self.max_attempts {
            let sent = self
                .client
                .get(&url)
                .header("x-apisports-key", &self.api_key)
                .query(query)
                .send()
                .await;

            match sent {
                Ok(resp) if resp.status().is_success() => {
                    return resp.text().await.map_err(|e| FeedError::Network(e.to_string()));
                }
                Ok(resp) => {
                    let status = resp.status();
                    last_err = FeedError::Network(format!("API-Football returned {status} for {path}"));
                    if !(status.as_u16() == 429 || status.is_server_error()) {
                        return Err(last_err);
                    }
                }
                Err(e) => last_err = FeedError::Network(e.to_string()),
            }

            if attempt < self.max_attempts {
                tracing::warn!(path, attempt, error = %last_err, "API-Football request failed, retrying");
                tokio::time::sleep(self.backoff * attempt).await;
            }
        }

        Err(last_err)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    errors: serde_json::Value,
    response: T,
}

#[derive(Debug, Deserialize)]
struct FixtureItem {
    fixture: FixtureInfo,
    league: LeagueInfo,
    teams: Teams,
}

#[derive(Debug, Deserialize)]
struct FixtureInfo {
    id: i64,
    #[serde(default)]
    date: Option<String>,
    status: FixtureStatus,
}

#[derive(Debug, Deserialize)]
struct FixtureStatus {
    short: String,
}

#[derive(Debug, Deserialize)]
struct LeagueInfo {
    id: i64,
    name: String,
    #[serde(default)]
    country: Option<String>,
    season: i32,
}

#[derive(Debug, Deserialize)]
struct Teams {
    home: TeamRef,
    away: TeamRef,
}

#[derive(Debug, Deserialize)]
struct TeamRef {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct StatsBody {
    goals: GoalsBlock,
    #[serde(default)]
    cards: HashMap<String, HashMap<String, CardBucket>>,
    #[serde(default)]
    fixtures: Option<FixturesBlock>,
}

#[derive(Debug, Deserialize)]
struct GoalsBlock {
    #[serde(rename = "for")]
    scored: GoalsSide,
    against: GoalsSide,
}

#[derive(Debug, Deserialize)]
struct GoalsSide {
    average: Averages,
}

/// Averages arrive as strings ("1.5") or occasionally numbers.
#[derive(Debug, Deserialize)]
struct Averages {
    #[serde(default)]
    home: serde_json::Value,
    #[serde(default)]
    away: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct CardBucket {
    #[serde(default)]
    total: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FixturesBlock {
    played: Played,
}

#[derive(Debug, Deserialize)]
struct Played {
    #[serde(default)]
    total: Option<f64>,
}

fn check_errors(errors: &serde_json::Value) -> Result<(), FeedError> {
    let has_errors = match errors {
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(o) => !o.is_empty(),
        serde_json::Value::Null => false,
        _ => true,
    };
    if has_errors {
        return Err(FeedError::Config(format!("API-Football error: {errors}")));
    }
    Ok(())
}

fn number(v: &serde_json::Value) -> f64 {
    match v {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn parse_fixtures(body: &str) -> Result<Vec<Fixture>, FeedError> {
    let env: Envelope<Vec<FixtureItem>> =
        serde_json::from_str(body).map_err(|e| FeedError::Parse(e.to_string()))?;
    check_errors(&env.errors)?;

    Ok(env
        .response
        .into_iter()
        .map(|item| Fixture {
            id: item.fixture.id,
            kickoff: item
                .fixture
                .date
                .as_deref()
                .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            status: item.fixture.status.short,
            league_id: item.league.id,
            league: item.league.name,
            country: item.league.country,
            season: item.league.season,
            home_id: item.teams.home.id,
            home: item.teams.home.name,
            away_id: item.teams.away.id,
            away: item.teams.away.name,
        })
        .collect())
}

pub fn parse_team_stats(team_id: i64, body: &str) -> Result<TeamStats, FeedError> {
    let env: Envelope<StatsBody> =
        serde_json::from_str(body).map_err(|e| FeedError::Parse(e.to_string()))?;
    check_errors(&env.errors)?;
    let stats = env.response;

    let played = stats
        .fixtures
        .and_then(|f| f.played.total)
        .filter(|p| *p > 0.0);
    let card_total: f64 = stats
        .cards
        .values()
        .flat_map(|buckets| buckets.values())
        .filter_map(|b| b.total)
        .sum();
    let cards_avg = match played {
        Some(p) if !stats.cards.is_empty() => Some(card_total / p),
        _ => None,
    };

    Ok(TeamStats {
        team_id,
        goals_for_home: number(&stats.goals.scored.average.home),
        goals_for_away: number(&stats.goals.scored.average.away),
        goals_against_home: number(&stats.goals.against.average.home),
        goals_against_away: number(&stats.goals.against.average.away),
        cards_avg,
        // The statistics endpoint does not report corners.
        corners_avg: None,
    })
}

#[async_trait]
impl FixtureFeed for ApiFootballFeed {
    fn name(&self) -> &str {
        "api_football"
    }

    async fn fixtures(&self, date: NaiveDate) -> Result<Vec<Fixture>, DomainError> {
        let body = self
            .get("/fixtures", &[("date", date.format("%Y-%m-%d").to_string())])
            .await?;
        Ok(parse_fixtures(&body)?)
    }

    async fn team_stats(&self, league_id: i64, season: i32, team_id: i64) -> Result<TeamStats, DomainError> {
        let body = self
            .get(
                "/teams/statistics",
                &[
                    ("league", league_id.to_string()),
                    ("season", season.to_string()),
                    ("team", team_id.to_string()),
                ],
            )
            .await?;
        Ok(parse_team_stats(team_id, &body)?)
    }
}
