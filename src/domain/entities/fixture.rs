use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub id: i64,
    pub kickoff: Option<DateTime<Utc>>,
    /// Short status code from the feed (NS, FT, PST, ...).
    pub status: String,
    pub league_id: i64,
    pub league: String,
    pub country: Option<String>,
    pub season: i32,
    pub home_id: i64,
    pub home: String,
    pub away_id: i64,
    pub away: String,
}

impl Fixture {
    /// Only fixtures that have not kicked off are worth a pick.
    pub fn is_open(&self) -> bool {
        matches!(self.status.as_str(), "NS" | "TBD")
    }
}

/// Season averages for one team, split by venue where the feed provides it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamStats {
    pub team_id: i64,
    pub goals_for_home: f64,
    pub goals_for_away: f64,
    pub goals_against_home: f64,
    pub goals_against_away: f64,
    pub cards_avg: Option<f64>,
    pub corners_avg: Option<f64>,
}
