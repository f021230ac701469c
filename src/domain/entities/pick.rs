use crate::domain::error::DomainError;
use crate::domain::values::confidence::Confidence;
use crate::domain::values::identity_key::IdentityKey;
use crate::domain::values::pick_status::PickStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Provenance tag for picks that arrive without one.
pub const DEFAULT_SOURCE: &str = "manual";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    pub date: NaiveDate,
    #[serde(default)]
    pub match_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    pub home: String,
    pub away: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub selection: String,
    #[serde(default)]
    pub odds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub status: PickStatus,
    #[serde(default = "default_source")]
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

impl Pick {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::of(self.date, &self.home, &self.away, &self.market, &self.selection)
    }

    /// Folds a fresh incoming record into a pick that already carries an outcome.
    /// Descriptive fields follow the incoming record; the outcome does not move.
    /// `source` changes only when the caller actually supplied one.
    pub fn refresh_descriptive(&mut self, incoming: Pick, source: Option<String>) {
        self.match_time = incoming.match_time.or(self.match_time);
        self.country = incoming.country.or(self.country.take());
        self.league = incoming.league.or(self.league.take());
        self.odds = incoming.odds.or(self.odds);
        self.confidence = incoming.confidence.or(self.confidence);
        if let Some(source) = source {
            self.source = source;
        }
        self.updated_at = incoming.updated_at;
    }

    /// Applies a settlement patch. Only the allowlisted patch fields are touched.
    pub fn apply(&mut self, patch: &SettlementPatch, now: DateTime<Utc>) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(odds) = patch.odds {
            self.odds = Some(odds);
        }
        if let Some(closing) = patch.closing {
            self.closing = Some(closing);
        }
        if let Some(score) = &patch.score {
            self.score = Some(score.clone());
        }
        self.updated_at = now;
    }
}

/// Partial pick as delivered by a feed, the generator or an admin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingPick {
    #[serde(default)]
    pub match_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub away: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub selection: Option<String>,
    #[serde(default)]
    pub odds: Option<f64>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub status: Option<PickStatus>,
    #[serde(default)]
    pub source: Option<String>,
}

impl IncomingPick {
    /// The provenance tag as sent, before any default is applied.
    pub fn supplied_source(&self) -> Option<String> {
        non_blank(self.source.clone())
    }

    /// Builds a full pick for `date`, or `None` when the teams are missing.
    pub fn into_pick(self, date: NaiveDate, now: DateTime<Utc>) -> Option<Pick> {
        let home = non_blank(self.home)?;
        let away = non_blank(self.away)?;
        Some(Pick {
            date,
            match_time: self.match_time,
            country: non_blank(self.country),
            league: non_blank(self.league),
            home,
            away,
            market: self.market.unwrap_or_default().trim().to_string(),
            selection: self.selection.unwrap_or_default().trim().to_string(),
            odds: self.odds.filter(|o| o.is_finite() && *o > 0.0),
            closing: None,
            score: None,
            confidence: self.confidence,
            status: self.status.unwrap_or_default(),
            source: non_blank(self.source).unwrap_or_else(default_source),
            created_at: now,
            updated_at: now,
        })
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Identifies one stored pick for settlement. `pick` is the legacy name for `selection`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickIdentity {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub away: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub selection: Option<String>,
    #[serde(default)]
    pub pick: Option<String>,
}

impl PickIdentity {
    /// Validates the identity and reduces the date to its calendar day.
    pub fn resolve(&self) -> Result<IdentityKey, DomainError> {
        let raw_date = non_blank(self.date.clone())
            .ok_or_else(|| DomainError::InvalidIdentity("date is required".into()))?;
        let home = non_blank(self.home.clone())
            .ok_or_else(|| DomainError::InvalidIdentity("home is required".into()))?;
        let away = non_blank(self.away.clone())
            .ok_or_else(|| DomainError::InvalidIdentity("away is required".into()))?;

        let date = parse_day(&raw_date).map_err(|e| DomainError::InvalidIdentity(e.to_string()))?;
        let market = self.market.as_deref().unwrap_or_default();
        let selection = self
            .selection
            .as_deref()
            .or(self.pick.as_deref())
            .unwrap_or_default();

        Ok(IdentityKey::of(date, &home, &away, market, selection))
    }
}

/// Truncates to the leading `YYYY-MM-DD` and parses it.
pub fn parse_day(raw: &str) -> Result<NaiveDate, DomainError> {
    let day: String = raw.trim().chars().take(10).collect();
    NaiveDate::parse_from_str(&day, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidInput(format!("invalid date: {raw} (expected YYYY-MM-DD)")))
}

/// Fields a settlement may change. Anything else in a patch is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementPatch {
    #[serde(default)]
    pub status: Option<PickStatus>,
    #[serde(default)]
    pub odds: Option<f64>,
    #[serde(default)]
    pub closing: Option<f64>,
    #[serde(default)]
    pub score: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn incoming(home: Option<&str>, away: Option<&str>) -> IncomingPick {
        IncomingPick {
            home: home.map(String::from),
            away: away.map(String::from),
            market: Some("OU2.5".into()),
            selection: Some("Over 2.5".into()),
            odds: Some(1.8),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_pick_defaults() {
        let now = Utc::now();
        let pick = incoming(Some(" A "), Some("B")).into_pick(day(), now).unwrap();
        assert_eq!(pick.home, "A");
        assert_eq!(pick.status, PickStatus::Pending);
        assert_eq!(pick.source, DEFAULT_SOURCE);
        assert_eq!(pick.created_at, now);
        assert_eq!(pick.updated_at, now);
    }

    #[test]
    fn test_into_pick_requires_teams() {
        let now = Utc::now();
        assert!(incoming(None, Some("B")).into_pick(day(), now).is_none());
        assert!(incoming(Some("A"), None).into_pick(day(), now).is_none());
        assert!(incoming(Some("  "), Some("B")).into_pick(day(), now).is_none());
    }

    #[test]
    fn test_into_pick_drops_non_positive_odds() {
        let mut p = incoming(Some("A"), Some("B"));
        p.odds = Some(0.0);
        assert_eq!(p.into_pick(day(), Utc::now()).unwrap().odds, None);
    }

    #[test]
    fn test_refresh_keeps_source_unless_supplied() {
        let now = Utc::now();
        let mut stored = incoming(Some("A"), Some("B")).into_pick(day(), now).unwrap();
        stored.source = "model".into();
        stored.status = PickStatus::Win;

        let bare = incoming(Some("A"), Some("B"));
        let supplied = bare.supplied_source();
        assert_eq!(supplied, None);
        stored.refresh_descriptive(bare.into_pick(day(), now).unwrap(), supplied);
        assert_eq!(stored.source, "model");
        assert_eq!(stored.status, PickStatus::Win);

        let mut tagged = incoming(Some("A"), Some("B"));
        tagged.source = Some(" feed ".into());
        let supplied = tagged.supplied_source();
        stored.refresh_descriptive(tagged.into_pick(day(), now).unwrap(), supplied);
        assert_eq!(stored.source, "feed");
    }

    #[test]
    fn test_identity_requires_date_home_away() {
        let id = PickIdentity {
            date: Some("2025-01-01".into()),
            home: Some("A".into()),
            ..Default::default()
        };
        assert!(matches!(id.resolve(), Err(DomainError::InvalidIdentity(_))));

        let id = PickIdentity {
            home: Some("A".into()),
            away: Some("B".into()),
            ..Default::default()
        };
        assert!(matches!(id.resolve(), Err(DomainError::InvalidIdentity(_))));
    }

    #[test]
    fn test_identity_truncates_timestamp_and_uses_legacy_pick() {
        let id = PickIdentity {
            date: Some("2025-01-01T19:45:00Z".into()),
            home: Some("a".into()),
            away: Some("b".into()),
            market: Some("ou2.5".into()),
            selection: None,
            pick: Some("OVER 2.5".into()),
        };
        let stored = incoming(Some("A"), Some("B")).into_pick(day(), Utc::now()).unwrap();
        assert_eq!(id.resolve().unwrap(), stored.identity_key());
    }

    #[test]
    fn test_identity_rejects_bad_date() {
        let id = PickIdentity {
            date: Some("01/01/2025".into()),
            home: Some("A".into()),
            away: Some("B".into()),
            ..Default::default()
        };
        assert!(matches!(id.resolve(), Err(DomainError::InvalidIdentity(_))));
    }

    #[test]
    fn test_patch_is_allowlisted() {
        let patch: SettlementPatch =
            serde_json::from_str(r#"{"status":"win","closing":1.85,"home":"Hacked"}"#).unwrap();
        let mut pick = incoming(Some("A"), Some("B")).into_pick(day(), Utc::now()).unwrap();
        pick.apply(&patch, Utc::now());
        assert_eq!(pick.status, PickStatus::Win);
        assert_eq!(pick.closing, Some(1.85));
        assert_eq!(pick.home, "A");
        assert_eq!(pick.odds, Some(1.8));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let pick = incoming(Some("A"), Some("B")).into_pick(day(), Utc::now()).unwrap();
        let v = serde_json::to_value(&pick).unwrap();
        assert_eq!(v["date"], "2025-01-01");
        assert_eq!(v["status"], "pending");
        assert!(v.get("createdAt").is_some());
        assert!(v.get("matchTime").is_some());
        assert!(v.get("closing").is_none());
    }
}
