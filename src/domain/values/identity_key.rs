//! Stable identity for a pick within a Day Document.
//!
//! Two picks are the same logical pick when their date matches and their
//! normalized team names, market and selection match. Every other field
//! (odds, kickoff, league, status) is payload.

use chrono::NaiveDate;
use std::fmt;

/// Lower-cases, trims and collapses internal whitespace.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    date: NaiveDate,
    home: String,
    away: String,
    market: String,
    selection: String,
}

impl IdentityKey {
    pub fn of(date: NaiveDate, home: &str, away: &str, market: &str, selection: &str) -> Self {
        Self {
            date,
            home: normalize(home),
            away: normalize(away),
            market: normalize(market),
            selection: normalize(selection),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.date.format("%Y-%m-%d"),
            self.home,
            self.away,
            self.market,
            self.selection
        )
    }
}
