use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pickboard", about = "Daily football picks, settlement and results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge picks into a day's document
    Write {
        /// Day (YYYY-MM-DD)
        date: String,
        /// JSON array of picks: home, away, market, selection, odds, league, country, matchTime, status, source
        json: String,
        /// Product tier (free, hero, pro)
        #[arg(long, default_value = "free")]
        tier: String,
    },
    /// Record the outcome of a stored pick
    Settle {
        /// JSON identity: date, home, away, market, selection
        identity: String,
        /// Outcome (pending, win, lose, push)
        #[arg(long)]
        status: Option<String>,
        /// Closing odds
        #[arg(long)]
        closing: Option<f64>,
        /// Corrected odds
        #[arg(long)]
        odds: Option<f64>,
        /// Final score, e.g. 2-1
        #[arg(long)]
        score: Option<String>,
        #[arg(long, default_value = "free")]
        tier: String,
    },
    /// Print a day's picks
    Show {
        date: String,
        #[arg(long, default_value = "free")]
        tier: String,
    },
    /// Settlement record over a date range
    Results {
        /// First day (YYYY-MM-DD)
        from: String,
        /// Last day, inclusive (defaults to `from`)
        to: Option<String>,
        #[arg(long, default_value = "free")]
        tier: String,
    },
    /// Score the day's fixtures and merge the strongest picks
    Generate {
        date: String,
        #[arg(long, default_value = "free")]
        tier: String,
        /// Override the minimum confidence (0-100)
        #[arg(long)]
        min_confidence: Option<u8>,
        /// Override the number of picks kept
        #[arg(long)]
        limit: Option<usize>,
    },
}
