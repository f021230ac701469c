use clap::Parser;
use pickboard::cli::commands::{Cli, Commands};
use pickboard::config::Config;
use pickboard::domain::entities::pick::{parse_day, IncomingPick, PickIdentity, SettlementPatch};
use pickboard::domain::values::pick_status::PickStatus;
use pickboard::domain::values::tier::Tier;
use pickboard::PickBoard;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Commands::Generate { min_confidence, limit, .. } = &cli.command {
        if let Some(c) = min_confidence {
            config.generate.min_confidence = (*c).min(100);
        }
        if let Some(l) = limit {
            config.generate.limit = *l;
        }
    }

    let board = match PickBoard::new(&config) {
        Ok(board) => board,
        Err(e) => {
            tracing::error!(error = %e, db = %config.db_path, "failed to open pick store");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(board, cli.command).await {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

async fn run_command(board: PickBoard, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Write { date, json, tier } => {
            let date = parse_day(&date)?;
            let picks: Vec<IncomingPick> = serde_json::from_str(&json)?;
            let report = board.write_daily_picks(Tier::lookup(&tier), date, picks)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Settle {
            identity,
            status,
            closing,
            odds,
            score,
            tier,
        } => {
            let identity: PickIdentity = serde_json::from_str(&identity)?;
            let status = status.map(|s| s.parse::<PickStatus>()).transpose()?;
            let patch = SettlementPatch {
                status,
                odds,
                closing,
                score,
            };
            let outcome = board.settle_pick(Tier::lookup(&tier), &identity, &patch)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Show { date, tier } => {
            let date = parse_day(&date)?;
            match board.day(Tier::lookup(&tier), date)? {
                Some(day) => println!("{}", serde_json::to_string_pretty(&day.picks)?),
                None => println!("No picks stored for {date}"),
            }
        }
        Commands::Results { from, to, tier } => {
            let from = parse_day(&from)?;
            let to = match to {
                Some(to) => parse_day(&to)?,
                None => from,
            };
            let report = board.results(Tier::lookup(&tier), from, to)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Generate { date, tier, .. } => {
            let date = parse_day(&date)?;
            let report = board.generate_picks(Tier::lookup(&tier), date).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
