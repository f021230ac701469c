//! Poisson market model.
//!
//! Expected goals for each side blend the side's own scoring rate with the
//! opponent's conceding rate at the relevant venue:
//! - `λ_home = w · home.for_home + (1 - w) · away.against_away`
//! - `λ_away = w · away.for_away + (1 - w) · home.against_home`
//!
//! Goals for each side are treated as independent Poisson variables. Match
//! outcome probabilities come from the joint score grid, totals from the
//! Poisson of the summed rate, and BTTS from `P(home > 0) · P(away > 0)`.
//! Cards and corners use the same totals logic over team averages.

use crate::domain::entities::fixture::TeamStats;
use crate::domain::values::confidence::Confidence;
use serde::Serialize;
use std::fmt;

const MIN_LAMBDA: f64 = 0.05;
const MAX_LAMBDA: f64 = 5.0;

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    /// Weight of a team's own scoring rate vs. the opponent's conceding rate.
    pub blend_weight: f64,
    /// Score grid size per side for 1X2.
    pub max_goals: u32,
    pub goals_line: f64,
    pub cards_line: f64,
    pub corners_line: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            blend_weight: 0.5,
            max_goals: 10,
            goals_line: 2.5,
            cards_line: 4.5,
            corners_line: 9.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Market {
    MatchResult,
    Goals,
    Btts,
    Cards,
    Corners,
}

impl Market {
    pub fn label(&self, cfg: &ModelConfig) -> String {
        match self {
            Market::MatchResult => "1X2".to_string(),
            Market::Goals => format!("Over/Under {}", cfg.goals_line),
            Market::Btts => "BTTS".to_string(),
            Market::Cards => format!("Cards Over/Under {}", cfg.cards_line),
            Market::Corners => format!("Corners Over/Under {}", cfg.corners_line),
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(&ModelConfig::default()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketEstimate {
    pub market: Market,
    pub label: String,
    pub selection: String,
    pub probability: f64,
    pub confidence: Confidence,
    pub fair_odds: f64,
}

impl MarketEstimate {
    fn new(market: Market, cfg: &ModelConfig, selection: String, probability: f64) -> Self {
        let probability = probability.clamp(0.0, 1.0);
        Self {
            market,
            label: market.label(cfg),
            selection,
            probability,
            confidence: Confidence::from_probability(probability),
            fair_odds: if probability > 0.0 { 1.0 / probability } else { f64::INFINITY },
        }
    }
}

/// Probabilities of home win, draw and away win.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeProbs {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

pub fn poisson_pmf(k: u32, lambda: f64) -> f64 {
    let mut p = (-lambda).exp();
    for i in 1..=k {
        p *= lambda / i as f64;
    }
    p
}

/// `P(X <= k)`.
pub fn poisson_cdf(k: u32, lambda: f64) -> f64 {
    (0..=k).map(|i| poisson_pmf(i, lambda)).sum::<f64>().min(1.0)
}

/// `P(X > line)` for a half-goal line such as 2.5.
pub fn over_probability(line: f64, lambda: f64) -> f64 {
    if line < 0.0 {
        return 1.0;
    }
    1.0 - poisson_cdf(line.floor() as u32, lambda)
}

pub fn expected_goals(home: &TeamStats, away: &TeamStats, cfg: &ModelConfig) -> (f64, f64) {
    let w = cfg.blend_weight.clamp(0.0, 1.0);
    let lh = w * home.goals_for_home + (1.0 - w) * away.goals_against_away;
    let la = w * away.goals_for_away + (1.0 - w) * home.goals_against_home;
    (clamp_lambda(lh), clamp_lambda(la))
}

fn clamp_lambda(l: f64) -> f64 {
    if l.is_finite() {
        l.clamp(MIN_LAMBDA, MAX_LAMBDA)
    } else {
        MIN_LAMBDA
    }
}

pub fn outcome_probs(lambda_home: f64, lambda_away: f64, max_goals: u32) -> OutcomeProbs {
    let home_pmf: Vec<f64> = (0..=max_goals).map(|k| poisson_pmf(k, lambda_home)).collect();
    let away_pmf: Vec<f64> = (0..=max_goals).map(|k| poisson_pmf(k, lambda_away)).collect();

    let (mut h, mut d, mut a) = (0.0, 0.0, 0.0);
    for (i, ph) in home_pmf.iter().enumerate() {
        for (j, pa) in away_pmf.iter().enumerate() {
            let p = ph * pa;
            match i.cmp(&j) {
                std::cmp::Ordering::Greater => h += p,
                std::cmp::Ordering::Equal => d += p,
                std::cmp::Ordering::Less => a += p,
            }
        }
    }

    // The grid truncates the tails; renormalise so the three sum to one.
    let total = h + d + a;
    if total <= 0.0 {
        return OutcomeProbs { home: 1.0 / 3.0, draw: 1.0 / 3.0, away: 1.0 / 3.0 };
    }
    OutcomeProbs { home: h / total, draw: d / total, away: a / total }
}

pub fn btts_probability(lambda_home: f64, lambda_away: f64) -> f64 {
    (1.0 - (-lambda_home).exp()) * (1.0 - (-lambda_away).exp())
}

fn totals_estimate(market: Market, cfg: &ModelConfig, line: f64, lambda: f64) -> MarketEstimate {
    let over = over_probability(line, lambda);
    if over >= 0.5 {
        MarketEstimate::new(market, cfg, format!("Over {line}"), over)
    } else {
        MarketEstimate::new(market, cfg, format!("Under {line}"), 1.0 - over)
    }
}

/// Scores every market the stats allow. Cards and corners need both teams' averages.
pub fn estimate_markets(home: &TeamStats, away: &TeamStats, cfg: &ModelConfig) -> Vec<MarketEstimate> {
    let (lh, la) = expected_goals(home, away, cfg);
    let mut out = Vec::with_capacity(5);

    let probs = outcome_probs(lh, la, cfg.max_goals);
    let (selection, p) = [("Home", probs.home), ("Draw", probs.draw), ("Away", probs.away)]
        .into_iter()
        .fold(("Home", f64::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });
    out.push(MarketEstimate::new(Market::MatchResult, cfg, selection.to_string(), p));

    out.push(totals_estimate(Market::Goals, cfg, cfg.goals_line, lh + la));

    let btts = btts_probability(lh, la);
    if btts >= 0.5 {
        out.push(MarketEstimate::new(Market::Btts, cfg, "Yes".to_string(), btts));
    } else {
        out.push(MarketEstimate::new(Market::Btts, cfg, "No".to_string(), 1.0 - btts));
    }

    if let (Some(hc), Some(ac)) = (home.cards_avg, away.cards_avg) {
        out.push(totals_estimate(Market::Cards, cfg, cfg.cards_line, clamp_total(hc + ac)));
    }
    if let (Some(hc), Some(ac)) = (home.corners_avg, away.corners_avg) {
        out.push(totals_estimate(Market::Corners, cfg, cfg.corners_line, clamp_total(hc + ac)));
    }

    out
}

fn clamp_total(l: f64) -> f64 {
    if l.is_finite() { l.max(MIN_LAMBDA) } else { MIN_LAMBDA }
}
