use casegate_core::spec::scoring::ScoringWeights;
use casegate_core::types::{Quadrant, SCORE_CEILING, SCORE_FLOOR};
use casegate_core::usecase::UseCase;
use serde::Serialize;

/// Weighted sum of five levers: `Σ(lever × weight / 100)`, clamped to [0, 5].
///
/// A missing lever scores zero ("not yet assessed"), never an error. Weights
/// are not required to sum to 100; heavier totals can clamp at the ceiling
/// and that is accepted configuration.
pub fn weighted_score(levers: &[Option<u8>; 5], weights: &[f64; 5]) -> f64 {
    let total: f64 = levers
        .iter()
        .zip(weights)
        .map(|(lever, weight)| f64::from(lever.unwrap_or(0)) * weight / 100.0)
        .sum();
    total.clamp(SCORE_FLOOR, SCORE_CEILING)
}

/// Computed Impact and Effort for one record.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScorePair {
    pub impact: f64,
    pub effort: f64,
}

pub fn score_use_case(uc: &UseCase, weights: &ScoringWeights) -> ScorePair {
    ScorePair {
        impact: weighted_score(&uc.value_levers(), &weights.business_value.as_array()),
        effort: weighted_score(&uc.effort_levers(), &weights.feasibility.as_array()),
    }
}

/// Quadrant decision table. Impact compares inclusive; Effort's low branch is
/// strict, so Effort exactly at the threshold lands in the high-effort column.
/// The asymmetry is load-bearing for compatibility with stored verdicts.
pub fn classify(impact: f64, effort: f64, threshold: f64) -> Quadrant {
    match (impact >= threshold, effort < threshold) {
        (true, true) => Quadrant::QuickWin,
        (true, false) => Quadrant::StrategicBet,
        (false, true) => Quadrant::Experimental,
        (false, false) => Quadrant::Watchlist,
    }
}
