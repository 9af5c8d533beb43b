use std::sync::Arc;
use std::time::Instant;

use casegate_core::spec::scoring::ScoringWeights;
use casegate_core::spec::sizing::TShirtSizingConfig;
use casegate_core::traits::{EvalCollector, EvalSample};
use casegate_core::types::{Quadrant, SCORE_CEILING, SCORE_FLOOR};
use casegate_core::usecase::UseCase;
use chrono::Utc;
use serde::Serialize;

use crate::gates::evaluator::{calculate_governance_status, GovernanceCheck};
use crate::metrics::NoopCollector;
use crate::scoring::{classify, score_use_case};
use crate::sizing::{estimate_annual_benefit, estimate_size, BenefitEstimate, SizeEstimate};

/// Full prioritization verdict for one record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub impact: f64,
    pub effort: f64,
    pub impact_overridden: bool,
    pub effort_overridden: bool,
    pub quadrant: Quadrant,
    pub quadrant_overridden: bool,
    pub size: SizeEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_benefit: Option<BenefitEstimate>,
}

/// Front door for a full evaluation: weighted scores with manual overrides
/// applied, quadrant, sizing, and benefit, each timed through the injected
/// collector. Configs are held by value; one assessor serves any number of
/// records concurrently.
pub struct Assessor {
    weights: ScoringWeights,
    sizing: TShirtSizingConfig,
    collector: Arc<dyn EvalCollector>,
}

impl Default for Assessor {
    fn default() -> Self {
        Self::new(ScoringWeights::default(), TShirtSizingConfig::default())
    }
}

impl Assessor {
    pub fn new(weights: ScoringWeights, sizing: TShirtSizingConfig) -> Self {
        Self {
            weights,
            sizing,
            collector: Arc::new(NoopCollector),
        }
    }

    pub fn with_collector(mut self, collector: Arc<dyn EvalCollector>) -> Self {
        self.collector = collector;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn sizing(&self) -> &TShirtSizingConfig {
        &self.sizing
    }

    /// Score, classify, and size one record. A manual score override replaces
    /// the computed value (clamped to the score range); an unparseable manual
    /// quadrant label is ignored.
    pub fn assess(&self, uc: &UseCase) -> Assessment {
        let computed = self.timed("scoring", || score_use_case(uc, &self.weights));

        let manual_impact = uc
            .manual_impact_score
            .map(|v| v.clamp(SCORE_FLOOR, SCORE_CEILING));
        let manual_effort = uc
            .manual_effort_score
            .map(|v| v.clamp(SCORE_FLOOR, SCORE_CEILING));
        let impact = manual_impact.unwrap_or(computed.impact);
        let effort = manual_effort.unwrap_or(computed.effort);

        let manual_quadrant = uc.manual_quadrant.as_deref().and_then(Quadrant::parse);
        let quadrant = manual_quadrant
            .unwrap_or_else(|| classify(impact, effort, self.weights.quadrant_threshold));

        let size = self.timed("sizing", || estimate_size(impact, effort, &self.sizing));
        let annual_benefit = match (&size.size, &self.sizing.benefit_multipliers) {
            (Some(name), Some(_)) => Some(estimate_annual_benefit(impact, name, &self.sizing)),
            _ => None,
        };

        Assessment {
            impact,
            effort,
            impact_overridden: manual_impact.is_some(),
            effort_overridden: manual_effort.is_some(),
            quadrant,
            quadrant_overridden: manual_quadrant.is_some(),
            size,
            annual_benefit,
        }
    }

    pub fn governance(&self, uc: &UseCase) -> GovernanceCheck {
        self.timed("governance", || calculate_governance_status(uc))
    }

    fn timed<T>(&self, component: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.collector.record(EvalSample {
            component: component.to_string(),
            duration_micros: start.elapsed().as_micros() as u64,
            recorded_at: Utc::now(),
        });
        out
    }
}
