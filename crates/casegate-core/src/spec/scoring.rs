use serde::{Deserialize, Serialize};

/// Equal weighting across five levers.
pub const DEFAULT_WEIGHT: f64 = 20.0;

/// Impact/Effort boundary between the four quadrants.
pub const DEFAULT_QUADRANT_THRESHOLD: f64 = 3.0;

/// Per-organization scoring weights. Each map conceptually sums to 100, but
/// that is not enforced: a heavier total simply lets scores clamp at the
/// ceiling, which is accepted configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringWeights {
    pub business_value: ValueWeights,
    pub feasibility: FeasibilityWeights,
    pub quadrant_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            business_value: ValueWeights::default(),
            feasibility: FeasibilityWeights::default(),
            quadrant_threshold: DEFAULT_QUADRANT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueWeights {
    pub revenue_impact: f64,
    pub cost_savings: f64,
    pub risk_reduction: f64,
    pub broker_partner_experience: f64,
    pub strategic_fit: f64,
}

impl Default for ValueWeights {
    fn default() -> Self {
        Self {
            revenue_impact: DEFAULT_WEIGHT,
            cost_savings: DEFAULT_WEIGHT,
            risk_reduction: DEFAULT_WEIGHT,
            broker_partner_experience: DEFAULT_WEIGHT,
            strategic_fit: DEFAULT_WEIGHT,
        }
    }
}

impl ValueWeights {
    /// Weights in the same order as [`crate::usecase::UseCase::value_levers`].
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.revenue_impact,
            self.cost_savings,
            self.risk_reduction,
            self.broker_partner_experience,
            self.strategic_fit,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeasibilityWeights {
    pub data_readiness: f64,
    pub technical_complexity: f64,
    pub integration_effort: f64,
    pub model_maturity: f64,
    pub adoption_readiness: f64,
}

impl Default for FeasibilityWeights {
    fn default() -> Self {
        Self {
            data_readiness: DEFAULT_WEIGHT,
            technical_complexity: DEFAULT_WEIGHT,
            integration_effort: DEFAULT_WEIGHT,
            model_maturity: DEFAULT_WEIGHT,
            adoption_readiness: DEFAULT_WEIGHT,
        }
    }
}

impl FeasibilityWeights {
    /// Weights in the same order as [`crate::usecase::UseCase::effort_levers`].
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.data_readiness,
            self.technical_complexity,
            self.integration_effort,
            self.model_maturity,
            self.adoption_readiness,
        ]
    }
}
