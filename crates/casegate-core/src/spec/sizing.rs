use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// T-shirt sizing configuration: effort bands, role rates, and the ordered
/// rule table that maps (Impact, Effort) to a size.
///
/// Invariant the default table upholds and custom configs should too: at
/// least one rule with an empty condition, so every input matches something.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TShirtSizingConfig {
    pub enabled: bool,
    pub sizes: Vec<SizeBand>,
    pub roles: Vec<RoleRate>,
    pub overhead_multiplier: f64,
    pub mapping_rules: Vec<MappingRule>,
    /// Annual benefit per impact point, keyed by size name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefit_multipliers: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefit_range_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeBand {
    pub name: String,
    pub weeks_min: f64,
    pub weeks_max: f64,
    pub team_size_min: u32,
    pub team_size_max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRate {
    pub role: String,
    #[serde(rename = "dailyRateGBP")]
    pub daily_rate_gbp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRule {
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub condition: RuleCondition,
    pub size: String,
}

/// Bounds on the clamped Impact/Effort pair. Any absent bound is unbounded;
/// a rule with no bounds at all matches everything (the catch-all).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effort_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effort_max: Option<f64>,
}

impl RuleCondition {
    /// Finite bounds, and min <= max wherever both ends are present.
    pub fn is_well_formed(&self) -> bool {
        let finite = [self.impact_min, self.impact_max, self.effort_min, self.effort_max]
            .iter()
            .flatten()
            .all(|v| v.is_finite());
        let ordered = |min: Option<f64>, max: Option<f64>| match (min, max) {
            (Some(lo), Some(hi)) => lo <= hi,
            _ => true,
        };
        finite
            && ordered(self.impact_min, self.impact_max)
            && ordered(self.effort_min, self.effort_max)
    }

    pub fn contains(&self, impact: f64, effort: f64) -> bool {
        self.impact_min.is_none_or(|lo| impact >= lo)
            && self.impact_max.is_none_or(|hi| impact <= hi)
            && self.effort_min.is_none_or(|lo| effort >= lo)
            && self.effort_max.is_none_or(|hi| effort <= hi)
    }
}

impl Default for TShirtSizingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sizes: default_sizes(),
            roles: default_roles(),
            overhead_multiplier: 1.2,
            mapping_rules: default_mapping_rules(),
            benefit_multipliers: Some(default_benefit_multipliers()),
            benefit_range_pct: Some(0.2),
        }
    }
}

fn band(name: &str, weeks_min: f64, weeks_max: f64, team_min: u32, team_max: u32) -> SizeBand {
    SizeBand {
        name: name.to_string(),
        weeks_min,
        weeks_max,
        team_size_min: team_min,
        team_size_max: team_max,
    }
}

fn default_sizes() -> Vec<SizeBand> {
    vec![
        band("XS", 1.0, 2.0, 1, 2),
        band("S", 2.0, 4.0, 2, 3),
        band("M", 4.0, 8.0, 3, 5),
        band("L", 8.0, 16.0, 4, 6),
        band("XL", 16.0, 26.0, 6, 10),
    ]
}

fn default_roles() -> Vec<RoleRate> {
    let rate = |role: &str, daily_rate_gbp: f64| RoleRate {
        role: role.to_string(),
        daily_rate_gbp,
    };
    vec![
        rate("Product Manager", 750.0),
        rate("Data Scientist", 850.0),
        rate("ML Engineer", 900.0),
        rate("Software Engineer", 800.0),
        rate("Delivery Lead", 700.0),
    ]
}

fn rule(name: &str, priority: i32, condition: RuleCondition, size: &str) -> MappingRule {
    MappingRule {
        name: name.to_string(),
        priority,
        condition,
        size: size.to_string(),
    }
}

fn default_mapping_rules() -> Vec<MappingRule> {
    vec![
        rule(
            "Critical Quick Fix",
            150,
            RuleCondition {
                impact_min: Some(4.5),
                effort_max: Some(1.5),
                ..RuleCondition::default()
            },
            "XS",
        ),
        rule(
            "High Value Low Effort",
            100,
            RuleCondition {
                impact_min: Some(3.5),
                effort_max: Some(2.0),
                ..RuleCondition::default()
            },
            "S",
        ),
        rule(
            "Transformation Programme",
            90,
            RuleCondition {
                impact_min: Some(4.0),
                effort_min: Some(4.0),
                ..RuleCondition::default()
            },
            "XL",
        ),
        rule(
            "Heavy Build",
            80,
            RuleCondition {
                effort_min: Some(4.0),
                ..RuleCondition::default()
            },
            "L",
        ),
        rule(
            "Standard Delivery",
            50,
            RuleCondition {
                effort_min: Some(2.5),
                ..RuleCondition::default()
            },
            "M",
        ),
        // Catch-all so the estimator is total over [1,5]^2.
        rule("Default", 0, RuleCondition::default(), "S"),
    ]
}

fn default_benefit_multipliers() -> BTreeMap<String, f64> {
    [
        ("XS", 50_000.0),
        ("S", 100_000.0),
        ("M", 250_000.0),
        ("L", 500_000.0),
        ("XL", 1_000_000.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
