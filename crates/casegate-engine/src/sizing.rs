use casegate_core::spec::sizing::{MappingRule, TShirtSizingConfig};
use serde::Serialize;

const WORKING_DAYS_PER_WEEK: f64 = 5.0;

/// Band applied when the config does not set `benefitRangePct`.
pub const DEFAULT_BENEFIT_RANGE_PCT: f64 = 0.2;

/// Effort-sizing verdict. Config problems surface in `error` with whatever
/// fields could still be derived; individual bad rules land in `warnings`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeEstimate {
    pub size: Option<String>,
    pub cost_min: Option<i64>,
    pub cost_max: Option<i64>,
    pub weeks_min: Option<f64>,
    pub weeks_max: Option<f64>,
    pub team_size_min: Option<u32>,
    pub team_size_max: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SizeEstimate {
    fn failed(error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}

/// Match (Impact, Effort) against the configured rule table and derive cost
/// and duration ranges for the selected size.
///
/// Rules are tried highest priority first; the sort is stable, so ties keep
/// their listed order. Given one catch-all rule the estimator is total over
/// `[1,5]²` — inputs outside that square are clamped into it.
pub fn estimate_size(impact: f64, effort: f64, cfg: &TShirtSizingConfig) -> SizeEstimate {
    if !cfg.enabled {
        return SizeEstimate::failed("t-shirt sizing is disabled");
    }
    if cfg.sizes.is_empty() || cfg.roles.is_empty() || cfg.mapping_rules.is_empty() {
        return SizeEstimate::failed(
            "t-shirt sizing config incomplete: sizes, roles, and mappingRules must all be non-empty",
        );
    }

    let mut out = SizeEstimate::default();
    let impact = impact.clamp(1.0, 5.0);
    let effort = effort.clamp(1.0, 5.0);

    let mut rules: Vec<&MappingRule> = cfg.mapping_rules.iter().collect();
    rules.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut matched: Option<&MappingRule> = None;
    for rule in rules {
        if !rule.condition.is_well_formed() {
            out.warnings
                .push(format!("skipping malformed mapping rule '{}'", rule.name));
            continue;
        }
        if rule.condition.contains(impact, effort) {
            matched = Some(rule);
            break;
        }
    }

    // No rule matched: the smallest size is the safety net.
    let size_name = match matched {
        Some(rule) => rule.size.as_str(),
        None => cfg.sizes[0].name.as_str(),
    };
    let band = match cfg.sizes.iter().find(|s| s.name == size_name) {
        Some(band) => band,
        None => {
            out.warnings
                .push(format!("mapping rule targets unknown size '{size_name}'"));
            &cfg.sizes[0]
        }
    };

    out.size = Some(band.name.clone());
    out.weeks_min = Some(band.weeks_min);
    out.weeks_max = Some(band.weeks_max);
    out.team_size_min = Some(band.team_size_min);
    out.team_size_max = Some(band.team_size_max);

    let billable: Vec<f64> = cfg
        .roles
        .iter()
        .map(|r| r.daily_rate_gbp)
        .filter(|rate| *rate > 0.0)
        .collect();
    if billable.is_empty() {
        out.error = Some("no roles with a positive daily rate".to_string());
        return out;
    }
    let avg_rate = billable.iter().sum::<f64>() / billable.len() as f64;
    let avg_team = f64::from(band.team_size_min + band.team_size_max) / 2.0;
    let daily_team_cost = avg_rate * avg_team * cfg.overhead_multiplier;

    let cost_min = (daily_team_cost * band.weeks_min * WORKING_DAYS_PER_WEEK).round();
    let cost_max = (daily_team_cost * band.weeks_max * WORKING_DAYS_PER_WEEK).round();
    if !cost_min.is_finite() || !cost_max.is_finite() || cost_min < 0.0 || cost_max < cost_min {
        out.error = Some("cost calculation produced an invalid range".to_string());
        return out;
    }
    out.cost_min = Some(cost_min as i64);
    out.cost_max = Some(cost_max as i64);
    out
}

/// Estimated annual benefit band for a sized use case.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitEstimate {
    pub benefit_min: Option<i64>,
    pub benefit_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-size multiplier × clamped impact, with a symmetric ± band, rounded to
/// the nearest 1000.
pub fn estimate_annual_benefit(impact: f64, size: &str, cfg: &TShirtSizingConfig) -> BenefitEstimate {
    let mut out = BenefitEstimate::default();
    let Some(multipliers) = &cfg.benefit_multipliers else {
        out.error = Some("no benefit multipliers configured".to_string());
        return out;
    };
    let Some(per_point) = multipliers.get(size) else {
        out.error = Some(format!("no benefit multiplier for size '{size}'"));
        return out;
    };
    let base = per_point * impact.clamp(1.0, 5.0);
    let band = cfg.benefit_range_pct.unwrap_or(DEFAULT_BENEFIT_RANGE_PCT);
    out.benefit_min = Some(round_to_thousand(base * (1.0 - band)));
    out.benefit_max = Some(round_to_thousand(base * (1.0 + band)));
    out
}

fn round_to_thousand(v: f64) -> i64 {
    ((v / 1000.0).round() * 1000.0) as i64
}
