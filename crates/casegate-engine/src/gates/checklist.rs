use casegate_core::types::{GateKind, TriState};
use casegate_core::usecase::UseCase;
use serde::Serialize;

/// Raw checklist result for a single gate.
///
/// `passed` here is the gate's own unconditional completeness. The sequential
/// rule (a gate only counts once every earlier gate passes) is layered on at
/// aggregation, not in these functions.
#[derive(Debug, Clone, Serialize)]
pub struct GateResult {
    pub gate: GateKind,
    pub passed: bool,
    /// Human-readable labels of the missing fields, in checklist order.
    pub issues: Vec<String>,
    /// `round(100 × completed / total)`.
    pub progress: u8,
}

/// Dispatch on the gate kind. Adding a gate extends the enum and this match,
/// which the compiler enforces.
pub fn evaluate_gate(gate: GateKind, uc: &UseCase) -> GateResult {
    match gate {
        GateKind::OperatingModel => operating_model(uc),
        GateKind::IntakePrioritization => intake_prioritization(uc),
        GateKind::ResponsibleAi => responsible_ai(uc),
    }
}

fn finish(gate: GateKind, issues: Vec<String>, total: usize) -> GateResult {
    let done = total - issues.len();
    GateResult {
        gate,
        passed: issues.is_empty(),
        progress: (100.0 * done as f64 / total as f64).round() as u8,
        issues,
    }
}

fn non_empty(field: Option<&str>) -> bool {
    field.is_some_and(|v| !v.trim().is_empty())
}

/// Ownership basics: a named owner, a function, and a status past Discovery.
fn operating_model(uc: &UseCase) -> GateResult {
    let mut issues = Vec::new();
    if !non_empty(uc.primary_business_owner.as_deref()) {
        issues.push("Primary Business Owner".to_string());
    }
    let status_ok = uc.use_case_status.as_deref().is_some_and(|s| {
        let s = s.trim();
        !s.is_empty() && !s.eq_ignore_ascii_case("discovery")
    });
    if !status_ok {
        issues.push("Use Case Status (beyond Discovery)".to_string());
    }
    if !non_empty(uc.business_function.as_deref()) {
        issues.push("Business Function".to_string());
    }
    finish(GateKind::OperatingModel, issues, 3)
}

/// All ten levers scored. Zero and unset both mean "not yet scored".
fn intake_prioritization(uc: &UseCase) -> GateResult {
    let mut issues = Vec::new();
    for (label, lever) in UseCase::LEVER_LABELS.iter().zip(uc.levers()) {
        if !lever.is_some_and(|v| (1..=5).contains(&v)) {
            issues.push((*label).to_string());
        }
    }
    finish(GateKind::IntakePrioritization, issues, 10)
}

/// Four explicit yes/no answers plus a harm-risk selection. An explicit "no"
/// is complete; only an unanswered question is an issue.
fn responsible_ai(uc: &UseCase) -> GateResult {
    let mut issues = Vec::new();
    let flags: [(&str, TriState); 4] = [
        ("Explainability Required", uc.explainability_required),
        ("Human Accountability", uc.human_accountability),
        ("Data Outside UK/EU", uc.data_outside_uk_eu),
        ("Third-Party Model", uc.third_party_model),
    ];
    for (label, flag) in flags {
        if !flag.is_set() {
            issues.push(label.to_string());
        }
    }
    let harm_ok = uc.customer_harm_risk.as_deref().is_some_and(|v| {
        let v = v.trim();
        !v.is_empty() && !v.eq_ignore_ascii_case("undefined") && !v.eq_ignore_ascii_case("null")
    });
    if !harm_ok {
        issues.push("Customer Harm Risk".to_string());
    }
    finish(GateKind::ResponsibleAi, issues, 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored() -> UseCase {
        serde_json::from_str(
            r#"{
                "primaryBusinessOwner": "Dana Ops",
                "businessFunction": "Underwriting",
                "useCaseStatus": "Backlog",
                "revenueImpact": 4, "costSavings": 3, "riskReduction": 5,
                "brokerPartnerExperience": 2, "strategicFit": 4,
                "dataReadiness": 3, "technicalComplexity": 2,
                "integrationEffort": 3, "modelMaturity": 4, "adoptionReadiness": 3,
                "explainabilityRequired": "true",
                "humanAccountability": "false",
                "dataOutsideUkEu": false,
                "thirdPartyModel": true,
                "customerHarmRisk": "Low"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn complete_record_passes_every_checklist() {
        let uc = scored();
        for gate in casegate_core::types::GATE_ORDER {
            let r = evaluate_gate(gate, &uc);
            assert!(r.passed, "{gate}: {:?}", r.issues);
            assert_eq!(r.progress, 100);
        }
    }

    #[test]
    fn discovery_status_fails_operating_model() {
        let mut uc = scored();
        uc.use_case_status = Some("Discovery".into());
        let r = evaluate_gate(GateKind::OperatingModel, &uc);
        assert!(!r.passed);
        assert_eq!(r.issues, vec!["Use Case Status (beyond Discovery)"]);
        assert_eq!(r.progress, 67);

        uc.use_case_status = Some("  discovery ".into());
        assert!(!evaluate_gate(GateKind::OperatingModel, &uc).passed);
    }

    #[test]
    fn blank_owner_is_missing() {
        let mut uc = scored();
        uc.primary_business_owner = Some("   ".into());
        let r = evaluate_gate(GateKind::OperatingModel, &uc);
        assert_eq!(r.issues, vec!["Primary Business Owner"]);
    }

    #[test]
    fn zero_lever_counts_as_unscored() {
        let mut uc = scored();
        uc.cost_savings = Some(0);
        uc.model_maturity = None;
        let r = evaluate_gate(GateKind::IntakePrioritization, &uc);
        assert!(!r.passed);
        assert_eq!(r.issues, vec!["Cost Savings", "Model Maturity"]);
        assert_eq!(r.progress, 80);
    }

    #[test]
    fn out_of_range_lever_counts_as_unscored() {
        let mut uc = scored();
        uc.revenue_impact = Some(6);
        assert!(!evaluate_gate(GateKind::IntakePrioritization, &uc).passed);
    }

    #[test]
    fn explicit_false_answers_are_complete() {
        let uc = scored();
        let r = evaluate_gate(GateKind::ResponsibleAi, &uc);
        assert!(r.passed, "{:?}", r.issues);
    }

    #[test]
    fn unset_rai_answer_is_an_issue() {
        let mut uc = scored();
        uc.third_party_model = TriState::Unset;
        let r = evaluate_gate(GateKind::ResponsibleAi, &uc);
        assert_eq!(r.issues, vec!["Third-Party Model"]);
        assert_eq!(r.progress, 80);
    }

    #[test]
    fn sentinel_harm_risk_strings_are_missing() {
        for bad in ["", "undefined", "null", "  NULL "] {
            let mut uc = scored();
            uc.customer_harm_risk = Some(bad.into());
            let r = evaluate_gate(GateKind::ResponsibleAi, &uc);
            assert!(r.issues.contains(&"Customer Harm Risk".to_string()), "{bad:?}");
        }
    }

    #[test]
    fn empty_record_has_zero_progress() {
        let uc = UseCase::default();
        for gate in casegate_core::types::GATE_ORDER {
            assert_eq!(evaluate_gate(gate, &uc).progress, 0);
        }
    }
}
