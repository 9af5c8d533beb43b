use casegate_core::types::{GateKind, GovernanceStatus, GATE_ORDER};
use casegate_core::usecase::UseCase;
use serde::Serialize;

use super::checklist::evaluate_gate;

/// Outcome for one gate after the sequential rule has been applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateOutcome {
    pub gate: GateKind,
    /// Passing with every earlier gate also passing.
    pub passed: bool,
    /// The gate's own unconditional checklist result.
    pub checklist_passed: bool,
    pub issues: Vec<String>,
    pub progress: u8,
}

/// Aggregate governance verdict for one record. Produced fresh on every call;
/// never cache it across record changes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceCheck {
    pub gates: Vec<GateOutcome>,
    pub all_passed: bool,
    pub can_activate: bool,
    /// Unweighted mean of the raw per-gate progress values. Raw on purpose:
    /// progress reporting ignores the sequential rule so the UI can show how
    /// complete each gate's own checklist is.
    pub overall_progress: u8,
    pub status: GovernanceStatus,
}

impl GovernanceCheck {
    pub fn gate(&self, kind: GateKind) -> Option<&GateOutcome> {
        self.gates.iter().find(|g| g.gate == kind)
    }
}

/// Run all three gates in [`GATE_ORDER`] and apply the sequential rule:
/// a gate reports `passed` only when its own checklist and every earlier
/// gate's checklist are complete.
pub fn calculate_governance_status(uc: &UseCase) -> GovernanceCheck {
    let mut prior_ok = true;
    let mut gates = Vec::with_capacity(GATE_ORDER.len());
    for kind in GATE_ORDER {
        let raw = evaluate_gate(kind, uc);
        let gated = raw.passed && prior_ok;
        prior_ok = prior_ok && raw.passed;
        gates.push(GateOutcome {
            gate: raw.gate,
            passed: gated,
            checklist_passed: raw.passed,
            issues: raw.issues,
            progress: raw.progress,
        });
    }

    let all_passed = gates.iter().all(|g| g.passed);
    let any_passed = gates.iter().any(|g| g.passed);
    let no_progress = gates.iter().all(|g| g.progress == 0);
    let progress_sum: u32 = gates.iter().map(|g| u32::from(g.progress)).sum();
    let overall_progress = (f64::from(progress_sum) / gates.len() as f64).round() as u8;

    let status = if all_passed {
        GovernanceStatus::Complete
    } else if any_passed {
        GovernanceStatus::InReview
    } else if no_progress {
        GovernanceStatus::None
    } else {
        GovernanceStatus::Pending
    };

    GovernanceCheck {
        gates,
        all_passed,
        can_activate: all_passed,
        overall_progress,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> UseCase {
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
                "humanAccountability": "true",
                "dataOutsideUkEu": "false",
                "thirdPartyModel": "false",
                "customerHarmRisk": "Low"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn complete_record_can_activate() {
        let check = calculate_governance_status(&complete());
        assert!(check.all_passed);
        assert!(check.can_activate);
        assert_eq!(check.overall_progress, 100);
        assert_eq!(check.status, GovernanceStatus::Complete);
    }

    #[test]
    fn missing_owner_gates_later_checklists() {
        let mut uc = complete();
        uc.primary_business_owner = None;
        let check = calculate_governance_status(&uc);

        let om = check.gate(GateKind::OperatingModel).unwrap();
        let intake = check.gate(GateKind::IntakePrioritization).unwrap();
        let rai = check.gate(GateKind::ResponsibleAi).unwrap();

        assert!(!om.passed);
        // Their own checklists are 100% complete, but the sequential rule
        // keeps them from reporting passed.
        assert!(intake.checklist_passed && !intake.passed);
        assert!(rai.checklist_passed && !rai.passed);
        assert_eq!(intake.progress, 100);
        assert_eq!(rai.progress, 100);
        assert!(!check.can_activate);
    }

    #[test]
    fn overall_progress_uses_raw_values() {
        let mut uc = complete();
        uc.primary_business_owner = None;
        let check = calculate_governance_status(&uc);
        // OM 67, Intake 100, RAI 100 -> round(267/3) = 89
        assert_eq!(check.overall_progress, 89);
    }

    #[test]
    fn status_ladder() {
        let empty = UseCase::default();
        assert_eq!(calculate_governance_status(&empty).status, GovernanceStatus::None);

        let mut some_progress = UseCase::default();
        some_progress.primary_business_owner = Some("Dana Ops".into());
        assert_eq!(
            calculate_governance_status(&some_progress).status,
            GovernanceStatus::Pending
        );

        let mut first_gate_only = complete();
        first_gate_only.revenue_impact = None;
        let check = calculate_governance_status(&first_gate_only);
        assert!(check.gate(GateKind::OperatingModel).unwrap().passed);
        assert_eq!(check.status, GovernanceStatus::InReview);

        assert_eq!(
            calculate_governance_status(&complete()).status,
            GovernanceStatus::Complete
        );
    }

    #[test]
    fn middle_gate_failure_gates_only_later_gates() {
        let mut uc = complete();
        uc.adoption_readiness = Some(0);
        let check = calculate_governance_status(&uc);
        assert!(check.gate(GateKind::OperatingModel).unwrap().passed);
        assert!(!check.gate(GateKind::IntakePrioritization).unwrap().passed);
        let rai = check.gate(GateKind::ResponsibleAi).unwrap();
        assert!(rai.checklist_passed && !rai.passed);
    }
}
