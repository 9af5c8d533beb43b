use casegate_core::spec::tom::{ExitRequirement, ExitRequirementKind, TomConfig};
use casegate_core::types::TriState;
use casegate_core::usecase::UseCase;
use serde::Serialize;

use crate::gates::evaluator::{calculate_governance_status, GovernanceCheck};

/// Fallback independence bar when a requirement carries no threshold.
pub const DEFAULT_INDEPENDENCE_THRESHOLD: f64 = 70.0;

/// What a proposed status change does to the record's operating-model phase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTransitionInfo {
    pub has_transition: bool,
    pub from_phase_id: Option<String>,
    pub to_phase_id: Option<String>,
    /// Labels of the current phase's exit requirements still unmet.
    pub exit_requirements_pending: Vec<String>,
    pub is_exiting_unphased_or_disabled: bool,
}

/// Final answer on whether the transition may proceed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTransitionCheck {
    pub allowed: bool,
    pub requires_justification: bool,
    pub current_phase: Option<String>,
    pub target_phase: Option<String>,
    pub pending_exit_requirements: Vec<String>,
    pub is_exiting_unphased_or_disabled: bool,
}

/// Derive both ends of the proposed transition from the phase table and work
/// out which exit requirements of the current phase remain unmet.
///
/// The record's deployment status and phase override apply to both ends: the
/// proposal changes only the lifecycle status.
pub fn detect_phase_transition(
    uc: &UseCase,
    current_status: Option<&str>,
    target_status: &str,
    tom: &TomConfig,
    governance: Option<&GovernanceCheck>,
) -> PhaseTransitionInfo {
    let deployment = uc.deployment_status.as_deref();
    let override_id = uc.tom_phase_override.as_deref();

    let from = tom.derive_phase(current_status, deployment, override_id);
    let to = tom.derive_phase(Some(target_status), deployment, override_id);

    let from_phase_id = from.map(|p| p.id.clone());
    let to_phase_id = to.map(|p| p.id.clone());

    // Phases that are not enabled, or a record that is not in any phase,
    // carry no exit gate.
    if !tom.enabled || from.is_none() {
        return PhaseTransitionInfo {
            has_transition: from_phase_id != to_phase_id,
            from_phase_id,
            to_phase_id,
            exit_requirements_pending: Vec::new(),
            is_exiting_unphased_or_disabled: true,
        };
    }

    let has_transition = from_phase_id != to_phase_id;
    let exit_requirements_pending = if has_transition {
        from.map(|p| {
            p.exit_requirements
                .iter()
                .filter(|r| !requirement_met(r, uc, governance))
                .map(|r| r.label.clone())
                .collect()
        })
        .unwrap_or_default()
    } else {
        Vec::new()
    };

    PhaseTransitionInfo {
        has_transition,
        from_phase_id,
        to_phase_id,
        exit_requirements_pending,
        is_exiting_unphased_or_disabled: false,
    }
}

/// Gate a proposed status change on the current phase's exit requirements.
///
/// A non-empty justification is an unconditional override: it allows the
/// transition no matter how many requirements are pending, and its content is
/// not validated. The pending list is returned either way so callers can log
/// what was bypassed.
pub fn check_phase_transition_requirements(
    uc: &UseCase,
    current_status: Option<&str>,
    target_status: &str,
    tom: &TomConfig,
    justification: Option<&str>,
    governance: Option<&GovernanceCheck>,
) -> PhaseTransitionCheck {
    let info = detect_phase_transition(uc, current_status, target_status, tom, governance);

    if info.is_exiting_unphased_or_disabled || !info.has_transition {
        return PhaseTransitionCheck {
            allowed: true,
            requires_justification: false,
            current_phase: info.from_phase_id,
            target_phase: info.to_phase_id,
            pending_exit_requirements: info.exit_requirements_pending,
            is_exiting_unphased_or_disabled: info.is_exiting_unphased_or_disabled,
        };
    }

    if info.exit_requirements_pending.is_empty() {
        return PhaseTransitionCheck {
            allowed: true,
            requires_justification: false,
            current_phase: info.from_phase_id,
            target_phase: info.to_phase_id,
            pending_exit_requirements: Vec::new(),
            is_exiting_unphased_or_disabled: false,
        };
    }

    let justified = justification.is_some_and(|j| !j.trim().is_empty());
    PhaseTransitionCheck {
        allowed: justified,
        requires_justification: !justified,
        current_phase: info.from_phase_id,
        target_phase: info.to_phase_id,
        pending_exit_requirements: info.exit_requirements_pending,
        is_exiting_unphased_or_disabled: false,
    }
}

fn requirement_met(
    req: &ExitRequirement,
    uc: &UseCase,
    governance: Option<&GovernanceCheck>,
) -> bool {
    match req.kind {
        ExitRequirementKind::KpiSelection => {
            uc.selected_kpis.as_ref().is_some_and(|k| !k.is_empty())
        }
        ExitRequirementKind::IndependenceThreshold => uc
            .independence_score
            .is_some_and(|s| s >= req.threshold.unwrap_or(DEFAULT_INDEPENDENCE_THRESHOLD)),
        ExitRequirementKind::BenefitsBaseline => uc.benefits_baseline == TriState::True,
        ExitRequirementKind::GovernanceComplete => match governance {
            Some(check) => check.all_passed,
            None => calculate_governance_status(uc).all_passed,
        },
    }
}
