use casegate_core::types::{BlockReason, TriState, UseCaseStatus};
use casegate_core::usecase::UseCase;
use serde::Serialize;

use crate::gates::evaluator::{calculate_governance_status, GovernanceCheck};

/// Whether a status transition into an active state may proceed. When blocked,
/// the full governance check rides along so the API layer can enumerate the
/// missing fields per gate without re-evaluating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationDecision {
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<BlockReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub governance: Option<GovernanceCheck>,
}

impl ActivationDecision {
    fn allowed() -> Self {
        Self {
            blocked: false,
            reason: None,
            governance: None,
        }
    }
}

/// Decide whether moving `uc` into `target_status` is permitted.
///
/// Non-activation targets are never blocked. The legacy flag is an absolute
/// bypass: records activated before enforcement existed skip gate evaluation
/// entirely rather than failing checks they were never held to.
pub fn check_activation_allowed(uc: &UseCase, target_status: &str) -> ActivationDecision {
    let activating = UseCaseStatus::parse(target_status).is_some_and(UseCaseStatus::is_activation_status);
    if !activating {
        return ActivationDecision::allowed();
    }
    if uc.legacy_activation_flag == TriState::True {
        return ActivationDecision::allowed();
    }

    let governance = calculate_governance_status(uc);
    if governance.can_activate {
        ActivationDecision::allowed()
    } else {
        ActivationDecision {
            blocked: true,
            reason: Some(BlockReason::GovernanceIncomplete),
            governance: Some(governance),
        }
    }
}
