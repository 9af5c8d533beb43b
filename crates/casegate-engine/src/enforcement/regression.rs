use casegate_core::errors::EngineError;
use casegate_core::types::{enforcement_cutoff, GateKind, RegressionReason};
use casegate_core::usecase::UseCase;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::gates::evaluator::calculate_governance_status;

/// Verdict on a proposed field update against an already-active record.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionVerdict {
    pub should_deactivate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RegressionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regressed_gate: Option<GateKind>,
    pub is_legacy_use_case: bool,
}

/// Re-run governance before and after a proposed shallow field update.
///
/// Only applies to records that are already active. Legacy records (active
/// with a `createdAt` before the enforcement cutoff) still get the reason and
/// blamed gate for audit purposes, but are never auto-deactivated. A record
/// with no `createdAt` cannot prove it predates enforcement and is treated as
/// post-cutoff.
pub fn check_governance_regression(
    current: &UseCase,
    updates: &Map<String, Value>,
) -> Result<RegressionVerdict, EngineError> {
    let active = current
        .status()
        .is_some_and(|s| s.is_activation_status());
    if !active {
        return Ok(RegressionVerdict::default());
    }

    let is_legacy_use_case = current
        .created_at
        .is_some_and(|t| t < enforcement_cutoff());

    let merged = current.with_updates(updates)?;
    let before = calculate_governance_status(current);
    let after = calculate_governance_status(&merged);

    if !before.can_activate || after.can_activate {
        return Ok(RegressionVerdict {
            is_legacy_use_case,
            ..RegressionVerdict::default()
        });
    }

    // Blame the first gate in evaluation order whose gated result flipped.
    let regressed_gate = before
        .gates
        .iter()
        .zip(&after.gates)
        .find(|(b, a)| b.passed && !a.passed)
        .map(|(b, _)| b.gate);

    Ok(RegressionVerdict {
        should_deactivate: !is_legacy_use_case,
        reason: Some(RegressionReason::GovernanceRegression),
        regressed_gate,
        is_legacy_use_case,
    })
}
