use serde::{Deserialize, Serialize};

/// Target-operating-model lifecycle configuration: the ordered phase table
/// and the exit requirements guarding each phase boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TomConfig {
    pub enabled: bool,
    pub phases: Vec<TomPhase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TomPhase {
    pub id: String,
    pub name: String,
    /// Use-case statuses that place a record in this phase.
    #[serde(default)]
    pub statuses: Vec<String>,
    /// Deployment statuses that place a record in this phase when no status
    /// matches (deployment is a later, more specific signal).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_statuses: Option<Vec<String>>,
    #[serde(default)]
    pub exit_requirements: Vec<ExitRequirement>,
}

/// A named condition that should hold before a record leaves this phase.
/// May be bypassed with an explicit justification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitRequirement {
    pub kind: ExitRequirementKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

/// Closed set of requirement kinds. Adding a kind forces every evaluation
/// site to handle it (exhaustive match, no string dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitRequirementKind {
    KpiSelection,
    IndependenceThreshold,
    BenefitsBaseline,
    GovernanceComplete,
}

impl TomConfig {
    pub fn phase_by_id(&self, id: &str) -> Option<&TomPhase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Derive the phase for a record. An explicit override pins the phase;
    /// otherwise the first phase listing the status wins, with deployment
    /// status as the fallback signal. Returns `None` for unphased records.
    pub fn derive_phase(
        &self,
        status: Option<&str>,
        deployment: Option<&str>,
        override_id: Option<&str>,
    ) -> Option<&TomPhase> {
        if let Some(id) = override_id {
            if let Some(phase) = self.phase_by_id(id) {
                return Some(phase);
            }
        }
        if let Some(status) = status {
            let by_status = self
                .phases
                .iter()
                .find(|p| p.statuses.iter().any(|s| s.eq_ignore_ascii_case(status)));
            if by_status.is_some() {
                return by_status;
            }
        }
        if let Some(deployment) = deployment {
            return self.phases.iter().find(|p| {
                p.deployment_statuses
                    .as_ref()
                    .is_some_and(|d| d.iter().any(|s| s.eq_ignore_ascii_case(deployment)))
            });
        }
        None
    }
}

impl Default for TomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            phases: default_phases(),
        }
    }
}

fn req(kind: ExitRequirementKind, label: &str, threshold: Option<f64>) -> ExitRequirement {
    ExitRequirement {
        kind,
        label: label.to_string(),
        threshold,
    }
}

fn default_phases() -> Vec<TomPhase> {
    vec![
        TomPhase {
            id: "ideation".into(),
            name: "Ideation".into(),
            statuses: vec!["Discovery".into(), "Backlog".into()],
            deployment_statuses: None,
            exit_requirements: vec![req(ExitRequirementKind::KpiSelection, "KPI Selection", None)],
        },
        TomPhase {
            id: "delivery".into(),
            name: "Delivery".into(),
            statuses: vec!["In-flight".into(), "On Hold".into()],
            deployment_statuses: Some(vec!["Pilot".into(), "Staged Rollout".into()]),
            exit_requirements: vec![
                req(
                    ExitRequirementKind::GovernanceComplete,
                    "Governance Sign-off",
                    None,
                ),
                req(
                    ExitRequirementKind::BenefitsBaseline,
                    "Benefits Baseline",
                    None,
                ),
            ],
        },
        TomPhase {
            id: "scale_operate".into(),
            name: "Scale & Operate".into(),
            statuses: vec!["Implemented".into()],
            deployment_statuses: Some(vec!["Production".into()]),
            exit_requirements: vec![req(
                ExitRequirementKind::IndependenceThreshold,
                "Independence Threshold",
                Some(70.0),
            )],
        },
    ]
}
