#![allow(clippy::doc_markdown)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Scores below this are floored, above this ceilinged, by the calculator.
pub const SCORE_FLOOR: f64 = 0.0;
pub const SCORE_CEILING: f64 = 5.0;

/// Records active before this instant predate governance enforcement and are
/// exempt from auto-deactivation.
pub const ENFORCEMENT_CUTOFF: &str = "2026-01-24T00:00:00Z";

pub fn enforcement_cutoff() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(ENFORCEMENT_CUTOFF)
        .map(|t| t.with_timezone(&Utc))
        .expect("cutoff literal is valid RFC 3339")
}

/// A boolean that distinguishes "never answered" from an explicit answer.
///
/// The persistence layer stores these fields as the strings `"true"`/`"false"`;
/// older rows carry native booleans. Both are accepted on the way in, anything
/// else (including null and absence) is `Unset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriState {
    #[default]
    Unset,
    True,
    False,
}

impl TriState {
    /// An explicit answer, either way, counts as set.
    pub fn is_set(self) -> bool {
        self != TriState::Unset
    }

    pub fn is_true(self) -> bool {
        self == TriState::True
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TriState::Unset => serializer.serialize_none(),
            TriState::True => serializer.serialize_bool(true),
            TriState::False => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match v {
            Some(serde_json::Value::Bool(true)) => TriState::True,
            Some(serde_json::Value::Bool(false)) => TriState::False,
            Some(serde_json::Value::String(s)) => match s.trim() {
                "true" => TriState::True,
                "false" => TriState::False,
                _ => TriState::Unset,
            },
            _ => TriState::Unset,
        })
    }
}

/// Lifecycle status of a use case, as stored by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UseCaseStatus {
    Discovery,
    Backlog,
    #[serde(rename = "In-flight")]
    InFlight,
    Implemented,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl UseCaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UseCaseStatus::Discovery => "Discovery",
            UseCaseStatus::Backlog => "Backlog",
            UseCaseStatus::InFlight => "In-flight",
            UseCaseStatus::Implemented => "Implemented",
            UseCaseStatus::OnHold => "On Hold",
        }
    }

    /// Exact match against the stored status strings.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Discovery" => Some(UseCaseStatus::Discovery),
            "Backlog" => Some(UseCaseStatus::Backlog),
            "In-flight" => Some(UseCaseStatus::InFlight),
            "Implemented" => Some(UseCaseStatus::Implemented),
            "On Hold" => Some(UseCaseStatus::OnHold),
            _ => None,
        }
    }

    /// Statuses that count as "active" and therefore trigger the activation
    /// guard and the regression monitor.
    pub fn is_activation_status(self) -> bool {
        matches!(self, UseCaseStatus::InFlight | UseCaseStatus::Implemented)
    }
}

impl fmt::Display for UseCaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification bucket from Impact/Effort vs. the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    #[serde(rename = "Quick Win")]
    QuickWin,
    #[serde(rename = "Strategic Bet")]
    StrategicBet,
    Experimental,
    Watchlist,
}

impl Quadrant {
    pub fn label(self) -> &'static str {
        match self {
            Quadrant::QuickWin => "Quick Win",
            Quadrant::StrategicBet => "Strategic Bet",
            Quadrant::Experimental => "Experimental",
            Quadrant::Watchlist => "Watchlist",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Quick Win" => Some(Quadrant::QuickWin),
            "Strategic Bet" => Some(Quadrant::StrategicBet),
            "Experimental" => Some(Quadrant::Experimental),
            "Watchlist" => Some(Quadrant::Watchlist),
            _ => None,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three governance gates. Serialized as their display labels, which is
/// what API error bodies and audit logs carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateKind {
    #[serde(rename = "Operating Model")]
    OperatingModel,
    #[serde(rename = "Intake & Prioritization")]
    IntakePrioritization,
    #[serde(rename = "Responsible AI")]
    ResponsibleAi,
}

/// Evaluation and blame order is fixed. Later gates only report `passed` when
/// every earlier gate's checklist is complete, and the regression monitor
/// blames the first gate in this order whose result flipped. Reordering this
/// constant changes which gate gets blamed.
pub const GATE_ORDER: [GateKind; 3] = [
    GateKind::OperatingModel,
    GateKind::IntakePrioritization,
    GateKind::ResponsibleAi,
];

impl GateKind {
    pub fn label(self) -> &'static str {
        match self {
            GateKind::OperatingModel => "Operating Model",
            GateKind::IntakePrioritization => "Intake & Prioritization",
            GateKind::ResponsibleAi => "Responsible AI",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate governance progress ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceStatus {
    None,
    Pending,
    InReview,
    Complete,
}

/// Why an activation was blocked. Serialized form is the API error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    #[serde(rename = "GOVERNANCE_INCOMPLETE")]
    GovernanceIncomplete,
}

/// Why a deactivation was recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegressionReason {
    #[serde(rename = "GOVERNANCE_REGRESSION")]
    GovernanceRegression,
}
