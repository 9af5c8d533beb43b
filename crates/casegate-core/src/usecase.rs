use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::types::{TriState, UseCaseStatus};

/// Snapshot of a candidate AI use case, as supplied by the persistence layer.
///
/// Field names mirror the storage schema (camelCase). The engine borrows this
/// record for the duration of one evaluation and never writes back; proposed
/// changes go through [`UseCase::with_updates`], which builds a fresh copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UseCase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    // Business-value levers, 1-5. Unset means "not yet assessed".
    pub revenue_impact: Option<u8>,
    pub cost_savings: Option<u8>,
    pub risk_reduction: Option<u8>,
    pub broker_partner_experience: Option<u8>,
    pub strategic_fit: Option<u8>,

    // Feasibility levers, 1-5.
    pub data_readiness: Option<u8>,
    pub technical_complexity: Option<u8>,
    pub integration_effort: Option<u8>,
    pub model_maturity: Option<u8>,
    pub adoption_readiness: Option<u8>,

    pub use_case_status: Option<String>,
    pub primary_business_owner: Option<String>,
    pub business_function: Option<String>,

    // Responsible AI questionnaire.
    pub explainability_required: TriState,
    pub human_accountability: TriState,
    pub data_outside_uk_eu: TriState,
    pub third_party_model: TriState,
    pub customer_harm_risk: Option<String>,

    // Manual overrides set by assessors in the UI.
    pub manual_impact_score: Option<f64>,
    pub manual_effort_score: Option<f64>,
    pub manual_quadrant: Option<String>,

    pub legacy_activation_flag: TriState,
    pub created_at: Option<DateTime<Utc>>,

    // Operating-model phase signals.
    pub deployment_status: Option<String>,
    pub tom_phase_override: Option<String>,
    pub selected_kpis: Option<Vec<String>>,
    pub independence_score: Option<f64>,
    pub benefits_baseline: TriState,
}

impl UseCase {
    /// Human-readable lever labels, value levers first, matching [`UseCase::levers`].
    pub const LEVER_LABELS: [&'static str; 10] = [
        "Revenue Impact",
        "Cost Savings",
        "Risk Reduction",
        "Broker & Partner Experience",
        "Strategic Fit",
        "Data Readiness",
        "Technical Complexity",
        "Integration Effort",
        "Model Maturity",
        "Adoption Readiness",
    ];

    pub fn value_levers(&self) -> [Option<u8>; 5] {
        [
            self.revenue_impact,
            self.cost_savings,
            self.risk_reduction,
            self.broker_partner_experience,
            self.strategic_fit,
        ]
    }

    pub fn effort_levers(&self) -> [Option<u8>; 5] {
        [
            self.data_readiness,
            self.technical_complexity,
            self.integration_effort,
            self.model_maturity,
            self.adoption_readiness,
        ]
    }

    pub fn levers(&self) -> [Option<u8>; 10] {
        let v = self.value_levers();
        let e = self.effort_levers();
        [v[0], v[1], v[2], v[3], v[4], e[0], e[1], e[2], e[3], e[4]]
    }

    pub fn status(&self) -> Option<UseCaseStatus> {
        self.use_case_status.as_deref().and_then(UseCaseStatus::parse)
    }

    /// Shallow-merge proposed field updates (storage-schema keys) onto this
    /// record and return the merged copy. A value that cannot round-trip into
    /// the record shape is a caller programming error.
    pub fn with_updates(
        &self,
        updates: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<UseCase, EngineError> {
        let mut value =
            serde_json::to_value(self).map_err(|e| EngineError::InvalidRecord(e.to_string()))?;
        if let Some(obj) = value.as_object_mut() {
            for (k, v) in updates {
                obj.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(value).map_err(|e| EngineError::InvalidUpdate(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UseCase {
        serde_json::from_str(
            r#"{
                "name": "Claims triage copilot",
                "useCaseStatus": "Backlog",
                "revenueImpact": 4,
                "costSavings": 3,
                "explainabilityRequired": "true",
                "humanAccountability": false,
                "legacyActivationFlag": "true",
                "createdAt": "2026-02-01T09:00:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn camel_case_fields_map_onto_record() {
        let uc = record();
        assert_eq!(uc.use_case_status.as_deref(), Some("Backlog"));
        assert_eq!(uc.revenue_impact, Some(4));
        assert_eq!(uc.explainability_required, TriState::True);
        assert_eq!(uc.human_accountability, TriState::False);
        assert_eq!(uc.legacy_activation_flag, TriState::True);
        assert_eq!(uc.data_outside_uk_eu, TriState::Unset);
    }

    #[test]
    fn levers_are_value_then_effort() {
        let uc = record();
        let levers = uc.levers();
        assert_eq!(levers[0], Some(4));
        assert_eq!(levers[1], Some(3));
        assert_eq!(levers[5], None);
        assert_eq!(UseCase::LEVER_LABELS[5], "Data Readiness");
    }

    #[test]
    fn with_updates_is_shallow_and_nondestructive() {
        let uc = record();
        let mut updates = serde_json::Map::new();
        updates.insert("businessFunction".into(), serde_json::json!("Claims"));
        updates.insert("revenueImpact".into(), serde_json::json!(5));

        let merged = uc.with_updates(&updates).unwrap();
        assert_eq!(merged.business_function.as_deref(), Some("Claims"));
        assert_eq!(merged.revenue_impact, Some(5));
        // original untouched
        assert_eq!(uc.business_function, None);
        assert_eq!(uc.revenue_impact, Some(4));
    }

    #[test]
    fn with_updates_rejects_type_mismatch() {
        let uc = record();
        let mut updates = serde_json::Map::new();
        updates.insert("revenueImpact".into(), serde_json::json!("lots"));
        assert!(uc.with_updates(&updates).is_err());
    }
}
