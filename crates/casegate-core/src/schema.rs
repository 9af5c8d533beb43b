use anyhow::{bail, Context, Result};
use jsonschema::Validator;
use serde_json::Value;

use crate::errors::{CheckIssue, CheckReport};
use crate::types::{enforcement_cutoff, Quadrant, UseCaseStatus};

const USECASE_SCHEMA: &str = include_str!("../schema/usecase.schema.json");

const KNOWN_STATUSES: [&str; 5] = ["Discovery", "Backlog", "In-flight", "Implemented", "On Hold"];

/// Create a validator for the use-case record schema.
pub fn validator() -> Result<Validator> {
    let schema: Value =
        serde_json::from_str(USECASE_SCHEMA).context("embedded schema is invalid JSON")?;
    Validator::new(&schema).map_err(|e| anyhow::anyhow!("schema compilation failed: {e}"))
}

/// Validate a single record value against the schema.
pub fn validate(data: &Value) -> Result<()> {
    let v = validator()?;
    if v.is_valid(data) {
        return Ok(());
    }
    let mut msgs: Vec<String> = Vec::new();
    for error in v.iter_errors(data) {
        let path = error.instance_path.to_string();
        let loc = if path.is_empty() {
            "(root)".into()
        } else {
            path
        };
        msgs.push(format!("  {loc}: {error}"));
    }
    bail!("validation failed:\n{}", msgs.join("\n"));
}

/// Full check producing a structured report (for `cg check --json`).
pub fn check(data: &Value, file: &str, strict: bool) -> CheckReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Schema validation
    if let Ok(v) = validator() {
        for error in v.iter_errors(data) {
            let path = error.instance_path.to_string();
            errors.push(CheckIssue {
                code: "E001".to_string(),
                check: "schema".to_string(),
                message: error.to_string(),
                path: Some(if path.is_empty() {
                    "$(root)".to_string()
                } else {
                    format!("${path}")
                }),
            });
        }
    }

    lint_checks(data, &mut warnings);

    let pass = errors.is_empty() && (!strict || warnings.is_empty());
    CheckReport {
        file: file.to_string(),
        pass,
        errors,
        warnings,
    }
}

fn lint_checks(data: &Value, warnings: &mut Vec<CheckIssue>) {
    // W001: status value outside the known lifecycle set
    if let Some(status) = data.get("useCaseStatus").and_then(Value::as_str) {
        if !status.trim().is_empty() && !KNOWN_STATUSES.contains(&status) {
            warnings.push(CheckIssue {
                code: "W001".to_string(),
                check: "lint".to_string(),
                message: format!(
                    "unknown useCaseStatus '{status}' (known: {})",
                    KNOWN_STATUSES.join(", ")
                ),
                path: Some("$.useCaseStatus".to_string()),
            });
        }
    }

    // W002: legacy flag on a record created after the enforcement cutoff
    let legacy = match data.get("legacyActivationFlag") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    };
    if legacy {
        let post_cutoff = data
            .get("createdAt")
            .and_then(Value::as_str)
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .is_some_and(|t| t.with_timezone(&chrono::Utc) >= enforcement_cutoff());
        if post_cutoff {
            warnings.push(CheckIssue {
                code: "W002".to_string(),
                check: "lint".to_string(),
                message: "legacyActivationFlag set on a record created after the enforcement cutoff"
                    .to_string(),
                path: Some("$.legacyActivationFlag".to_string()),
            });
        }
    }

    // W003: manual quadrant label the classifier does not know
    if let Some(q) = data.get("manualQuadrant").and_then(Value::as_str) {
        if !q.trim().is_empty() && Quadrant::parse(q).is_none() {
            warnings.push(CheckIssue {
                code: "W003".to_string(),
                check: "lint".to_string(),
                message: format!("unknown manualQuadrant '{q}'"),
                path: Some("$.manualQuadrant".to_string()),
            });
        }
    }

    // W004: status parses but with different casing than stored form
    if let Some(status) = data.get("useCaseStatus").and_then(Value::as_str) {
        if UseCaseStatus::parse(status).is_none()
            && KNOWN_STATUSES
                .iter()
                .any(|k| k.eq_ignore_ascii_case(status))
        {
            warnings.push(CheckIssue {
                code: "W004".to_string(),
                check: "lint".to_string(),
                message: format!("useCaseStatus '{status}' differs from stored casing"),
                path: Some("$.useCaseStatus".to_string()),
            });
        }
    }
}
