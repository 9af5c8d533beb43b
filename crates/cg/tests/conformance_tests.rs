//! CLI integration tests via the JSON interface.

use std::io::Write;
use std::process::Stdio;

use test_helpers::{cg_bin, cg_json, cg_stdout};

// ── Assessment ──────────────────────────────────────────────────

#[test]
fn assess_reports_scores_quadrant_and_size() {
    let v = cg_json(&["assess", "tests/fixtures/complete.json", "--json"], 0);
    assert!((v["impact"].as_f64().unwrap() - 3.6).abs() < 1e-9);
    assert!((v["effort"].as_f64().unwrap() - 3.0).abs() < 1e-9);
    assert_eq!(v["impactOverridden"], false);
    assert_eq!(v["quadrant"], "Strategic Bet");
    assert_eq!(v["size"]["size"], "M");
    assert!(v["size"]["costMin"].as_i64().unwrap() > 0);
}

#[test]
fn assess_reports_annual_benefit_band() {
    let v = cg_json(&["assess", "tests/fixtures/complete.json", "--json"], 0);
    // M multiplier 250k x impact 3.6, +/-20%, rounded to thousands
    assert_eq!(v["annualBenefit"]["benefitMin"], 720_000);
    assert_eq!(v["annualBenefit"]["benefitMax"], 1_080_000);
}

#[test]
fn assess_reads_record_from_stdin() {
    let record = std::fs::read("tests/fixtures/complete.json").unwrap();
    let mut child = cg_bin()
        .args(["assess", "-", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run cg");
    child.stdin.as_mut().unwrap().write_all(&record).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["quadrant"], "Strategic Bet");
}

// ── Governance gates ────────────────────────────────────────────

#[test]
fn govern_passes_complete_record() {
    let v = cg_json(&["govern", "tests/fixtures/complete.json", "--json"], 0);
    assert_eq!(v["allPassed"], true);
    assert_eq!(v["canActivate"], true);
    assert_eq!(v["overallProgress"], 100);
    assert_eq!(v["status"], "complete");
}

#[test]
fn govern_applies_sequential_rule() {
    // Owner is missing: only the first gate's own checklist fails, but every
    // gate must report blocked.
    let v = cg_json(&["govern", "tests/fixtures/incomplete.json", "--json"], 1);
    let gates = v["gates"].as_array().unwrap();
    assert_eq!(gates.len(), 3);
    assert_eq!(gates[0]["gate"], "Operating Model");
    assert_eq!(gates[0]["passed"], false);
    assert_eq!(gates[1]["checklistPassed"], true);
    assert_eq!(gates[1]["passed"], false);
    assert_eq!(gates[2]["checklistPassed"], true);
    assert_eq!(gates[2]["passed"], false);
    assert_eq!(v["overallProgress"], 89);
    assert_eq!(v["status"], "pending");
}

// ── Activation guard ────────────────────────────────────────────

#[test]
fn activate_permits_governed_record() {
    let v = cg_json(
        &["activate", "tests/fixtures/complete.json", "--to", "In-flight", "--json"],
        0,
    );
    assert_eq!(v["blocked"], false);
}

#[test]
fn activate_blocks_ungoverned_record() {
    let v = cg_json(
        &["activate", "tests/fixtures/incomplete.json", "--to", "In-flight", "--json"],
        1,
    );
    assert_eq!(v["blocked"], true);
    assert_eq!(v["reason"], "GOVERNANCE_INCOMPLETE");
    assert!(v["governance"]["gates"].as_array().unwrap().len() == 3);
}

#[test]
fn activate_honors_legacy_bypass() {
    let v = cg_json(
        &["activate", "tests/fixtures/legacy.json", "--to", "In-flight", "--json"],
        0,
    );
    assert_eq!(v["blocked"], false);
    assert!(v.get("governance").is_none());
}

#[test]
fn activate_ignores_non_activation_target() {
    let v = cg_json(
        &["activate", "tests/fixtures/incomplete.json", "--to", "On Hold", "--json"],
        0,
    );
    assert_eq!(v["blocked"], false);
}

// ── Regression monitor ──────────────────────────────────────────

#[test]
fn regress_blames_first_flipped_gate() {
    let v = cg_json(
        &[
            "regress",
            "tests/fixtures/active.json",
            "--updates",
            "tests/fixtures/updates_clear_function.json",
            "--json",
        ],
        1,
    );
    assert_eq!(v["shouldDeactivate"], true);
    assert_eq!(v["reason"], "GOVERNANCE_REGRESSION");
    assert_eq!(v["regressedGate"], "Operating Model");
    assert_eq!(v["isLegacyUseCase"], false);
}

#[test]
fn regress_keeps_legacy_record_active() {
    let v = cg_json(
        &[
            "regress",
            "tests/fixtures/legacy_active.json",
            "--updates",
            "tests/fixtures/updates_clear_function.json",
            "--json",
        ],
        0,
    );
    assert_eq!(v["shouldDeactivate"], false);
    assert_eq!(v["isLegacyUseCase"], true);
    assert_eq!(v["reason"], "GOVERNANCE_REGRESSION");
}

// ── Phase transitions ───────────────────────────────────────────

#[test]
fn phase_requires_justification_for_pending_exits() {
    let v = cg_json(
        &["phase", "tests/fixtures/ideation.json", "--to", "In-flight", "--json"],
        1,
    );
    assert_eq!(v["allowed"], false);
    assert_eq!(v["requiresJustification"], true);
    assert_eq!(v["currentPhase"], "ideation");
    assert_eq!(v["targetPhase"], "delivery");
    assert_eq!(v["pendingExitRequirements"][0], "KPI Selection");
}

#[test]
fn phase_justification_overrides_pending_exits() {
    let v = cg_json(
        &[
            "phase",
            "tests/fixtures/ideation.json",
            "--to",
            "In-flight",
            "--justify",
            "approved by steering committee",
            "--json",
        ],
        0,
    );
    assert_eq!(v["allowed"], true);
    assert_eq!(v["pendingExitRequirements"][0], "KPI Selection");
}

#[test]
fn phase_met_exits_need_no_justification() {
    // complete.json carries selected KPIs
    let v = cg_json(
        &["phase", "tests/fixtures/complete.json", "--to", "In-flight", "--json"],
        0,
    );
    assert_eq!(v["allowed"], true);
    assert_eq!(v["requiresJustification"], false);
}

// ── Validation ──────────────────────────────────────────────────

#[test]
fn check_passes_complete_record() {
    let v = cg_json(&["check", "tests/fixtures/complete.json", "--strict", "--json"], 0);
    assert_eq!(v["pass"], true);
}

#[test]
fn check_rejects_out_of_range_lever() {
    let v = cg_json(&["check", "tests/fixtures/invalid.json", "--json"], 1);
    assert_eq!(v["pass"], false);
    assert_eq!(v["errors"][0]["code"], "E001");
}

// ── Defaults ────────────────────────────────────────────────────

#[test]
fn defaults_sizing_prints_full_config() {
    let out = cg_stdout(&["defaults", "sizing"]);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["sizes"][0]["name"], "XS");
    assert_eq!(v["overheadMultiplier"], 1.2);
}

#[test]
fn defaults_weights_sum_to_hundred_per_axis() {
    let out = cg_stdout(&["defaults", "weights"]);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    let sum: f64 = v["businessValue"]
        .as_object()
        .unwrap()
        .values()
        .filter_map(serde_json::Value::as_f64)
        .sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

#[test]
fn defaults_tom_lists_three_phases() {
    let out = cg_stdout(&["defaults", "tom"]);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    let phases = v["phases"].as_array().unwrap();
    assert_eq!(phases.len(), 3);
    assert_eq!(phases[0]["id"], "ideation");
}
