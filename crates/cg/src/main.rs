#![forbid(unsafe_code)]

use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

use casegate_core::spec::scoring::ScoringWeights;
use casegate_core::spec::sizing::TShirtSizingConfig;
use casegate_core::spec::tom::TomConfig;
use casegate_core::usecase::UseCase;
use casegate_engine::assess::Assessor;
use casegate_engine::enforcement::activation::check_activation_allowed;
use casegate_engine::enforcement::regression::check_governance_regression;
use casegate_engine::gates::evaluator::calculate_governance_status;
use casegate_engine::phase::check_phase_transition_requirements;

#[derive(Parser)]
#[command(
    name = "cg",
    version,
    about = "Score, classify, and govern AI use-case records. Unix-friendly."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Score a record: impact, effort, quadrant, T-shirt size, benefit.
    Assess {
        /// Path to record .json (or "-" / omit for stdin).
        #[arg(default_value = "-")]
        file: String,

        /// Scoring weights .json (built-in defaults if omitted).
        #[arg(long)]
        weights: Option<String>,

        /// Sizing config .json (built-in defaults if omitted).
        #[arg(long)]
        sizing: Option<String>,

        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },

    /// Evaluate the three governance gates in order.
    Govern {
        /// Path to record .json (or "-" / omit for stdin).
        #[arg(default_value = "-")]
        file: String,

        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check whether a status change into an active state is permitted.
    Activate {
        /// Path to record .json (or "-" / omit for stdin).
        #[arg(default_value = "-")]
        file: String,

        /// Proposed target status.
        #[arg(long)]
        to: String,

        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },

    /// Re-run governance against a proposed field update on an active record.
    Regress {
        /// Path to record .json (or "-" / omit for stdin).
        #[arg(default_value = "-")]
        file: String,

        /// Path to a JSON object of proposed field updates.
        #[arg(long)]
        updates: String,

        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },

    /// Gate a status change on the operating-model phase table.
    Phase {
        /// Path to record .json (or "-" / omit for stdin).
        #[arg(default_value = "-")]
        file: String,

        /// Proposed target status.
        #[arg(long)]
        to: String,

        /// Current status (defaults to the record's own).
        #[arg(long)]
        from: Option<String>,

        /// Justification overriding pending exit requirements.
        #[arg(long)]
        justify: Option<String>,

        /// Phase table .json (built-in defaults if omitted).
        #[arg(long)]
        tom: Option<String>,

        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate a record: schema plus lint checks.
    Check {
        /// Path to record .json file.
        file: String,

        /// Output structured JSON report.
        #[arg(long)]
        json: bool,

        /// Fail on warnings (not just errors).
        #[arg(long)]
        strict: bool,
    },

    /// Print a built-in default configuration.
    Defaults {
        /// Which config: weights, sizing, tom.
        #[arg(value_parser = ["weights", "sizing", "tom"])]
        kind: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Assess {
            file,
            weights,
            sizing,
            json,
        } => cmd_assess(&file, weights.as_deref(), sizing.as_deref(), json),

        Cmd::Govern { file, json } => cmd_govern(&file, json),

        Cmd::Activate { file, to, json } => cmd_activate(&file, &to, json),

        Cmd::Regress {
            file,
            updates,
            json,
        } => cmd_regress(&file, &updates, json),

        Cmd::Phase {
            file,
            to,
            from,
            justify,
            tom,
            json,
        } => cmd_phase(&file, &to, from.as_deref(), justify.as_deref(), tom.as_deref(), json),

        Cmd::Check { file, json, strict } => cmd_check(&file, json, strict),

        Cmd::Defaults { kind } => cmd_defaults(&kind),
    }
}

fn read_value(file: &str) -> Result<serde_json::Value> {
    let content = if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("cannot read {file}"))?
    };
    serde_json::from_str(&content).with_context(|| format!("{file}: invalid JSON"))
}

fn read_record(file: &str) -> Result<UseCase> {
    let data = read_value(file)?;
    serde_json::from_value(data).with_context(|| format!("{file}: not a use-case record"))
}

fn load_config<T: DeserializeOwned + Default>(path: Option<&str>) -> Result<T> {
    match path {
        Some(p) => {
            let content =
                std::fs::read_to_string(p).with_context(|| format!("cannot read {p}"))?;
            serde_json::from_str(&content).with_context(|| format!("{p}: invalid config"))
        }
        None => Ok(T::default()),
    }
}

fn cmd_assess(
    file: &str,
    weights_path: Option<&str>,
    sizing_path: Option<&str>,
    json_out: bool,
) -> Result<()> {
    let uc = read_record(file)?;
    let weights: ScoringWeights = load_config(weights_path)?;
    let sizing: TShirtSizingConfig = load_config(sizing_path)?;
    let assessment = Assessor::new(weights, sizing).assess(&uc);

    if json_out {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    let mark = |overridden: bool| if overridden { " (manual)" } else { "" };
    eprintln!(
        "  impact    {:.2}{}",
        assessment.impact,
        mark(assessment.impact_overridden)
    );
    eprintln!(
        "  effort    {:.2}{}",
        assessment.effort,
        mark(assessment.effort_overridden)
    );
    eprintln!(
        "  quadrant  {}{}",
        assessment.quadrant.label(),
        mark(assessment.quadrant_overridden)
    );
    if let Some(name) = &assessment.size.size {
        eprintln!("  size      {name}");
        if let (Some(lo), Some(hi)) = (assessment.size.weeks_min, assessment.size.weeks_max) {
            eprintln!("  duration  {lo}-{hi} weeks");
        }
        if let (Some(lo), Some(hi)) = (assessment.size.cost_min, assessment.size.cost_max) {
            eprintln!("  cost      {lo} - {hi} GBP");
        }
    }
    if let Some(err) = &assessment.size.error {
        eprintln!("  FAIL sizing: {err}");
    }
    for w in &assessment.size.warnings {
        eprintln!("  warn      {w}");
    }
    if let Some(benefit) = &assessment.annual_benefit {
        if let (Some(lo), Some(hi)) = (benefit.benefit_min, benefit.benefit_max) {
            eprintln!("  benefit   {lo} - {hi} GBP/yr");
        }
    }
    Ok(())
}

fn cmd_govern(file: &str, json_out: bool) -> Result<()> {
    let uc = read_record(file)?;
    let check = calculate_governance_status(&uc);

    if json_out {
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else {
        for gate in &check.gates {
            if gate.passed {
                eprintln!("  ok   {} ({}%)", gate.gate.label(), gate.progress);
            } else {
                eprintln!("  FAIL {} ({}%)", gate.gate.label(), gate.progress);
            }
            for issue in &gate.issues {
                eprintln!("       missing: {issue}");
            }
        }
        eprintln!("  overall {}% ({:?})", check.overall_progress, check.status);
    }

    if !check.all_passed {
        bail!("governance incomplete for {file}");
    }
    Ok(())
}

fn cmd_activate(file: &str, target: &str, json_out: bool) -> Result<()> {
    let uc = read_record(file)?;
    let decision = check_activation_allowed(&uc, target);

    if json_out {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else if decision.blocked {
        eprintln!("  FAIL activation to '{target}' blocked");
        if let Some(governance) = &decision.governance {
            for gate in governance.gates.iter().filter(|g| !g.passed) {
                for issue in &gate.issues {
                    eprintln!("       {}: {issue}", gate.gate.label());
                }
            }
        }
    } else {
        eprintln!("  ok   activation to '{target}' permitted");
    }

    if decision.blocked {
        bail!("activation blocked for {file}");
    }
    Ok(())
}

fn cmd_regress(file: &str, updates_path: &str, json_out: bool) -> Result<()> {
    let uc = read_record(file)?;
    let updates = match read_value(updates_path)? {
        serde_json::Value::Object(map) => map,
        _ => bail!("{updates_path}: updates must be a JSON object"),
    };
    let verdict = check_governance_regression(&uc, &updates)?;

    if json_out {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else if verdict.should_deactivate {
        eprintln!("  FAIL update regresses governance; record would be deactivated");
    } else if verdict.reason.is_some() {
        eprintln!("  warn update regresses governance (legacy record, kept active)");
    } else {
        eprintln!("  ok   update preserves governance");
    }

    if verdict.should_deactivate {
        bail!("governance regression for {file}");
    }
    Ok(())
}

fn cmd_phase(
    file: &str,
    target: &str,
    from: Option<&str>,
    justify: Option<&str>,
    tom_path: Option<&str>,
    json_out: bool,
) -> Result<()> {
    let uc = read_record(file)?;
    let tom: TomConfig = load_config(tom_path)?;
    let current = from.map(str::to_string).or_else(|| uc.use_case_status.clone());
    let check =
        check_phase_transition_requirements(&uc, current.as_deref(), target, &tom, justify, None);

    if json_out {
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else {
        eprintln!(
            "  phase {} -> {}",
            check.current_phase.as_deref().unwrap_or("(none)"),
            check.target_phase.as_deref().unwrap_or("(none)")
        );
        for pending in &check.pending_exit_requirements {
            eprintln!("  pending: {pending}");
        }
        if check.allowed {
            eprintln!("  ok   transition to '{target}' permitted");
        } else {
            eprintln!("  FAIL transition to '{target}' requires justification");
        }
    }

    if !check.allowed {
        bail!("phase transition blocked for {file}");
    }
    Ok(())
}

fn cmd_check(file: &str, json_out: bool, strict: bool) -> Result<()> {
    let data = read_value(file)?;
    let report = casegate_core::schema::check(&data, file, strict);

    if json_out {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if report.pass {
            eprintln!("  ok  {file}");
        } else {
            eprintln!("  FAIL {file}");
        }
        for e in &report.errors {
            eprintln!(
                "  error {}: {} {}",
                e.code,
                e.message,
                e.path.as_deref().unwrap_or("")
            );
        }
        for w in &report.warnings {
            eprintln!(
                "  warn  {}: {} {}",
                w.code,
                w.message,
                w.path.as_deref().unwrap_or("")
            );
        }
    }

    if !report.pass {
        bail!("check failed for {file}");
    }
    Ok(())
}

fn cmd_defaults(kind: &str) -> Result<()> {
    let value = match kind {
        "weights" => serde_json::to_value(ScoringWeights::default())?,
        "sizing" => serde_json::to_value(TShirtSizingConfig::default())?,
        "tom" => serde_json::to_value(TomConfig::default())?,
        _ => bail!("unknown config '{kind}' (use: weights, sizing, tom)"),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
