use chrono::{DateTime, Utc};
use serde::Serialize;

/// One timed engine evaluation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalSample {
    pub component: String,
    pub duration_micros: u64,
    pub recorded_at: DateTime<Utc>,
}

/// Receives evaluation timing samples.
///
/// Purely informational: implementations must not affect evaluation results,
/// and callers must not rely on samples being retained. Injected at the entry
/// point rather than living in a process-wide singleton.
pub trait EvalCollector: Send + Sync {
    fn record(&self, sample: EvalSample);
}
