//! Engine run metrics.
//!
//! The intended usage is:
//!
//! - `Pipeline::run` for normal operation.
//! - `Pipeline::run_with_metrics` for profiling, the CLI trace, and debugging
//!   which rule produced which rewrite.
//!
//! `RuleMetrics::output` snapshots the string after every rule that changed
//! it. It is only filled by `run_with_metrics`.

use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Pipeline::run_with_metrics`](super::Pipeline::run_with_metrics).
    pub total: Duration,
    /// One entry per rule, in pipeline order.
    pub rules: Vec<RuleMetrics>,
}

impl RunMetrics {
    /// Names of the rules that passed trigger gating.
    pub fn active_rules(&self) -> Vec<&'static str> {
        self.rules.iter().filter(|r| r.active).map(|r| r.rule).collect()
    }

    /// Names of the rules that changed the string.
    pub fn changed_rules(&self) -> Vec<&'static str> {
        self.rules.iter().filter(|r| r.changed).map(|r| r.rule).collect()
    }
}

/// Outcome of one rule within a run.
#[derive(Debug, Clone)]
pub struct RuleMetrics {
    pub rule: &'static str,
    /// The trigger scan allowed the rule to run.
    pub active: bool,
    /// The rule produced a different string.
    pub changed: bool,
    pub duration: Duration,
    /// The string after this rule, when it changed and outputs were recorded.
    pub output: Option<String>,
}

/// Pipeline output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub output: String,
    pub metrics: RunMetrics,
}
