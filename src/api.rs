use crate::engine::{Pipeline, RunResult};
use crate::Config;
use once_cell::sync::Lazy;
use std::time::Duration;

static DEFAULT_PIPELINE: Lazy<Pipeline> = Lazy::new(|| Pipeline::new(Config::default()));

/// What one rule did during a verbose run.
#[derive(Debug, Clone)]
pub struct RuleTrace {
    pub rule: String,
    /// The trigger scan let the rule run.
    pub active: bool,
    pub changed: bool,
    pub duration: Duration,
    /// Text after the rule, present only when it changed something.
    pub output: Option<String>,
}

/// Additional details returned by [`normalize_verbose`] and [`normalize_verbose_with`].
///
/// Meant for debugging and profiling without dumping internal state.
#[derive(Debug, Clone)]
pub struct NormalizeDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// One entry per rule, in pipeline order.
    pub rules: Vec<RuleTrace>,
    /// Names of rules that were active for this input.
    pub active_rules: Vec<String>,
}

/// Result from [`normalize_verbose`] and [`normalize_verbose_with`].
#[derive(Debug, Clone)]
pub struct NormalizeResultVerbose {
    pub text: String,
    pub output: String,
    pub elapsed: Duration,
    pub details: NormalizeDetails,
}

/// Normalize `text` with the built-in configuration.
///
/// # Example
/// ```
/// use texmend::normalize;
///
/// assert_eq!(normalize(r"\bar{}"), r"\bar{\phantom{x}}");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    DEFAULT_PIPELINE.run(text)
}

/// Normalize `text` with a caller-supplied configuration.
///
/// Builds a fresh [`Pipeline`]; callers normalizing many strings with the
/// same configuration should keep a `Pipeline` around instead.
pub fn normalize_with(text: &str, config: &Config) -> String {
    Pipeline::new(config.clone()).run(text)
}

pub fn normalize_verbose(text: &str) -> NormalizeResultVerbose {
    verbose(text, DEFAULT_PIPELINE.run_with_metrics(text))
}

/// Normalize `text` with `config` and return a per-rule trace.
///
/// The plain [`normalize_with`] path does not allocate these traces.
pub fn normalize_verbose_with(text: &str, config: &Config) -> NormalizeResultVerbose {
    verbose(text, Pipeline::new(config.clone()).run_with_metrics(text))
}

fn verbose(text: &str, run: RunResult) -> NormalizeResultVerbose {
    let active_rules = run.metrics.active_rules().into_iter().map(str::to_string).collect();
    let rules = run
        .metrics
        .rules
        .into_iter()
        .map(|r| RuleTrace {
            rule: r.rule.to_string(),
            active: r.active,
            changed: r.changed,
            duration: r.duration,
            output: r.output,
        })
        .collect();

    let total = run.metrics.total;
    NormalizeResultVerbose {
        text: text.to_string(),
        output: run.output,
        elapsed: total,
        details: NormalizeDetails { total, rules, active_rules },
    }
}
