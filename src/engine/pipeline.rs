//! Ordered rewrite pipeline.
//!
//! A [`Pipeline`] owns an immutable [`Config`] and the compiled rule list. A
//! run threads one string through every rule in order:
//!
//! ```text
//! input ── TriggerInfo::scan ──> rule 0 ──> rule 1 ──> ... ──> output
//!                  ^                 │
//!                  └── rescan ───────┘ (only when a rule changed the string)
//! ```
//!
//! Each rule is a total function: it either returns a rewritten string or
//! `None` for "no change". Malformed markup never aborts a run; the rules
//! leave what they cannot parse untouched.
//!
//! ## Debugging
//!
//! Rule activation is reported through `tracing` at `trace` level and every
//! rewrite at `debug` level (`RUST_LOG=texmend=debug`).

use super::compiled_rules::CompiledRules;
use super::metrics::{RuleMetrics, RunMetrics, RunResult};
use super::trigger::TriggerInfo;
use crate::{Config, Rule};
use std::time::Instant;
use tracing::{debug, trace};

/// Normalizes markup strings with a fixed configuration.
///
/// Build it once and reuse it; `run` takes `&self` and the type is `Send + Sync`.
///
/// ```
/// use texmend::{Config, Pipeline};
///
/// let pipeline = Pipeline::new(Config::default());
/// assert_eq!(pipeline.run(r"\tfrac{1}{2}"), r"\frac{1}{2}");
/// ```
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    compiled: CompiledRules,
}

impl Pipeline {
    /// Create a pipeline running the default rule list with `config`.
    pub fn new(config: Config) -> Self {
        Self::with_rules(config, crate::rules::get())
    }

    pub(crate) fn with_rules(config: Config, rules: Vec<Rule>) -> Self {
        Pipeline { config, compiled: CompiledRules::new(rules) }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rule names in execution order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.compiled.rules.iter().map(|r| r.name).collect()
    }

    /// Normalize `input`. Empty input yields an empty string.
    pub fn run(&self, input: &str) -> String {
        self.execute(input, false).output
    }

    /// Normalize `input` and report what every rule did.
    pub fn run_with_metrics(&self, input: &str) -> RunResult {
        self.execute(input, true)
    }

    fn execute(&self, input: &str, record_outputs: bool) -> RunResult {
        let total_start = Instant::now();
        let mut current = input.to_string();
        let mut trigger = TriggerInfo::scan(&current);
        trace!(buckets = ?trigger.buckets, phrases = trigger.phrases.len(), "trigger scan");

        let mut rules = Vec::with_capacity(self.compiled.rules.len());
        for (id, rule) in self.compiled.rules.iter().enumerate() {
            let start = Instant::now();
            let active = self.compiled.is_active(id, &trigger);
            let mut changed = false;

            if active {
                if let Some(next) = (rule.apply)(&current, &self.config) {
                    if next != current {
                        debug!(rule = rule.name, before = %current, after = %next, "rewrite");
                        current = next;
                        changed = true;
                        trigger = TriggerInfo::scan(&current);
                    }
                }
            } else {
                trace!(rule = rule.name, "skipped by trigger scan");
            }

            rules.push(RuleMetrics {
                rule: rule.name,
                active,
                changed,
                duration: start.elapsed(),
                output: (changed && record_outputs).then(|| current.clone()),
            });
        }

        RunResult { output: current, metrics: RunMetrics { total: total_start.elapsed(), rules } }
    }
}
