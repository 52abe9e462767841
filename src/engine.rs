//! Rewrite engine.
//!
//! This module is the entry point for running rules. The rules themselves live
//! under `src/rules/**`; the structural helpers they share live in
//! `src/markup/**`.
//!
//! ## How the parts work together
//!
//! ```text
//! rules::get()  ──┐
//!                 │  CompiledRules::new           (compiled_rules.rs)
//!                 └───────────────┬──────────────
//!                                 │
//! input ── TriggerInfo::scan ─────┼─ is the rule plausible? (buckets + phrases)
//!         (trigger.rs)            │
//!                                 v
//!                       Pipeline::run (pipeline.rs)
//!                         - apply rules in order
//!                         - rescan after each change
//!                                 │
//!                                 v
//!                        String (+ RunMetrics)
//! ```
//!
//! Unlike a fixpoint engine, every rule runs at most once per call and in a
//! fixed order. Rules that must handle nesting (operator operands, matched
//! environments) do so within their single pass.
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: `BucketMask` plus per-rule trigger metadata.
//! - `trigger.rs`: scans the current string for buckets and command names.
//! - `pipeline.rs`: the ordered run loop and its `tracing` events.
//! - `metrics.rs`: optional timing and per-rule trace data.
//!
//! ## Adding new rules
//!
//! - Add the rule under `src/rules/**` with the `rule!` macro and insert it
//!   into `rules::get()` at the position it must run.
//! - If it needs a new coarse trigger, add a `BucketMask` bit and teach
//!   `TriggerInfo::scan` to set it.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pipeline.rs"]
mod pipeline;
#[path = "engine/trigger.rs"]
mod trigger;

pub use compiled_rules::BucketMask;
#[allow(unused_imports)]
pub(crate) use compiled_rules::{CompiledRules, RuleMeta};
#[allow(unused_imports)]
pub use metrics::{RuleMetrics, RunMetrics, RunResult};
pub use pipeline::Pipeline;
#[allow(unused_imports)]
pub(crate) use trigger::TriggerInfo;
