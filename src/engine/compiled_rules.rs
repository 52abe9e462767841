//! Rule compilation and indexing.
//!
//! This module holds the *static* side of the engine: the ordered rule list
//! plus per-rule metadata derived once when a [`Pipeline`](super::Pipeline) is
//! built.
//!
//! A run is split into two phases:
//!
//! 1. **Compile** (this module): keep the rules in pipeline order and decode
//!    their trigger requirements (`BucketMask` + phrases) into `RuleMeta`.
//! 2. **Run** (see `pipeline.rs`): scan the input for coarse triggers
//!    (`trigger.rs`) and apply every rule whose requirements are met.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `CompiledRules::rules` and `CompiledRules::metas`.
//!   Those vectors must stay aligned.
//! - Gating is an optimization only: a rule is skipped solely when it could
//!   not have changed the input.

use super::trigger::TriggerInfo;
use crate::Rule;

/// Rule identifier (index into the rules vector).
pub(crate) type RuleId = usize;

bitflags::bitflags! {
    /// Coarse features of an input string.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        /// At least one backslash (any command or escape).
        const BACKSLASH   = 1 << 0;
        /// A `_` or `^` script marker.
        const SCRIPT      = 1 << 1;
        /// An opening brace.
        const BRACES      = 1 << 2;
        /// A `\begin` command.
        const ENVIRONMENT = 1 << 3;
    }
}

/// Trigger requirements of one rule.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RuleMeta {
    pub buckets: BucketMask,
    pub phrases: &'static [&'static str],
}

impl RuleMeta {
    /// All buckets present, and (if any phrases are declared) at least one of them.
    pub fn matches(&self, trigger: &TriggerInfo) -> bool {
        trigger.buckets.contains(self.buckets)
            && (self.phrases.is_empty() || self.phrases.iter().any(|&p| trigger.phrases.contains(p)))
    }
}

/// Ordered rule set with metadata.
#[derive(Debug)]
pub(crate) struct CompiledRules {
    pub rules: Vec<Rule>,
    pub metas: Vec<RuleMeta>,
}

impl CompiledRules {
    pub fn new(rules: Vec<Rule>) -> Self {
        let metas = rules
            .iter()
            .map(|r| RuleMeta { buckets: BucketMask::from_bits_truncate(r.buckets), phrases: r.phrases })
            .collect();
        CompiledRules { rules, metas }
    }

    pub fn is_active(&self, id: RuleId, trigger: &TriggerInfo) -> bool {
        self.metas[id].matches(trigger)
    }
}
