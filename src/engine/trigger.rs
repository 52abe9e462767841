//! Trigger scanning (input pre-classification).
//!
//! This module inspects the input string and produces coarse signals that let
//! the pipeline skip rules that cannot fire:
//!
//! - **Buckets** (`BucketMask`): cheap booleans such as "contains a
//!   backslash" or "contains `\begin`".
//! - **Phrases** (`TriggerInfo::phrases`): every command name and every
//!   environment name found in the input (`"circ"`, `"pmod"`, `"pmatrix"`).
//!
//! The scan is exact for command names (it uses the same escape-aware lookup
//! as the rules), so gating never hides a real match. The pipeline rescans
//! after every rule that changes the string.

use super::compiled_rules::BucketMask;
use crate::markup::{environment_name, next_command};
use std::collections::HashSet;

/// Input characteristics detected from the current string.
#[derive(Debug, Clone)]
pub(crate) struct TriggerInfo {
    pub buckets: BucketMask,
    pub phrases: HashSet<String>,
}

impl TriggerInfo {
    /// Scan `input` for buckets and command/environment names.
    pub fn scan(input: &str) -> Self {
        let mut buckets = BucketMask::empty();
        let mut phrases = HashSet::new();

        for b in input.bytes() {
            match b {
                b'\\' => buckets |= BucketMask::BACKSLASH,
                b'_' | b'^' => buckets |= BucketMask::SCRIPT,
                b'{' => buckets |= BucketMask::BRACES,
                _ => {}
            }
        }

        if buckets.contains(BucketMask::BACKSLASH) {
            let mut pos = 0;
            while let Some(cmd) = next_command(input, pos) {
                pos = cmd.span.end;
                if cmd.name == "begin" {
                    buckets |= BucketMask::ENVIRONMENT;
                    if let Some(name) = environment_name(input, &cmd) {
                        phrases.insert(name.to_string());
                    }
                }
                phrases.insert(cmd.name.to_string());
            }
        }

        TriggerInfo { buckets, phrases }
    }
}
