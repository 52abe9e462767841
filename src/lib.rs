//! Rule-based repair of LaTeX-like math markup.
//!
//! `texmend` takes a formula string as it was scraped from a chat transcript
//! and rewrites it into a form a word-processor math renderer can consume:
//! operator operands get explicit groups, bracketed matrix environments become
//! `\left..\right` wrapped matrices, dangling commands are grouped, and a few
//! poorly supported commands are aliased.
//!
//! ```
//! assert_eq!(texmend::normalize(r"\lim_{n\to\infty} a_n"), r"\lim_{n\to\infty}{a_n}");
//! ```
//!
//! The engine never fails: malformed markup is passed through unchanged.

#[macro_use]
mod macros;
mod api;
mod config;
mod engine;
mod markup;
mod rules;

pub use api::{
    NormalizeDetails, NormalizeResultVerbose, RuleTrace, normalize, normalize_verbose, normalize_verbose_with,
    normalize_with,
};
pub use config::{Config, ConfigBuilder, ConfigError};
pub use engine::Pipeline;
pub use markup::{Atom, AtomKind, find_closing, match_delimiter, parse_atom};

// --- Internal types ---------------------------------------------------------

/// Half-open byte range `[start, end)` into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Rewrite function: returns `None` when the input is left unchanged.
pub(crate) type Apply = fn(&str, &Config) -> Option<String>;

/// One step of the rewrite pipeline.
///
/// `buckets` and `phrases` are trigger requirements checked against a cheap
/// scan of the input (see `engine/trigger.rs`); they only let the pipeline
/// skip work and never change the result.
pub(crate) struct Rule {
    pub name: &'static str,
    /// Bucket mask - every bit must be present in the input.
    pub buckets: u32,
    /// Command names - ANY one must appear in the input (empty = no gating).
    pub phrases: &'static [&'static str],
    pub apply: Apply,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("buckets", &self.buckets)
            .field("phrases", &self.phrases)
            .field("apply", &"<function>")
            .finish()
    }
}
