//! Bracketed matrix and piecewise environments.
//!
//! Renderers reliably support a plain `matrix` between scalable delimiters,
//! while the bracketed variants and `cases` are hit-and-miss:
//!
//! ```text
//! \begin{pmatrix}a&b\end{pmatrix}  -> \left(\begin{matrix}a&b\end{matrix}\right)
//! \begin{cases}x&y\end{cases}      -> \left\{\begin{matrix}x&y\end{matrix}\right.
//! ```
//!
//! Environments are paired structurally (see `markup/environment.rs`). Only
//! the `\begin` and `\end` markers of a matched pair are replaced, so nested
//! blocks of the same family are converted in the same pass.

use crate::engine::BucketMask;
use crate::markup::pair_environments;
use crate::{Rule, Span};

/// `(environment, left delimiter, right delimiter)`
type Family = &'static [(&'static str, &'static str, &'static str)];

const BRACKETED_MATRICES: Family = &[
    ("pmatrix", r"\left(", r"\right)"),
    ("bmatrix", r"\left[", r"\right]"),
    ("Bmatrix", r"\left\{", r"\right\}"),
    ("vmatrix", r"\left|", r"\right|"),
    ("Vmatrix", r"\left\|", r"\right\|"),
];

const PIECEWISE: Family = &[("cases", r"\left\{", r"\right.")];

pub fn rule_bracketed_matrices() -> Rule {
    rule! {
        name: "bracketed matrix environments",
        buckets: BucketMask::ENVIRONMENT.bits(),
        phrases: ["pmatrix", "bmatrix", "Bmatrix", "vmatrix", "Vmatrix"],
        apply: |input, _config| { rewrite_family(input, BRACKETED_MATRICES) }
    }
}

pub fn rule_piecewise() -> Rule {
    rule! {
        name: "piecewise cases",
        buckets: BucketMask::ENVIRONMENT.bits(),
        phrases: ["cases"],
        apply: |input, _config| { rewrite_family(input, PIECEWISE) }
    }
}

/// Replace every environment of `family` by a delimited plain matrix.
fn rewrite_family(input: &str, family: Family) -> Option<String> {
    let mut edits: Vec<(Span, String)> = Vec::new();
    for env in pair_environments(input) {
        let Some((_, left, right)) = family.iter().find(|(name, _, _)| *name == env.name) else {
            continue;
        };
        edits.push((env.header(), format!(r"{left}\begin{{matrix}}")));
        edits.push((env.footer(), format!(r"\end{{matrix}}{right}")));
    }
    if edits.is_empty() {
        return None;
    }

    // Markers are distinct commands, so edits never overlap.
    edits.sort_by_key(|(span, _)| span.start);
    let mut out = String::with_capacity(input.len() + edits.len() * 8);
    let mut copied = 0;
    for (span, text) in edits {
        out.push_str(&input[copied..span.start]);
        out.push_str(&text);
        copied = span.end;
    }
    out.push_str(&input[copied..]);
    Some(out)
}
