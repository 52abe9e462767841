//! Symbol-level repairs: isolated degree marks, empty decorations and a
//! dangling Greek letter at the end of a formula.

use crate::engine::BucketMask;
use crate::markup::{Replacement, is_escaped, match_delimiter, rewrite_commands, skip_whitespace};
use crate::Rule;

/// `^\circ` with nothing to attach to becomes the standalone `\degree` glyph.
///
/// ```text
/// x^\circ      -> unchanged (a true exponent)
/// 90 ^{\circ}  -> unchanged
/// (^\circ)     -> (\degree)
/// ^\circ C     -> \degree C
/// ```
pub fn rule_isolated_degree() -> Rule {
    rule! {
        name: "isolated degree symbol",
        buckets: BucketMask::BACKSLASH.bits() | BucketMask::SCRIPT.bits(),
        phrases: ["circ"],
        apply: |input, _config| {
            let mut out: Option<String> = None;
            let mut copied = 0;

            for m in regex!(r"\^\s*(?:\\circ|\{\s*\\circ\s*\})").find_iter(input) {
                let next = input[m.end()..].chars().next();
                if m.as_str().ends_with("circ") && next.is_some_and(|c| c.is_ascii_alphabetic()) {
                    // `\circle`, `\circledast`, ...
                    continue;
                }
                if is_escaped(input, m.start()) || is_attached(&input[..m.start()]) {
                    continue;
                }

                let buf = out.get_or_insert_with(|| String::with_capacity(input.len()));
                buf.push_str(&input[copied..m.start()]);
                buf.push_str(r"\degree");
                if next.is_some_and(|c| c.is_ascii_alphabetic()) {
                    buf.push(' ');
                }
                copied = m.end();
            }

            out.map(|mut buf| {
                buf.push_str(&input[copied..]);
                buf
            })
        }
    }
}

/// Whether a script marker placed right after `before` has a base.
fn is_attached(before: &str) -> bool {
    matches!(
        before.trim_end().chars().next_back(),
        Some(c) if c.is_alphanumeric() || matches!(c, '\'' | ')' | ']' | '}')
    )
}

/// `\bar{}` gets a placeholder base so the decoration still renders.
pub fn rule_empty_decoration() -> Rule {
    rule! {
        name: "empty decoration placeholder",
        buckets: BucketMask::BACKSLASH.bits() | BucketMask::BRACES.bits(),
        apply: |input, config| {
            rewrite_commands(input, |cmd| {
                if !config.is_decoration(cmd.name) {
                    return None;
                }
                let open = skip_whitespace(input, cmd.span.end);
                if input.as_bytes().get(open) != Some(&b'{') {
                    return None;
                }
                let close = match_delimiter(input, open)?;
                if !input[open + 1..close - 1].trim().is_empty() {
                    return None;
                }
                Some(Replacement { text: format!("\\{}{{{}}}", cmd.name, config.placeholder()), end: close })
            })
        }
    }
}

/// A Greek-letter command at the very end of the input is wrapped in a group.
///
/// ```text
/// \sin\theta     -> \sin{\theta}
/// x^\alpha  \n   -> x^{\alpha}  \n
/// ```
pub fn rule_trailing_letter_command() -> Rule {
    rule! {
        name: "trailing letter command",
        buckets: BucketMask::BACKSLASH.bits(),
        apply: |input, config| {
            let trimmed = input.trim_end();
            let start = trimmed.rfind('\\')?;
            let name = &trimmed[start + 1..];
            if !config.is_greek_letter(name) || is_escaped(trimmed, start) {
                return None;
            }
            Some(format!("{}{{\\{}}}{}", &trimmed[..start], name, &input[trimmed.len()..]))
        }
    }
}
