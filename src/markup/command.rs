//! Command lookup and whole-name rewriting.
//!
//! Rules that act on specific command names walk the input with
//! [`next_command`] instead of matching raw text, so `\tfrac` never matches
//! inside `\tfracx`, and `\\tfrac` (a line break followed by text) is not a
//! command at all.

use super::scanner::skip_escape;
use crate::Span;

/// A `\name` occurrence in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMatch<'a> {
    /// Command name without the backslash.
    pub name: &'a str,
    /// Span of the backslash and the name.
    pub span: Span,
}

/// Text that replaces `input[command.start..end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub text: String,
    /// End (exclusive) of the replaced region; at least the command's end.
    pub end: usize,
}

/// Find the next letter-named command at or after `from`.
pub fn next_command(input: &str, from: usize) -> Option<CommandMatch<'_>> {
    let mut pos = from;
    loop {
        let start = pos + input.get(pos..)?.find('\\')?;
        let end = skip_escape(input, start);
        let name = &input[start + 1..end];
        if name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Some(CommandMatch { name, span: Span { start, end } });
        }
        pos = end;
    }
}

/// Rewrite commands left to right.
///
/// `rewrite` sees every command in order and may return a [`Replacement`];
/// scanning resumes after the replaced region, so replacements never overlap.
/// Returns `None` if nothing was replaced.
pub fn rewrite_commands<F>(input: &str, mut rewrite: F) -> Option<String>
where
    F: FnMut(CommandMatch<'_>) -> Option<Replacement>,
{
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut cursor = 0;

    while let Some(found) = next_command(input, cursor) {
        cursor = found.span.end;
        let start = found.span.start;
        if let Some(replacement) = rewrite(found) {
            let buf = out.get_or_insert_with(|| String::with_capacity(input.len() + 16));
            buf.push_str(&input[copied..start]);
            buf.push_str(&replacement.text);
            copied = replacement.end.max(cursor);
            cursor = copied;
        }
    }

    out.map(|mut buf| {
        buf.push_str(&input[copied..]);
        buf
    })
}
