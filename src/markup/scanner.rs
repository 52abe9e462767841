//! Delimiter scanning.
//!
//! The scanner is the lowest layer of the markup toolkit: everything that needs
//! to know "where does this group end" goes through [`match_delimiter`].
//!
//! ```text
//! input:  \frac{a_{1}}{\{b\}}
//!              ^ open = 5
//!              └──────┘ match_delimiter -> Some(12)
//! ```
//!
//! Three pairs are recognized independently: `{}`, `()` and `[]`. Only the
//! pair that was opened affects the depth counter, so `{ ( }` closes at the
//! brace.
//!
//! ## Escapes and command names
//!
//! A backslash always consumes what follows it as one unit:
//!
//! - `\` + ASCII letters: a command name (`\left`, `\frac`), opaque to the
//!   scanner.
//! - `\` + any other char: an escaped literal (`\{`, `\}`, `\(`, `\\`).
//!
//! Because `\\` consumes both backslashes, a delimiter that follows it is
//! structural again.
//!
//! ## Failure policy
//!
//! Unterminated groups are not errors. [`match_delimiter`] reports `None`;
//! [`find_closing`] falls back to the end of the input so callers can treat the
//! tail as one best-effort span.

/// Closing byte for a structural opener.
pub(crate) fn closer_for(open: u8) -> Option<u8> {
    match open {
        b'{' => Some(b'}'),
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        _ => None,
    }
}

/// Length in bytes of the command name at the start of `rest` (ASCII letters).
pub(crate) fn command_name_len(rest: &str) -> usize {
    rest.bytes().take_while(u8::is_ascii_alphabetic).count()
}

/// Index just past the command name or escaped character introduced by the
/// backslash at `backslash`.
///
/// A trailing lone backslash spans just itself.
pub(crate) fn skip_escape(input: &str, backslash: usize) -> usize {
    let rest = &input[backslash + 1..];
    match command_name_len(rest) {
        0 => backslash + 1 + rest.chars().next().map_or(0, char::len_utf8),
        n => backslash + 1 + n,
    }
}

/// Whether the byte at `idx` is preceded by an odd run of backslashes.
pub(crate) fn is_escaped(input: &str, idx: usize) -> bool {
    input.as_bytes()[..idx].iter().rev().take_while(|&&b| b == b'\\').count() % 2 == 1
}

/// Index of the first non-whitespace char at or after `pos`.
pub(crate) fn skip_whitespace(input: &str, pos: usize) -> usize {
    match input.get(pos..) {
        Some(rest) => pos + (rest.len() - rest.trim_start().len()),
        None => pos,
    }
}

/// Find the end (exclusive) of the delimited span opened at `open`.
///
/// Returns `None` when `open` is not an opening delimiter or when the matching
/// closer never appears.
pub fn match_delimiter(input: &str, open: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let opener = *bytes.get(open)?;
    let closer = closer_for(opener)?;

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' {
            i = skip_escape(input, i);
            continue;
        }
        if b == opener {
            depth += 1;
        } else if b == closer {
            depth -= 1;
            if depth == 0 {
                return Some(i + 1);
            }
        }
        i += 1;
    }
    None
}

/// Find the end (exclusive) of the delimited span opened at `open`, falling
/// back to the end of the input when the group is never closed.
///
/// ```text
/// "{a{b}c}d" , 0 -> 7
/// "{a{b}c"   , 0 -> 6   (unterminated: remainder of the string)
/// ```
pub fn find_closing(input: &str, open: usize) -> usize {
    match_delimiter(input, open).unwrap_or(input.len())
}
