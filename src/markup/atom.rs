//! Atom parsing.
//!
//! An *atom* is the smallest self-contained unit of a markup fragment: the
//! thing a script or an operator applies to.
//!
//! ```text
//! {a+b}^2        Group         (scripts: 1)
//! (x_n+1)        Parenthesized
//! \frac{1}{2}    Command       (fixed arity: two groups)
//! \sqrt[3]{x}    Command       (optional index, one group)
//! \hat{x}_i      Command       (one immediate group, scripts: 1)
//! a_n            Token         (scripts: 1)
//! f''(x)         Token `f''`   (the parenthesis is a separate atom)
//! ```
//!
//! Parsing never fails on malformed input: an unterminated group consumes the
//! rest of the string and marks the atom as not [`closed`](Atom::closed).

use super::scanner::{match_delimiter, skip_escape, skip_whitespace};
use crate::Span;

/// Commands that consume exactly two required argument groups.
const TWO_ARGUMENT_COMMANDS: &[&str] =
    &["frac", "dfrac", "tfrac", "cfrac", "binom", "dbinom", "tbinom", "overset", "underset", "stackrel"];

/// Commands that take an optional `[...]` index followed by one group.
const ROOT_COMMANDS: &[&str] = &["sqrt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// A balanced `{...}` group.
    Group,
    /// A balanced `(...)` or `[...]` span.
    Parenthesized,
    /// A backslash command with its arguments.
    Command,
    /// A letter/digit run or a single character.
    Token,
}

/// A parsed atom: its kind, its span in the input and how many scripts were
/// chained onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom {
    pub kind: AtomKind,
    pub span: Span,
    /// Number of `_`/`^` scripts attached after the base.
    pub scripts: usize,
    /// False when some group inside the atom was never terminated.
    pub closed: bool,
}

impl Atom {
    /// A single `{...}` group with nothing attached.
    pub fn is_bare_group(&self) -> bool {
        self.kind == AtomKind::Group && self.scripts == 0
    }

    /// The slice of `input` covered by this atom.
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.start..self.span.end]
    }
}

/// Tracks whether every delimiter consumed so far was terminated.
struct Cursor<'a> {
    input: &'a str,
    closed: bool,
}

impl<'a> Cursor<'a> {
    fn delimited(&mut self, open: usize) -> usize {
        match match_delimiter(self.input, open) {
            Some(end) => end,
            None => {
                self.closed = false;
                self.input.len()
            }
        }
    }

    fn byte(&self, pos: usize) -> Option<u8> {
        self.input.as_bytes().get(pos).copied()
    }

    fn command(&mut self, start: usize) -> usize {
        let name_end = skip_escape(self.input, start);
        let name = &self.input[start + 1..name_end];

        if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            // Escaped character such as `\{` or `\,`.
            return name_end;
        }

        if TWO_ARGUMENT_COMMANDS.contains(&name) {
            return self.required_groups(name_end, 2);
        }

        if ROOT_COMMANDS.contains(&name) {
            let mut pos = name_end;
            let index = skip_whitespace(self.input, pos);
            if self.byte(index) == Some(b'[') {
                pos = self.delimited(index);
            }
            return self.required_groups(pos, 1);
        }

        match self.byte(name_end) {
            Some(b'{') => self.delimited(name_end),
            _ => name_end,
        }
    }

    fn required_groups(&mut self, mut pos: usize, count: usize) -> usize {
        for _ in 0..count {
            let next = skip_whitespace(self.input, pos);
            if self.byte(next) != Some(b'{') {
                break;
            }
            pos = self.delimited(next);
        }
        pos
    }

    fn token(&self, start: usize, first: char) -> usize {
        let rest = &self.input[start..];
        let run = if first.is_alphanumeric() {
            rest.char_indices().find(|(_, c)| !c.is_alphanumeric()).map_or(rest.len(), |(i, _)| i)
        } else {
            first.len_utf8()
        };
        let end = start + run;
        end + self.input[end..].bytes().take_while(|&b| b == b'\'').count()
    }

    fn script_argument(&mut self, start: usize) -> Option<usize> {
        let c = self.input.get(start..)?.chars().next()?;
        match c {
            '{' => Some(self.delimited(start)),
            '\\' => Some(skip_escape(self.input, start)),
            '}' | ')' | ']' | '_' | '^' | '&' => None,
            c => Some(start + c.len_utf8()),
        }
    }

    fn script(&mut self, pos: usize) -> Option<usize> {
        match self.byte(pos) {
            Some(b'_' | b'^') => self.script_argument(skip_whitespace(self.input, pos + 1)),
            _ => None,
        }
    }
}

/// Parse the atom starting at `start`.
///
/// Returns `None` only when `start` is at (or past) the end of the input.
/// The returned span always starts at `start` and is never empty.
pub fn parse_atom(input: &str, start: usize) -> Option<Atom> {
    let first = input.get(start..)?.chars().next()?;
    let mut cursor = Cursor { input, closed: true };

    let (kind, mut end) = match first {
        '{' => (AtomKind::Group, cursor.delimited(start)),
        '(' | '[' => (AtomKind::Parenthesized, cursor.delimited(start)),
        '\\' => (AtomKind::Command, cursor.command(start)),
        c => (AtomKind::Token, cursor.token(start, c)),
    };

    let mut scripts = 0;
    while let Some(after) = cursor.script(end) {
        end = after;
        scripts += 1;
    }

    Some(Atom { kind, span: Span { start, end }, scripts, closed: cursor.closed })
}

/// If a `_` or `^` at `pos` carries a valid argument, the index past it.
///
/// A lone marker (end of input, closing delimiter, another marker) yields
/// `None` and is left for the caller to copy through.
pub(crate) fn script_end(input: &str, pos: usize) -> Option<usize> {
    Cursor { input, closed: true }.script(pos)
}
