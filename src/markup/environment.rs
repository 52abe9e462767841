//! `\begin{name} ... \end{name}` pairing.
//!
//! Environments are paired in one left-to-right pass with a stack of open
//! `\begin` markers per name: an `\end{name}` closes the most recent unclosed
//! `\begin{name}`, so nested blocks of the same kind pair correctly and other
//! names never affect the pairing. Markers left on a stack have no partner.
//!
//! ```text
//! \begin{pmatrix} \begin{pmatrix} a \end{pmatrix} \end{pmatrix}
//! └── header ───┘ └──────────── body ───────────┘ └── footer ─┘
//! ```

use std::collections::HashMap;

use super::command::{CommandMatch, next_command};
use super::scanner::skip_whitespace;
use crate::Span;

/// A fully matched environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment<'a> {
    pub name: &'a str,
    /// The whole construct, from `\begin` to the end of `\end{name}`.
    pub span: Span,
    /// The text between the header and the footer.
    pub body: Span,
}

impl Environment<'_> {
    /// `\begin{name}`, including any spaces inside the marker.
    pub fn header(&self) -> Span {
        Span { start: self.span.start, end: self.body.start }
    }

    /// `\end{name}`, including any spaces inside the marker.
    pub fn footer(&self) -> Span {
        Span { start: self.body.end, end: self.span.end }
    }
}

/// Name and end-of-marker for a `\begin{..}` / `\end{..}` command.
///
/// Names are letters with an optional `*` suffix; anything else inside the
/// braces means the command is not a marker.
fn marker_name<'a>(input: &'a str, cmd: &CommandMatch<'_>) -> Option<(&'a str, usize)> {
    let bytes = input.as_bytes();
    let open = skip_whitespace(input, cmd.span.end);
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    let start = skip_whitespace(input, open + 1);
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
        end += 1;
    }
    if end == start {
        return None;
    }
    if bytes.get(end) == Some(&b'*') {
        end += 1;
    }
    let close = skip_whitespace(input, end);
    (bytes.get(close) == Some(&b'}')).then_some((&input[start..end], close + 1))
}

/// Environment name of a `\begin{..}` / `\end{..}` marker, matched or not.
pub(crate) fn environment_name<'a>(input: &'a str, cmd: &CommandMatch<'_>) -> Option<&'a str> {
    match cmd.name {
        "begin" | "end" => marker_name(input, cmd).map(|(name, _)| name),
        _ => None,
    }
}

/// Every matched environment in `input`, ordered by where its `\begin` starts.
pub fn pair_environments(input: &str) -> Vec<Environment<'_>> {
    let mut open: HashMap<&str, Vec<(usize, usize)>> = HashMap::new();
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(cmd) = next_command(input, pos) {
        pos = cmd.span.end;
        if !matches!(cmd.name, "begin" | "end") {
            continue;
        }
        let Some((name, marker_end)) = marker_name(input, &cmd) else {
            continue;
        };
        pos = marker_end;
        if cmd.name == "begin" {
            open.entry(name).or_default().push((cmd.span.start, marker_end));
        } else if let Some((start, header_end)) = open.get_mut(name).and_then(Vec::pop) {
            found.push(Environment {
                name,
                span: Span { start, end: marker_end },
                body: Span { start: header_end, end: cmd.span.start },
            });
        }
    }

    found.sort_by_key(|env| env.span.start);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_env(input: &str) -> Option<(&str, &str, &str)> {
        let env = pair_environments(input).into_iter().next()?;
        Some((env.name, &input[env.body.start..env.body.end], &input[env.span.start..env.span.end]))
    }

    #[test]
    fn matches_simple_environment() {
        let input = r"\begin{pmatrix}a&b\\c&d\end{pmatrix}+x";
        let (name, body, whole) = first_env(input).unwrap();
        assert_eq!(name, "pmatrix");
        assert_eq!(body, r"a&b\\c&d");
        assert_eq!(whole, r"\begin{pmatrix}a&b\\c&d\end{pmatrix}");
    }

    #[test]
    fn pairs_nested_environments_of_the_same_name() {
        let input = r"\begin{cases}\begin{cases}a\end{cases}&b\end{cases}";
        let (_, body, whole) = first_env(input).unwrap();
        assert_eq!(body, r"\begin{cases}a\end{cases}&b");
        assert_eq!(whole, input);
        assert_eq!(pair_environments(input).len(), 2);
    }

    #[test]
    fn other_environments_do_not_affect_depth() {
        let input = r"\begin{bmatrix}\begin{cases}x\end{cases}\end{bmatrix}";
        let (name, body, _) = first_env(input).unwrap();
        assert_eq!(name, "bmatrix");
        assert_eq!(body, r"\begin{cases}x\end{cases}");
    }

    #[test]
    fn tolerates_spaces_in_markers() {
        let input = r"\begin { vmatrix } a \end{vmatrix}";
        let env = pair_environments(input)[0];
        assert_eq!(env.name, "vmatrix");
        assert_eq!(&input[env.body.start..env.body.end], " a ");
        assert_eq!(&input[env.header().start..env.header().end], r"\begin { vmatrix }");
        assert_eq!(&input[env.footer().start..env.footer().end], r"\end{vmatrix}");
    }

    #[test]
    fn starred_names_are_distinct() {
        let input = r"\begin{align*}a\end{align}\end{align*}";
        let (name, body, _) = first_env(input).unwrap();
        assert_eq!(name, "align*");
        assert_eq!(body, r"a\end{align}");
    }

    #[test]
    fn missing_end_is_not_an_environment() {
        assert_eq!(first_env(r"\begin{pmatrix}a&b"), None);
        assert_eq!(first_env(r"\begin pmatrix a"), None);
        assert_eq!(first_env(r"\begin{p matrix}a\end{p matrix}"), None);

        let input = r"\begin{pmatrix}\begin{pmatrix}a\end{pmatrix}";
        let envs = pair_environments(input);
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].span.start, r"\begin{pmatrix}".len());
    }

    #[test]
    fn stray_end_does_not_close_a_later_begin() {
        let input = r"\end{cases}\begin{cases}x\end{cases}";
        let envs = pair_environments(input);
        assert_eq!(envs.len(), 1);
        assert_eq!(&input[envs[0].body.start..envs[0].body.end], "x");
    }

    #[test]
    fn many_unclosed_markers_pair_in_one_pass() {
        let unclosed = r"\begin{pmatrix}a".repeat(20_000);
        let started = std::time::Instant::now();
        assert!(pair_environments(&unclosed).is_empty());

        let depth = 5_000;
        let nested = format!("{}x{}", r"\begin{cases}".repeat(depth), r"\end{cases}".repeat(depth));
        let envs = pair_environments(&nested);
        assert_eq!(envs.len(), depth);
        assert_eq!(envs[0].span, Span { start: 0, end: nested.len() });
        assert!(started.elapsed() < std::time::Duration::from_secs(2), "took {:?}", started.elapsed());
    }
}
