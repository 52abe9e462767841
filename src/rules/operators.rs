//! Operator argument wrapping.
//!
//! Renderers tend to glue an operator to whatever follows it (`\lim a_n`
//! becomes one run-on identifier), so every operator from the configured set
//! gets an explicit operand group:
//!
//! ```text
//! \lim a_n                 -> \lim{a_n}
//! \lim_{n\to\infty} a_n    -> \lim_{n\to\infty}{a_n}
//! \max\limits_{k} x_k^2    -> \max\limits_{k}{x_k^2}
//! \lim (x_n+1)             -> unchanged (already delimited)
//! \max \min x              -> \max \min{x}
//! \lim_{x\to0}\, f(x)      -> \lim_{x\to0}\,{f}(x)
//! \max \{a,b\}             -> unchanged
//! ```
//!
//! The pass is a single left-to-right scan. Operators nested *inside* the
//! operand atom or the operator's own subscript are normalized too.

use crate::engine::BucketMask;
use crate::markup::{Atom, parse_atom, script_end, skip_escape, skip_whitespace};
use crate::{Config, Rule, Span};

/// Commands that may sit between an operator and its subscript.
const LIMIT_MODIFIERS: &[&str] = &["limits", "nolimits"];

/// Commands that can never start an operand.
const BOUNDARY_COMMANDS: &[&str] = &["left", "right", "begin", "end"];

/// Spacing commands allowed between the operator head and its operand.
const SPACING_COMMANDS: &[&str] = &[",", ";", ":", "!", "quad", "qquad"];

/// Opening delimiters spelled as commands; the operand is already delimited.
const DELIMITER_COMMANDS: &[&str] = &["{", "|", "lbrace", "langle", "lvert", "lVert", "lfloor", "lceil"];

pub fn rule_operator_arguments() -> Rule {
    rule! {
        name: "operator argument grouping",
        buckets: BucketMask::BACKSLASH.bits(),
        apply: |input, config| {
            let out = wrap_operator_arguments(input, config);
            (out != input).then_some(out)
        }
    }
}

/// `\op`, an optional limit modifier and one attached subscript.
struct OperatorHead {
    subscript: Option<Span>,
    end: usize,
}

/// Wrap the implicit operand of every configured operator in `{...}`.
pub fn wrap_operator_arguments(input: &str, config: &Config) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len() + 8);
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let name_end = skip_escape(input, i);
        if !config.is_operator(&input[i + 1..name_end]) {
            i = name_end;
            continue;
        }

        let head = operator_head(input, name_end);
        if let Some(sub) = head.subscript {
            out.push_str(&input[copied..sub.start]);
            out.push_str(&wrap_operator_arguments(&input[sub.start..sub.end], config));
            copied = sub.end;
        }

        let arg_start = skip_spacing(input, head.end);
        match operand_at(input, arg_start, config) {
            Some(atom) => {
                out.push_str(&input[copied..head.end]);
                out.push_str(input[head.end..arg_start].trim());
                out.push_str(&wrap_atom(input, &atom, config));
                copied = atom.span.end;
                i = atom.span.end;
            }
            None => i = head.end,
        }
    }

    out.push_str(&input[copied..]);
    out
}

/// Wrap `atom` in a fresh group, unwrapping one level if it already is a
/// bare group. Operators inside the atom are wrapped first.
fn wrap_atom(input: &str, atom: &Atom, config: &Config) -> String {
    format!("{{{}}}", wrap_operator_arguments(operand_text(input, atom), config))
}

fn operator_head(input: &str, name_end: usize) -> OperatorHead {
    let mut pos = name_end;

    let modifier = skip_whitespace(input, pos);
    if input.as_bytes().get(modifier) == Some(&b'\\') {
        let end = skip_escape(input, modifier);
        if LIMIT_MODIFIERS.contains(&&input[modifier + 1..end]) {
            pos = end;
        }
    }

    if input.as_bytes().get(pos) == Some(&b'_') {
        if let Some(end) = script_end(input, pos) {
            return OperatorHead { subscript: Some(Span { start: pos, end }), end };
        }
    }
    OperatorHead { subscript: None, end: pos }
}

/// Skip whitespace and spacing commands such as `\,` or `\quad`.
fn skip_spacing(input: &str, from: usize) -> usize {
    let mut pos = skip_whitespace(input, from);
    while input.as_bytes().get(pos) == Some(&b'\\') {
        let end = skip_escape(input, pos);
        if !SPACING_COMMANDS.contains(&&input[pos + 1..end]) {
            break;
        }
        pos = skip_whitespace(input, end);
    }
    pos
}

/// The operand atom at `start`, or `None` when it is absent or must be left
/// alone.
fn operand_at(input: &str, start: usize, config: &Config) -> Option<Atom> {
    let first = *input.as_bytes().get(start)?;
    match first {
        b'{' | b'(' | b'}' | b')' | b']' | b'&' | b'_' | b'^' => return None,
        b'\\' => {
            let name = &input[start + 1..skip_escape(input, start)];
            if name == "\\"
                || BOUNDARY_COMMANDS.contains(&name)
                || DELIMITER_COMMANDS.contains(&name)
                || config.is_operator(name)
            {
                return None;
            }
        }
        _ => {}
    }

    let atom = parse_atom(input, start)?;
    // An unterminated operand is passed through verbatim.
    atom.closed.then_some(atom)
}

/// `operand_at` never yields a group; the unwrap serves direct callers of
/// `wrap_atom`.
fn operand_text<'a>(input: &'a str, atom: &Atom) -> &'a str {
    let text = atom.text(input);
    if atom.is_bare_group() && atom.closed { &text[1..text.len() - 1] } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(input: &str) -> String {
        wrap_operator_arguments(input, &Config::default())
    }

    #[test]
    fn wraps_plain_operands() {
        assert_eq!(wrap(r"\lim a_n"), r"\lim{a_n}");
        assert_eq!(wrap(r"\max x"), r"\max{x}");
        assert_eq!(wrap(r"\sup\frac{1}{n}"), r"\sup{\frac{1}{n}}");
        assert_eq!(wrap(r"\inf x_k^2 + 1"), r"\inf{x_k^2} + 1");
    }

    #[test]
    fn keeps_the_subscript_before_the_operand() {
        assert_eq!(wrap(r"\lim_{n\to\infty} a_n"), r"\lim_{n\to\infty}{a_n}");
        assert_eq!(wrap(r"\max_k x_k"), r"\max_k{x_k}");
        assert_eq!(wrap(r"\max\limits_{k} x_k"), r"\max\limits_{k}{x_k}");
    }

    #[test]
    fn leaves_delimited_operands_alone() {
        assert_eq!(wrap(r"\lim (x_n+1)"), r"\lim (x_n+1)");
        assert_eq!(wrap(r"\lim{a_n}"), r"\lim{a_n}");
        assert_eq!(wrap(r"\max\left(a,b\right)"), r"\max\left(a,b\right)");
        assert_eq!(wrap(r"\lim_{n\to\infty}{a_n}"), r"\lim_{n\to\infty}{a_n}");
    }

    #[test]
    fn leaves_missing_operands_alone() {
        assert_eq!(wrap(r"\lim"), r"\lim");
        assert_eq!(wrap(r"\lim_{n}  "), r"\lim_{n}  ");
        assert_eq!(wrap(r"{\max}"), r"{\max}");
        assert_eq!(wrap(r"\max & x \\ \min \\ y"), r"\max & x \\ \min \\ y");
        assert_eq!(wrap(r"\max \begin{pmatrix}a\end{pmatrix}"), r"\max \begin{pmatrix}a\end{pmatrix}");
    }

    #[test]
    fn nested_operators_resolve_independently() {
        assert_eq!(wrap(r"\max \min x"), r"\max \min{x}");
        assert_eq!(wrap(r"\lim \frac{\max x}{2}"), r"\lim{\frac{\max{x}}{2}}");
    }

    #[test]
    fn operators_inside_the_subscript_are_wrapped() {
        assert_eq!(wrap(r"\lim_{n \to \max x} a_n"), r"\lim_{n \to \max{x}}{a_n}");
        assert_eq!(wrap(r"\sup_{\min S} x"), r"\sup_{\min{S}}{x}");
        assert_eq!(wrap(r"\lim_{n \to \max x}"), r"\lim_{n \to \max{x}}");
        assert_eq!(wrap(r"\lim_{n \to \max x} (a)"), r"\lim_{n \to \max{x}} (a)");
    }

    #[test]
    fn spacing_commands_are_not_operands() {
        assert_eq!(wrap(r"\lim_{x\to0}\, f(x)"), r"\lim_{x\to0}\,{f}(x)");
        assert_eq!(wrap(r"\max \quad x"), r"\max\quad{x}");
        assert_eq!(wrap(r"\max\,\! x_k"), r"\max\,\!{x_k}");
        assert_eq!(wrap(r"\lim\, (x)"), r"\lim\, (x)");
        assert_eq!(wrap(r"\lim\,"), r"\lim\,");
    }

    #[test]
    fn escaped_delimiters_count_as_delimited() {
        for input in [r"\max \{a,b\}", r"\max\langle a\rangle", r"\sup \lvert x\rvert", r"\inf\lbrace a\rbrace"] {
            assert_eq!(wrap(input), input, "input: {input}");
        }
    }

    #[test]
    fn ignores_non_operators_and_escapes() {
        assert_eq!(wrap(r"\limits a"), r"\limits a");
        assert_eq!(wrap(r"\sin x"), r"\sin x");
        assert_eq!(wrap(r"\\lim a"), r"\\lim a");
        assert_eq!(wrap(r"\maximum x"), r"\maximum x");
    }

    #[test]
    fn unterminated_operand_is_passed_through() {
        assert_eq!(wrap(r"\lim a_{n"), r"\lim a_{n");
    }

    #[test]
    fn wrap_atom_unwraps_bare_groups() {
        let input = "{a+b}";
        let atom = parse_atom(input, 0).unwrap();
        assert_eq!(wrap_atom(input, &atom, &Config::default()), "{a+b}");

        let input = "{a+b}^2";
        let atom = parse_atom(input, 0).unwrap();
        assert_eq!(wrap_atom(input, &atom, &Config::default()), "{{a+b}^2}");

        let input = "x_1";
        let atom = parse_atom(input, 0).unwrap();
        assert_eq!(wrap_atom(input, &atom, &Config::default()), "{x_1}");

        let input = "{a+b";
        let atom = parse_atom(input, 0).unwrap();
        assert!(!atom.closed);
        assert_eq!(wrap_atom(input, &atom, &Config::default()), "{{a+b}");
    }

    #[test]
    fn custom_operator_set() {
        let config = Config::builder().operators(["det"]).build().unwrap();
        assert_eq!(wrap_operator_arguments(r"\det A \lim a", &config), r"\det{A} \lim a");
    }
}
