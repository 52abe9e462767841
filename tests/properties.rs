//! Property-based tests for the normalization pipeline.
//!
//! The engine must accept arbitrary text: unbalanced brackets, dangling
//! escapes and multi-byte characters are all passed through without panics.

use proptest::prelude::*;
use texmend::{Config, Pipeline, find_closing, normalize, normalize_with, parse_atom};

/// Strategy: random soup of structural characters, command names and letters.
fn markup_soup_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("{".to_string()),
        Just("}".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("\\".to_string()),
        Just("\\\\".to_string()),
        Just("_".to_string()),
        Just("^".to_string()),
        Just("&".to_string()),
        Just(" ".to_string()),
        Just("\\lim".to_string()),
        Just("\\max".to_string()),
        Just("\\circ".to_string()),
        Just("\\bar".to_string()),
        Just("\\theta".to_string()),
        Just("\\pmod".to_string()),
        Just("\\begin{pmatrix}".to_string()),
        Just("\\end{pmatrix}".to_string()),
        Just("\\begin{cases}".to_string()),
        Just("\\end{cases}".to_string()),
        Just("é".to_string()),
        Just("∑".to_string()),
        "[a-z0-9]{1,3}",
    ];
    prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

/// Strategy: well-formed fragments the rules know about, separated by spaces.
fn fragment_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("x"),
        Just("a_n"),
        Just("+"),
        Just("\\lim"),
        Just("\\max_{n}"),
        Just("x^\\circ"),
        Just("(^\\circ)"),
        Just("\\bar{}"),
        Just("\\hat{a}"),
        Just("\\begin{pmatrix}a&b\\\\c&d\\end{pmatrix}"),
        Just("\\begin{cases}1&x>0\\\\0&x\\le0\\end{cases}"),
        Just("\\tfrac{1}{2}"),
        Just("\\pmod{p}"),
        Just("a\\bmod b"),
        Just("\\theta"),
    ];
    prop::collection::vec(piece, 0..8).prop_map(|pieces| pieces.join(" "))
}

proptest! {
    #[test]
    fn test_normalize_never_panics(input in markup_soup_strategy()) {
        let _ = normalize(&input);
    }

    #[test]
    fn test_scanner_stays_in_bounds(input in markup_soup_strategy()) {
        for (idx, b) in input.bytes().enumerate() {
            if matches!(b, b'{' | b'(' | b'[') {
                let end = find_closing(&input, idx);
                prop_assert!(end > idx && end <= input.len());
                prop_assert!(input.is_char_boundary(end));
            }
            if input.is_char_boundary(idx) {
                if let Some(atom) = parse_atom(&input, idx) {
                    prop_assert!(atom.span.start == idx && atom.span.end <= input.len());
                    prop_assert!(atom.span.end > atom.span.start);
                }
            }
        }
    }

    #[test]
    fn test_text_without_commands_is_unchanged(input in "[a-z0-9 {}()\\[\\]_^&+=-]{0,40}") {
        prop_assert_eq!(normalize(&input), input);
    }

    #[test]
    fn test_normalize_is_idempotent_on_fragments(input in fragment_strategy()) {
        let once = normalize(&input);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice, "input: {}", input);
    }

    #[test]
    fn test_default_config_matches_default_pipeline(input in fragment_strategy()) {
        let pipeline = Pipeline::new(Config::default());
        prop_assert_eq!(normalize_with(&input, &Config::default()), pipeline.run(&input));
    }
}
