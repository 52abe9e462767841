//! Command aliases and modulo annotations.

use crate::engine::BucketMask;
use crate::markup::{Replacement, match_delimiter, rewrite_commands, skip_whitespace};
use crate::Rule;

/// Replace configured command names by their more widely supported synonym.
///
/// Matching is on the whole command name: `\tfrac12` is rewritten, `\tfracx`
/// (a different command) is not.
pub fn rule_command_aliases() -> Rule {
    rule! {
        name: "command aliases",
        buckets: BucketMask::BACKSLASH.bits(),
        apply: |input, config| {
            rewrite_commands(input, |cmd| {
                let to = config.alias_for(cmd.name)?;
                Some(Replacement { text: format!("\\{to}"), end: cmd.span.end })
            })
        }
    }
}

/// Rewrite `\pmod{n}`, `\bmod` and `\mod` into plain text annotations.
///
/// ```text
/// a \equiv b \pmod{n}   -> a \equiv b \ (\text{mod}\ n)
/// a \bmod b             -> a \ \text{mod}\  b
/// \pmod n               -> unchanged (no argument group)
/// ```
pub fn rule_modulo() -> Rule {
    rule! {
        name: "modulo annotation",
        buckets: BucketMask::BACKSLASH.bits(),
        phrases: ["pmod", "bmod", "mod"],
        apply: |input, _config| {
            rewrite_commands(input, |cmd| match cmd.name {
                "pmod" => {
                    let open = skip_whitespace(input, cmd.span.end);
                    if input.as_bytes().get(open) != Some(&b'{') {
                        return None;
                    }
                    let close = match_delimiter(input, open)?;
                    let modulus = input[open + 1..close - 1].trim();
                    Some(Replacement { text: format!(r"\ (\text{{mod}}\ {modulus})"), end: close })
                }
                "bmod" | "mod" => Some(Replacement { text: r"\ \text{mod}\ ".to_string(), end: cmd.span.end }),
                _ => None,
            })
        }
    }
}
