//! The rewrite rules, in pipeline order.
//!
//! Order is load-bearing: operands are grouped before any symbol repair looks
//! at adjacency, and aliases are resolved before environments are rewritten.
//! Keep [`get`] as the single place that decides it.

#[path = "rules/aliases.rs"]
pub(crate) mod aliases;
#[path = "rules/environments.rs"]
pub(crate) mod environments;
#[path = "rules/operators.rs"]
pub(crate) mod operators;
#[path = "rules/symbols.rs"]
pub(crate) mod symbols;

#[cfg(test)]
#[path = "rules/tests.rs"]
mod tests;

use crate::Rule;

pub fn get() -> Vec<Rule> {
    vec![
        operators::rule_operator_arguments(),
        symbols::rule_isolated_degree(),
        symbols::rule_empty_decoration(),
        symbols::rule_trailing_letter_command(),
        aliases::rule_command_aliases(),
        aliases::rule_modulo(),
        environments::rule_bracketed_matrices(),
        environments::rule_piecewise(),
    ]
}
