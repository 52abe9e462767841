//! Structural markup primitives.
//!
//! Everything in this module is a pure function over one input string and
//! byte offsets into it. Structural characters are all ASCII, so offsets found
//! by scanning for them always sit on char boundaries.
//!
//! ```text
//! scanner.rs      balanced {} () [] matching, escapes, whitespace
//!     │
//!     ├── atom.rs         next self-contained unit (group / command / token + scripts)
//!     ├── command.rs      `\name` lookup and whole-name rewriting
//!     └── environment.rs  \begin{..} / \end{..} pairing
//! ```
//!
//! The rewrite rules in `src/rules/**` are built on top of these; only the
//! operator argument wrapper needs the full atom parser.

#[path = "markup/atom.rs"]
mod atom;
#[path = "markup/command.rs"]
mod command;
#[path = "markup/environment.rs"]
mod environment;
#[path = "markup/scanner.rs"]
mod scanner;

pub use atom::{Atom, AtomKind, parse_atom};
pub(crate) use atom::script_end;
pub use command::{Replacement, next_command, rewrite_commands};
pub use environment::pair_environments;
pub(crate) use environment::environment_name;
pub use scanner::{find_closing, match_delimiter};
pub(crate) use scanner::{is_escaped, skip_escape, skip_whitespace};
