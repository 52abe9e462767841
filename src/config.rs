//! Normalizer configuration.
//!
//! Every name set the rules consult lives here as immutable data, so a
//! [`Pipeline`](crate::Pipeline) can be built with a smaller or larger
//! vocabulary without touching rule logic.
//!
//! ```text
//! Config::default()          built-in sets
//! Config::builder()...build() overrides, validated
//! Config::from_json_str(..)  partial JSON; missing keys keep their defaults
//! ```
//!
//! Names are bare command names (`"lim"`, not `"\\lim"`); a single leading
//! backslash is accepted and stripped for convenience.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Operators whose trailing operand gets an explicit group.
pub const DEFAULT_OPERATORS: &[&str] = &["lim", "liminf", "limsup", "max", "min", "sup", "inf", "argmax", "argmin"];

/// Greek-letter commands that must not dangle at the end of a formula.
pub const DEFAULT_GREEK_LETTERS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "varepsilon", "zeta", "eta", "theta", "vartheta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "pi", "varpi", "rho", "varrho", "sigma", "varsigma", "tau", "upsilon", "phi",
    "varphi", "chi", "psi", "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi",
    "Psi", "Omega",
];

/// Accent-like commands that need a visible base when applied to `{}`.
pub const DEFAULT_DECORATIONS: &[&str] = &[
    "bar",
    "hat",
    "tilde",
    "vec",
    "dot",
    "ddot",
    "check",
    "breve",
    "acute",
    "grave",
    "overline",
    "underline",
    "widehat",
    "widetilde",
    "overrightarrow",
    "overleftarrow",
];

/// Command synonyms, `from -> to`.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[("tfrac", "frac"), ("dfrac", "frac"), ("qed", "blacksquare")];

/// Base inserted under a decoration applied to an empty group.
pub const DEFAULT_PLACEHOLDER: &str = r"\phantom{x}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{set} contains an empty command name")]
    EmptyName { set: &'static str },

    #[error("{set} entry '{name}' is not a command name (ASCII letters only)")]
    InvalidName { set: &'static str, name: String },

    #[error("placeholder must not be empty")]
    EmptyPlaceholder,

    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable rule vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    operators: BTreeSet<String>,
    greek_letters: BTreeSet<String>,
    decorations: BTreeSet<String>,
    aliases: BTreeMap<String, String>,
    placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            operators: owned_set(DEFAULT_OPERATORS),
            greek_letters: owned_set(DEFAULT_GREEK_LETTERS),
            decorations: owned_set(DEFAULT_DECORATIONS),
            aliases: DEFAULT_ALIASES.iter().map(|(from, to)| (from.to_string(), to.to_string())).collect(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl Config {
    /// Start from the default sets.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder { config: Config::default() }
    }

    /// Parse a (possibly partial) JSON config.
    ///
    /// ```json
    /// { "operators": ["lim", "max"], "placeholder": "\\square" }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.into_builder().build()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&json)
    }

    pub fn is_operator(&self, name: &str) -> bool {
        self.operators.contains(name)
    }

    pub fn is_greek_letter(&self, name: &str) -> bool {
        self.greek_letters.contains(name)
    }

    pub fn is_decoration(&self, name: &str) -> bool {
        self.decorations.contains(name)
    }

    /// Replacement name for an aliased command.
    pub fn alias_for(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn operators(&self) -> impl Iterator<Item = &str> {
        self.operators.iter().map(String::as_str)
    }
}

/// Builder for [`Config`]; each setter replaces the whole set.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn operators<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.operators = collect_names(names);
        self
    }

    pub fn greek_letters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.greek_letters = collect_names(names);
        self
    }

    pub fn decorations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.decorations = collect_names(names);
        self
    }

    pub fn aliases<I, A, B>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        self.config.aliases =
            pairs.into_iter().map(|(from, to)| (bare_name(from.as_ref()), bare_name(to.as_ref()))).collect();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = placeholder.into();
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let config = self.config;
        validate_names("operators", config.operators.iter())?;
        validate_names("greek_letters", config.greek_letters.iter())?;
        validate_names("decorations", config.decorations.iter())?;
        validate_names("aliases", config.aliases.iter().flat_map(|(from, to)| [from, to]))?;
        if config.placeholder.trim().is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }
        Ok(config)
    }
}

/// On-disk shape: every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    operators: Option<Vec<String>>,
    greek_letters: Option<Vec<String>>,
    decorations: Option<Vec<String>>,
    aliases: Option<BTreeMap<String, String>>,
    placeholder: Option<String>,
}

impl ConfigFile {
    fn into_builder(self) -> ConfigBuilder {
        let mut builder = Config::builder();
        if let Some(names) = self.operators {
            builder = builder.operators(names);
        }
        if let Some(names) = self.greek_letters {
            builder = builder.greek_letters(names);
        }
        if let Some(names) = self.decorations {
            builder = builder.decorations(names);
        }
        if let Some(pairs) = self.aliases {
            builder = builder.aliases(pairs);
        }
        if let Some(placeholder) = self.placeholder {
            builder = builder.placeholder(placeholder);
        }
        builder
    }
}

fn owned_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn bare_name(name: &str) -> String {
    let name = name.trim();
    name.strip_prefix('\\').unwrap_or(name).to_string()
}

fn collect_names<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|n| bare_name(n.as_ref())).collect()
}

fn validate_names<'a>(set: &'static str, names: impl Iterator<Item = &'a String>) -> Result<(), ConfigError> {
    for name in names {
        if name.is_empty() {
            return Err(ConfigError::EmptyName { set });
        }
        if !name.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidName { set, name: name.clone() });
        }
    }
    Ok(())
}
