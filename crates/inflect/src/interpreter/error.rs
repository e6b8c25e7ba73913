//! Error types for inflection configuration and resolution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors in a locale's inflection configuration.
///
/// These are raised whenever a database is built, independent of the
/// `raises` option: a corrupt configuration is never accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Kind name is empty, reserved, or not a token map.
    #[error("bad inflection kind '{kind}' in locale '{locale}'")]
    BadInflectionKind { locale: String, kind: String },

    /// Token name is invalid or its description is missing or empty.
    #[error("bad inflection token '{token}' of kind '{kind}' in locale '{locale}'{}",
        .description.as_ref().map(|d| format!(" (value: {d:?})")).unwrap_or_default())]
    BadInflectionToken {
        locale: String,
        kind: String,
        token: String,
        description: Option<String>,
    },

    /// Alias or default points at something that is not a true token of the kind.
    #[error("bad alias '{alias}' -> '{target}' for kind '{kind}' in locale '{locale}'")]
    BadInflectionAlias {
        locale: String,
        kind: String,
        alias: String,
        target: String,
    },

    /// Token or alias name already used in the same namespace.
    #[error(
        "duplicated token '{token}' of kind '{kind}' in locale '{locale}' (already defined for kind '{original_kind}')"
    )]
    DuplicatedInflectionToken {
        locale: String,
        kind: String,
        token: String,
        original_kind: String,
    },
}

/// Errors that occur while loading configuration files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a configuration file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// TOML syntax or schema error.
    #[error("{path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// JSON syntax or schema error.
    #[error("{path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration decoded but describes invalid inflections.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reload requested for a locale that was not loaded from a file.
    #[error("no configuration file recorded for locale '{locale}'")]
    NoPathForReload { locale: String },
}

/// An error raised while resolving a pattern block.
///
/// These are only returned when the `raises` option is enabled; otherwise the
/// block degrades to its free text (or the empty string).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InflectionError {
    /// The block names an unknown kind, or no kind could be inferred.
    #[error("unknown inflection kind '{kind}' in pattern '{pattern}'{}",
        format_suggestions(.suggestions))]
    InvalidInflectionKind {
        pattern: String,
        kind: String,
        suggestions: Vec<String>,
    },

    /// A token spec in the block is malformed or names no known token.
    #[error("invalid token '{token}' in pattern '{pattern}'")]
    InvalidInflectionToken {
        pattern: String,
        token: String,
        kind: Option<String>,
    },

    /// A token spec names a token of a different kind than the block's.
    #[error("token '{token}' in pattern '{pattern}' does not belong to kind '{kind}'")]
    MisplacedInflectionToken {
        pattern: String,
        token: String,
        kind: String,
    },

    /// No option was given for the kind and the kind has no default token.
    #[error("no option given for kind '{kind}' in pattern '{pattern}' and no default token")]
    InflectionOptionNotFound { pattern: String, kind: String },

    /// The option given for the kind is empty, nil, or not a token of the kind.
    #[error("invalid option {value:?} for kind '{kind}' in pattern '{pattern}'")]
    InvalidInflectionOption {
        pattern: String,
        kind: String,
        value: Option<String>,
    },

    /// A complex block has an alternative whose token groups do not line up
    /// with its kinds.
    #[error("malformed complex pattern '{pattern}'")]
    ComplexPatternMalformed { pattern: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute "did you mean" suggestions for an unknown name.
///
/// Uses Levenshtein distance, allowing one edit for names of up to three
/// characters and two edits otherwise. Returns at most three names, closest
/// first.
pub fn compute_suggestions(name: &str, available: &[String]) -> Vec<String> {
    let max_distance = if name.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (strsim::levenshtein(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
