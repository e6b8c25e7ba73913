//! Miette diagnostic wrapper for configuration load errors.

use std::path::Path;

use inflect::{ConfigError, LoadError};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for a configuration file that failed to
/// load.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(inflect::config))]
pub struct ConfigDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: Option<SourceSpan>,

    message: String,

    #[help]
    help: Option<String>,
}

impl ConfigDiagnostic {
    /// Create a diagnostic from a load error. `content` is the file text, if
    /// it could be read.
    pub fn from_load_error(path: &Path, content: &str, err: &LoadError) -> Self {
        let (span, message, help) = match err {
            LoadError::Toml { source, .. } => (
                source.span().map(|range| clamp(content, range.start, range.len())),
                format!("syntax error: {}", source.message()),
                None,
            ),
            LoadError::Json { source, .. } => (
                Some(clamp(
                    content,
                    offset(content, source.line(), source.column()),
                    1,
                )),
                format!("syntax error: {source}"),
                None,
            ),
            LoadError::Config(config) => (
                None,
                config.to_string(),
                Some(config_help(config).to_string()),
            ),
            LoadError::Io { .. } | LoadError::NoPathForReload { .. } => {
                (None, err.to_string(), None)
            }
        };

        ConfigDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message,
            help,
        }
    }
}

/// Convert a 1-based line and column to a byte offset.
fn offset(content: &str, line: usize, column: usize) -> usize {
    content
        .lines()
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + column.saturating_sub(1)
}

/// Keep spans inside the content so miette never indexes out of bounds.
fn clamp(content: &str, start: usize, len: usize) -> SourceSpan {
    let start = start.min(content.len());
    (start, len.min(content.len() - start)).into()
}

fn config_help(err: &ConfigError) -> &'static str {
    match err {
        ConfigError::BadInflectionKind { .. } => {
            "kind names must be tables of tokens and avoid reserved characters"
        }
        ConfigError::BadInflectionToken { .. } => {
            "every token needs a non-empty description; `default` is reserved"
        }
        ConfigError::BadInflectionAlias { .. } => {
            "aliases and defaults must point at a true token of the same kind"
        }
        ConfigError::DuplicatedInflectionToken { .. } => {
            "loose kinds share one namespace; move one kind under `@kind` to reuse names"
        }
    }
}
