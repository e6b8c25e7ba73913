//! Implementation of the `inflect check` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use inflect::{InflectionConfig, InflectionData, LoadError, Scope};
use miette::{IntoDiagnostic, Report};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::output::ConfigDiagnostic;
use crate::output::table::{KindSummary, format_kind_table};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Configuration files to check (.toml or .json). The file stem is used
    /// as the locale.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    locale: String,
    error: Option<String>,
    kinds: Vec<KindSummary>,
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::with_capacity(args.files.len());
    let mut failed = false;

    for path in &args.files {
        let locale = locale_of(path);
        let report = match load(path, &locale) {
            Ok(data) => FileReport {
                file: path.display().to_string(),
                locale,
                error: None,
                kinds: summarize(&data),
            },
            Err(err) => {
                failed = true;
                if !args.json {
                    let content = read_to_string(path).unwrap_or_default();
                    let diagnostic = ConfigDiagnostic::from_load_error(path, &content, &err);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                FileReport {
                    file: path.display().to_string(),
                    locale,
                    error: Some(err.to_string()),
                    kinds: Vec::new(),
                }
            }
        };
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    } else {
        for report in reports.iter().filter(|r| r.error.is_none()) {
            println!(
                "{} {} ({})",
                "ok".if_supports_color(Stream::Stdout, |t| t.green()),
                report.file.if_supports_color(Stream::Stdout, |t| t.bold()),
                report.locale
            );
            if !report.kinds.is_empty() {
                println!("{}", format_kind_table(&report.kinds));
            }
        }
    }

    if failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn locale_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn load(path: &Path, locale: &str) -> Result<InflectionData, LoadError> {
    let config = InflectionConfig::from_path(path)?;
    Ok(InflectionData::from_config(locale, &config)?)
}

fn summarize(data: &InflectionData) -> Vec<KindSummary> {
    let mut kinds = Vec::new();
    for (scope, label) in [(Scope::Loose, "loose"), (Scope::Strict, "strict")] {
        let view = data.view(scope);
        for kind in view.kinds() {
            let Some(table) = view.table(kind) else {
                continue;
            };
            kinds.push(KindSummary {
                scope: label,
                kind: kind.to_string(),
                tokens: table.true_tokens().len(),
                aliases: table.aliases().len(),
                default: table.default_token().map(ToString::to_string),
            });
        }
    }
    kinds
}
