//! Implementation of the `inflect eval` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use inflect::{InflectionArgs, Inflector, OptionOverrides, Value};
use miette::{IntoDiagnostic, Report};
use serde::Serialize;

use crate::output::ConfigDiagnostic;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Locale to resolve in
    #[arg(long, required = true)]
    pub locale: String,

    /// Inflection configuration for the locale (.toml or .json)
    #[arg(long, required = true)]
    pub config: PathBuf,

    /// String with inflection patterns to resolve
    #[arg(long, required = true)]
    pub text: String,

    /// Options in kind=value format (repeatable). Use `@kind=value` for
    /// named kinds and `kind` alone for an explicit nil.
    #[arg(short = 'a', long = "arg", value_parser = parse_arg)]
    pub args: Vec<(String, Option<String>)>,

    /// Fail on the first resolution error
    #[arg(long)]
    pub raises: bool,

    /// Use free text instead of the default token for unknown values
    #[arg(long)]
    pub no_unknown_defaults: bool,

    /// Replace tokens no alternative mentions with the default token
    #[arg(long)]
    pub excluded_defaults: bool,

    /// Let alias names select alternatives
    #[arg(long)]
    pub aliased_patterns: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
struct EvalResult {
    result: String,
}

/// Parse a `kind=value` argument. A bare `kind` means nil.
fn parse_arg(s: &str) -> Result<(String, Option<String>), String> {
    match s.split_once('=') {
        Some(("", _)) => Err(format!("invalid argument '{s}': expected kind=value")),
        Some((kind, value)) => Ok((kind.to_string(), Some(value.to_string()))),
        None if s.is_empty() => Err("empty argument".to_string()),
        None => Ok((s.to_string(), None)),
    }
}

impl EvalArgs {
    fn overrides(&self) -> OptionOverrides {
        OptionOverrides::builder()
            .raises(self.raises)
            .unknown_defaults(!self.no_unknown_defaults)
            .excluded_defaults(self.excluded_defaults)
            .aliased_patterns(self.aliased_patterns)
            .build()
    }

    fn inflection_args(&self) -> InflectionArgs {
        self.args
            .iter()
            .map(|(kind, value)| (kind.clone(), Value::from(value.clone())))
            .collect()
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let mut inflector = Inflector::new();
    if let Err(err) = inflector.load_path(&args.locale, &args.config) {
        let content = read_to_string(&args.config).unwrap_or_default();
        return Err(ConfigDiagnostic::from_load_error(&args.config, &content, &err).into());
    }

    match inflector.interpolate(
        &args.text,
        &args.locale,
        &args.inflection_args(),
        args.overrides(),
    ) {
        Ok(result) => {
            if args.json {
                let output = EvalResult { result };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({ "error": e.to_string() });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("{:?}", Report::msg(e.to_string()));
            }
            Ok(exitcode::DATAERR)
        }
    }
}
