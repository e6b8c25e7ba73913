//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use serde::Serialize;

/// Summary of one kind in a checked configuration.
#[derive(Debug, Serialize)]
pub struct KindSummary {
    /// `loose` or `strict`.
    pub scope: &'static str,
    pub kind: String,
    /// Number of true tokens.
    pub tokens: usize,
    pub aliases: usize,
    pub default: Option<String>,
}

/// Format kind summaries as a table.
pub fn format_kind_table(kinds: &[KindSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Scope", "Kind", "Tokens", "Aliases", "Default"]);

    for summary in kinds {
        table.add_row(vec![
            summary.scope.to_string(),
            summary.kind.clone(),
            summary.tokens.to_string(),
            summary.aliases.to_string(),
            summary.default.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table
}
