//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Table
            } else {
                OutputFormat::Text
            }
        }
        other => other,
    }
}

/// Serialize a value as JSON or YAML
///
/// Returns `None` for formats that are not structured documents.
pub fn render_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).into_diagnostic().map(Some),
        OutputFormat::Yaml => serde_yml::to_string(value).into_diagnostic().map(Some),
        _ => Ok(None),
    }
}

/// Render rows as CSV or TSV with a header row
pub fn render_delimited(header: &[&str], rows: &[Vec<String>], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(header).into_diagnostic()?;
    for row in rows {
        writer.write_record(row).into_diagnostic()?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| miette::miette!("{}", e.error()))?;
    String::from_utf8(bytes).into_diagnostic()
}

/// Render rows as a rounded box table
pub fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(header.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row.iter().cloned());
    }
    let mut table = builder.build();
    table.with(tabled::settings::Style::rounded());
    table.to_string()
}
