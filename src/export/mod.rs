pub mod csv;
pub mod pdf;

use crate::types::OutputFormat;

pub use self::csv::CsvOptions;
pub use self::pdf::{PageSize, PdfOptions};

/// Per-format rendering knobs, normally filled from the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    pub csv: CsvOptions,
    pub pdf: PdfOptions,
}

/// Render an expansion result in the requested format.
pub fn render(lines: &[String], format: OutputFormat, opts: &ExportOptions) -> Vec<u8> {
    let bytes = match format {
        OutputFormat::Text => text(lines).into_bytes(),
        OutputFormat::Csv => csv::render(lines, &opts.csv),
        OutputFormat::Pdf => pdf::render(lines, &opts.pdf),
    };
    tracing::debug!(%format, lines = lines.len(), bytes = bytes.len(), "rendered export");
    bytes
}

/// Plain text: one result per line, trailing newline when non-empty.
#[must_use]
pub fn text(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// File name offered for a download of `format`.
#[must_use]
pub fn default_file_name(format: OutputFormat) -> String {
    format!("keywords.{}", format.extension())
}
