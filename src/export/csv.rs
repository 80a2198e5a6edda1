//! RFC 4180 CSV: one result per row, CRLF line endings.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvOptions {
    /// Header cell. Empty string → no header row.
    pub header: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            header: "Keyword".into(),
        }
    }
}

pub fn render(lines: &[String], opts: &CsvOptions) -> Vec<u8> {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 4).sum::<usize>() + 16);

    if !opts.header.is_empty() {
        push_field(&mut out, &opts.header);
        out.push_str("\r\n");
    }
    for line in lines {
        push_field(&mut out, line);
        out.push_str("\r\n");
    }

    out.into_bytes()
}

fn push_field(out: &mut String, field: &str) {
    if field.contains(['"', ',', '\r', '\n']) {
        out.push('"');
        for c in field.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    } else {
        out.push_str(field);
    }
}
