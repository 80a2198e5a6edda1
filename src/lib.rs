#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,  // PDF coordinates: f32 → usize line counts
    clippy::cast_sign_loss,            // same
    clippy::cast_precision_loss,       // same
    clippy::module_name_repetitions,   // Rust naming conventions
    clippy::struct_excessive_bools,    // CLI struct derives clap
    clippy::missing_errors_doc,        // every error is a MatchtypeError, documented there
    clippy::missing_panics_doc,        // same
)]

pub mod clipboard;
pub mod config;
pub mod error;
pub mod expand;
pub mod export;
pub mod input;
pub(crate) mod notice;
pub mod selection;
pub mod session;
pub mod shell;
pub mod types;

use error::MatchtypeError;
use export::ExportOptions;
use types::{MatchTypes, OutputFormat};

pub use expand::{expand, keyword_list};

/// The single public pipeline. Everything a one-shot invocation does flows
/// through here: expand → render in the requested format.
pub fn run(
    raw: &str,
    flags: MatchTypes,
    format: OutputFormat,
    opts: &ExportOptions,
) -> Result<Vec<u8>, MatchtypeError> {
    let lines = expand(raw, flags)?;
    tracing::info!(
        keywords = lines.len() / flags.count(),
        match_types = flags.count(),
        %format,
        "expanded"
    );
    Ok(export::render(&lines, format, opts))
}
