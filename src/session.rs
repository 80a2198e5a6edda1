use std::path::Path;
use std::time::Instant;

use crate::clipboard::Clipboard;
use crate::error::MatchtypeError;
use crate::expand::expand;
use crate::export::{self, ExportOptions};
use crate::input;
use crate::notice::{COPIED_TTL, Notice, POPUP_TTL};
use crate::selection::{Selection, Toggle};
use crate::types::OutputFormat;

pub const COPIED_MESSAGE: &str = "Copied!";

/// Transient state behind one editing session: the keyword text, the
/// checkbox state, the last result and the two auto-dismissing notices.
/// Nothing here outlives the process.
#[derive(Debug, Default)]
pub struct Session {
    input: String,
    selection: Selection,
    result: Option<Vec<String>>,
    popup: Notice,
    copied: Notice,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_selection(selection: Selection) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn append_input(&mut self, line: &str) {
        if !self.input.is_empty() && !self.input.ends_with('\n') {
            self.input.push('\n');
        }
        self.input.push_str(line);
    }

    /// Replace the input with a keyword file's non-blank lines.
    pub fn load_file(&mut self, path: &Path) -> Result<(), MatchtypeError> {
        self.input = input::load_file(path)?;
        Ok(())
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle(&mut self, toggle: Toggle, checked: bool) {
        self.selection.set(toggle, checked);
    }

    /// Expand the current input with the current selection.
    ///
    /// With nothing selected the popup notice is (re)started and the previous
    /// result, if any, is left alone.
    pub fn submit(&mut self, now: Instant) -> Result<&[String], MatchtypeError> {
        match expand(&self.input, self.selection.flags()) {
            Ok(lines) => Ok(self.result.insert(lines).as_slice()),
            Err(e @ MatchtypeError::EmptySelection) => {
                self.popup.show(&e.to_string(), now, POPUP_TTL);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&[String]> {
        self.result.as_deref()
    }

    /// Back to a blank page: no input, no result, nothing checked.
    pub fn reset(&mut self) {
        self.input.clear();
        self.result = None;
        self.selection.clear();
        self.popup.dismiss();
        self.copied.dismiss();
    }

    /// Copy the result as plain text. Does nothing without a non-empty
    /// result. A refused write is logged and otherwise ignored.
    pub fn copy_result(&mut self, clipboard: &dyn Clipboard, now: Instant) -> bool {
        let Some(lines) = self.result.as_deref().filter(|l| !l.is_empty()) else {
            return false;
        };

        match clipboard.copy(&lines.join("\n")) {
            Ok(()) => {
                self.copied.show(COPIED_MESSAGE, now, COPIED_TTL);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard write failed");
                false
            }
        }
    }

    #[must_use]
    pub fn popup_visible(&self, now: Instant) -> bool {
        self.popup.is_visible(now)
    }

    #[must_use]
    pub fn popup_message(&self, now: Instant) -> Option<&str> {
        self.popup.text(now)
    }

    #[must_use]
    pub fn copy_message(&self, now: Instant) -> Option<&str> {
        self.copied.text(now)
    }

    /// Render the current result. No result renders as an empty one.
    #[must_use]
    pub fn export(&self, format: OutputFormat, opts: &ExportOptions) -> Vec<u8> {
        export::render(self.result().unwrap_or_default(), format, opts)
    }
}
