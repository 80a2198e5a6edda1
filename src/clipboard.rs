use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::MatchtypeError;

/// Destination for the "copy result" action.
pub trait Clipboard {
    fn copy(&self, text: &str) -> Result<(), MatchtypeError>;
}

/// The OS clipboard, reached through whichever helper tool is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

// Tried in order; the first one that exits successfully wins.
#[cfg(target_os = "macos")]
const HELPERS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const HELPERS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const HELPERS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), MatchtypeError> {
        pipe_to_first(HELPERS, text)
    }
}

/// Feed `text` to each helper in turn until one exits successfully. A helper
/// that is missing, fails to take the input, or exits non-zero is skipped.
/// Every spawned child is waited on.
fn pipe_to_first(helpers: &[(&str, &[&str])], text: &str) -> Result<(), MatchtypeError> {
    let mut last_failure = None;

    for &(program, args) in helpers {
        let Ok(mut child) = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        else {
            tracing::debug!(program, "clipboard helper not available");
            continue;
        };

        // stdin is dropped at the end of the closure so the helper sees EOF.
        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| stdin.write_all(text.as_bytes()));
        let status = child.wait();

        let reason = match (written, status) {
            (Ok(()), Ok(status)) if status.success() => {
                tracing::debug!(program, bytes = text.len(), "copied to clipboard");
                return Ok(());
            }
            (Ok(()), Ok(status)) => format!("{program} exited with {status}"),
            (Err(e), _) | (_, Err(e)) => format!("{program}: {e}"),
        };
        tracing::debug!(%reason, "clipboard helper failed");
        last_failure = Some(reason);
    }

    let reason = last_failure.unwrap_or_else(|| {
        let names: Vec<&str> = helpers.iter().map(|(p, _)| *p).collect();
        format!("no clipboard tool found (tried {})", names.join(", "))
    });
    Err(MatchtypeError::Clipboard { reason })
}
