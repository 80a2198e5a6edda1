use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::clipboard::Clipboard;
use crate::error::MatchtypeError;
use crate::export::{self, ExportOptions};
use crate::selection::Toggle;
use crate::session::Session;
use crate::types::OutputFormat;

const HELP: &str = "\
Type keywords, one per line. Commands start with ':'.
  :all|:broad|:phrase|:exact [on|off]   check, uncheck or flip a match type
  :go                                   expand the keywords
  :show                                 current selection and keyword count
  :load PATH                            replace the keywords with a file
  :copy                                 copy the result to the clipboard
  :save text|csv|pdf [PATH]             write the result to a file
  :reset                                clear keywords, result and selection
  :help                                 this text
  :quit                                 leave";

/// Interactive loop over `reader`. Plain lines are keywords; `:` lines are
/// commands. Command failures are reported inline and never end the loop.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    clipboard: &dyn Clipboard,
    opts: &ExportOptions,
    reader: R,
    out: &mut W,
) -> io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        let Some(command) = line.strip_prefix(':') else {
            session.append_input(&line);
            continue;
        };

        // Everything after the command name is one argument string, so paths
        // with spaces survive.
        let command = command.trim();
        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, rest)| (name, rest.trim()));

        match name {
            "quit" | "q" => break,
            "help" | "h" => writeln!(out, "{HELP}")?,
            "go" => submit(session, out)?,
            "show" => {
                let count = crate::expand::keyword_list(session.input()).len();
                writeln!(out, "{}", session.selection())?;
                writeln!(out, "{count} keywords")?;
            }
            "reset" => {
                session.reset();
                writeln!(out, "cleared")?;
            }
            "copy" => {
                let now = Instant::now();
                if session.copy_result(clipboard, now) {
                    let msg = session.copy_message(now).unwrap_or_default();
                    writeln!(out, "{msg}")?;
                } else if session.result().is_none_or(<[String]>::is_empty) {
                    writeln!(out, "! nothing to copy")?;
                } else {
                    writeln!(out, "! copy failed")?;
                }
            }
            "load" if rest.is_empty() => writeln!(out, "! usage: :load PATH")?,
            "load" => match session.load_file(Path::new(rest)) {
                Ok(()) => writeln!(out, "loaded {rest}")?,
                Err(e) => writeln!(out, "! {e}")?,
            },
            "save" => save(session, opts, rest, out)?,
            _ => match name.parse::<Toggle>() {
                Ok(toggle) => {
                    let checked = match rest.split_whitespace().next() {
                        Some("on") => true,
                        Some("off") => false,
                        None => !session.selection().is_checked(toggle),
                        Some(other) => {
                            writeln!(out, "! expected on or off, got \"{other}\"")?;
                            continue;
                        }
                    };
                    session.toggle(toggle, checked);
                    writeln!(out, "{}", session.selection())?;
                }
                Err(_) => writeln!(out, "! unknown command :{name} (try :help)")?,
            },
        }
        out.flush()?;
    }

    Ok(())
}

fn submit<W: Write>(session: &mut Session, out: &mut W) -> io::Result<()> {
    let now = Instant::now();
    match session.submit(now) {
        Ok(lines) => {
            for line in lines {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
        Err(MatchtypeError::EmptySelection) => {
            let msg = session.popup_message(now).unwrap_or_default();
            writeln!(out, "! {msg}")
        }
        Err(e) => writeln!(out, "! {e}"),
    }
}

fn save<W: Write>(
    session: &Session,
    opts: &ExportOptions,
    args: &str,
    out: &mut W,
) -> io::Result<()> {
    let (format, path) = args
        .split_once(char::is_whitespace)
        .map_or((args, ""), |(format, path)| (format, path.trim()));
    if format.is_empty() {
        return writeln!(out, "! usage: :save text|csv|pdf [PATH]");
    }
    let format: OutputFormat = match format.parse() {
        Ok(f) => f,
        Err(e) => return writeln!(out, "! {e}"),
    };
    if session.result().is_none() {
        return writeln!(out, "! nothing to save (run :go first)");
    }

    let path = if path.is_empty() {
        PathBuf::from(export::default_file_name(format))
    } else {
        PathBuf::from(path)
    };
    let bytes = session.export(format, opts);
    match std::fs::write(&path, &bytes) {
        Ok(()) => writeln!(out, "saved {} bytes to {}", bytes.len(), path.display()),
        Err(e) => writeln!(out, "! {}", MatchtypeError::from_io(&path, e)),
    }
}
