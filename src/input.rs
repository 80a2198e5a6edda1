use std::fs;
use std::io::{self, Read};
use std::path::Path;

use memmap2::Mmap;

use crate::error::MatchtypeError;

/// Any null byte in the first 512 bytes → binary.
fn is_binary(buf: &[u8]) -> bool {
    let window = &buf[..buf.len().min(512)];
    memchr::memchr(0, window).is_some()
}

/// Load a keyword file, one keyword per line.
///
/// Lines that are blank after trimming are dropped. The rest are kept as
/// written (trimming happens later, in the expander) and rejoined with `\n`.
pub fn load_file(path: &Path) -> Result<String, MatchtypeError> {
    let meta = fs::metadata(path).map_err(|e| MatchtypeError::from_io(path, e))?;

    if meta.is_dir() {
        return Err(MatchtypeError::InvalidInput {
            path: path.to_path_buf(),
            reason: "is a directory".into(),
        });
    }

    // Empty check before mmap — mmap on 0-byte file may fail on some platforms
    if meta.len() == 0 {
        tracing::debug!(path = %path.display(), "empty keyword file");
        return Ok(String::new());
    }

    let file = fs::File::open(path).map_err(|e| MatchtypeError::from_io(path, e))?;
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| MatchtypeError::from_io(path, e))?;
    let buf = &mmap[..];

    if is_binary(buf) {
        return Err(MatchtypeError::InvalidInput {
            path: path.to_path_buf(),
            reason: "binary file".into(),
        });
    }

    let text = std::str::from_utf8(buf).map_err(|e| MatchtypeError::InvalidInput {
        path: path.to_path_buf(),
        reason: format!("not valid UTF-8 ({e})"),
    })?;

    let kept = non_blank_lines(text);
    tracing::info!(path = %path.display(), lines = kept.len(), "loaded keyword file");
    Ok(kept.join("\n"))
}

/// Read all of stdin as keyword text.
pub fn read_stdin() -> Result<String, MatchtypeError> {
    let mut text = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut text)
        .map_err(|e| MatchtypeError::from_io(Path::new("<stdin>"), e))?;
    Ok(text)
}

fn non_blank_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect()
}
