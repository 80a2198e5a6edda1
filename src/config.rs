use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MatchtypeError;
use crate::export::{CsvOptions, ExportOptions, PdfOptions};
use crate::types::{MatchType, MatchTypes, OutputFormat};

/// Written by `matchtype init`. Mirrors `Config::default()`.
pub const DEFAULT_CONFIG: &str = r#"# matchtype configuration

# Match types used when none are given on the command line.
# Any of "broad", "phrase", "exact". Empty means "ask every time".
match_types = []

# Output format when --format is not given: "text", "csv" or "pdf".
format = "text"

[csv]
# Header cell; "" for no header row.
header = "Keyword"

[pdf]
title = "Keywords"
# "letter" or "a4"
page_size = "letter"
font_size = 11.0
"#;

/// Defaults loaded from `config.toml`. Command-line flags win over these.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub match_types: Vec<MatchType>,
    pub format: OutputFormat,
    pub csv: CsvOptions,
    pub pdf: PdfOptions,
}

impl Config {
    pub fn parse(raw: &str, path: &Path) -> Result<Self, MatchtypeError> {
        let config: Self = toml::from_str(raw).map_err(|e| MatchtypeError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })?;
        // TOML accepts nan and inf as floats.
        if !config.pdf.font_size.is_finite() {
            return Err(MatchtypeError::InvalidConfig {
                path: path.to_path_buf(),
                reason: "pdf.font_size must be a finite number".into(),
            });
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, MatchtypeError> {
        let raw = fs::read_to_string(path).map_err(|e| MatchtypeError::from_io(path, e))?;
        let config = Self::parse(&raw, path)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// An explicit path must exist. Otherwise the per-user file is used when
    /// present, and built-in defaults when not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, MatchtypeError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_path() {
            Ok(path) if path.is_file() => Self::load(&path),
            Ok(_) => Ok(Self::default()),
            Err(reason) => {
                tracing::debug!(%reason, "no config location, using defaults");
                Ok(Self::default())
            }
        }
    }

    #[must_use]
    pub fn default_flags(&self) -> MatchTypes {
        self.match_types.iter().copied().collect()
    }

    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            csv: self.csv.clone(),
            pdf: self.pdf.clone(),
        }
    }
}

/// `~/.config/matchtype/config.toml`
pub fn default_path() -> Result<PathBuf, String> {
    Ok(home_dir()?.join(".config/matchtype/config.toml"))
}

/// Write the default config to `path`, refusing to clobber an existing file
/// unless `force` is set.
pub fn init(path: &Path, force: bool) -> Result<(), MatchtypeError> {
    if path.exists() && !force {
        return Err(MatchtypeError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "already exists (pass --force to overwrite)".into(),
        });
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MatchtypeError::from_io(parent, e))?;
    }
    fs::write(path, DEFAULT_CONFIG).map_err(|e| MatchtypeError::from_io(path, e))?;

    tracing::info!(path = %path.display(), "wrote default config");
    Ok(())
}

fn home_dir() -> Result<PathBuf, String> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .map_err(|_| "USERPROFILE not set".into())
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| "HOME not set".into())
    }
}
