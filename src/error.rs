use std::path::PathBuf;

/// Every error matchtype can produce. Displayed as user-facing messages.
#[derive(Debug)]
pub enum MatchtypeError {
    /// Submitted with broad, phrase and exact all unset.
    EmptySelection,
    NotFound {
        path: PathBuf,
    },
    PermissionDenied {
        path: PathBuf,
    },
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidInput {
        path: PathBuf,
        reason: String,
    },
    InvalidConfig {
        path: PathBuf,
        reason: String,
    },
    /// The CLI and shell only log this one; it never ends a run.
    Clipboard {
        reason: String,
    },
}

impl std::fmt::Display for MatchtypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySelection => write!(f, "no match type selected"),
            Self::NotFound { path } => write!(f, "not found: {}", path.display()),
            Self::PermissionDenied { path } => {
                write!(f, "{} [permission denied]", path.display())
            }
            Self::IoError { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            Self::InvalidInput { path, reason } => {
                write!(f, "cannot read keywords from {}: {reason}", path.display())
            }
            Self::InvalidConfig { path, reason } => {
                write!(f, "invalid config {}: {reason}", path.display())
            }
            Self::Clipboard { reason } => write!(f, "failed to copy: {reason}"),
        }
    }
}

impl std::error::Error for MatchtypeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl MatchtypeError {
    /// Process exit code for the CLI. `Clipboard` maps to 1 for library
    /// callers; the binary itself never exits on a copy failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Clipboard { .. } => 1,
            Self::NotFound { .. } | Self::IoError { .. } => 2,
            Self::EmptySelection | Self::InvalidInput { .. } | Self::InvalidConfig { .. } => 3,
            Self::PermissionDenied { .. } => 4,
        }
    }

    /// Map an `io::Error` on `path` to the matching variant.
    pub fn from_io(path: &std::path::Path, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::IoError {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }
}
