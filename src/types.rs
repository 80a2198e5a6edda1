use std::str::FromStr;

use serde::Deserialize;

/// Search-engine match type. Order of the variants is the emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Broad,
    Phrase,
    Exact,
}

impl MatchType {
    pub const ALL: [MatchType; 3] = [Self::Broad, Self::Phrase, Self::Exact];

    /// Decorate a keyword for this match type.
    #[must_use]
    pub fn apply(self, keyword: &str) -> String {
        match self {
            Self::Broad => keyword.to_string(),
            Self::Phrase => format!("\"{keyword}\""),
            Self::Exact => format!("[{keyword}]"),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Broad => "broad",
            Self::Phrase => "phrase",
            Self::Exact => "exact",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "broad" => Ok(Self::Broad),
            "phrase" => Ok(Self::Phrase),
            "exact" => Ok(Self::Exact),
            other => Err(format!(
                "unknown match type \"{other}\" (expected broad, phrase or exact)"
            )),
        }
    }
}

/// The three independent flags handed to the expander. The UI-only "all"
/// flag lives in [`crate::selection::Selection`] and is resolved before this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchTypes {
    pub broad: bool,
    pub phrase: bool,
    pub exact: bool,
}

impl MatchTypes {
    #[must_use]
    pub fn all() -> Self {
        Self {
            broad: true,
            phrase: true,
            exact: true,
        }
    }

    #[must_use]
    pub fn is_enabled(self, kind: MatchType) -> bool {
        match kind {
            MatchType::Broad => self.broad,
            MatchType::Phrase => self.phrase,
            MatchType::Exact => self.exact,
        }
    }

    pub fn set(&mut self, kind: MatchType, on: bool) {
        match kind {
            MatchType::Broad => self.broad = on,
            MatchType::Phrase => self.phrase = on,
            MatchType::Exact => self.exact = on,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.broad || self.phrase || self.exact)
    }

    /// Enabled types in emission order: broad, phrase, exact.
    pub fn enabled(self) -> impl Iterator<Item = MatchType> {
        MatchType::ALL
            .into_iter()
            .filter(move |&kind| self.is_enabled(kind))
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.enabled().count()
    }
}

impl FromIterator<MatchType> for MatchTypes {
    fn from_iter<I: IntoIterator<Item = MatchType>>(iter: I) -> Self {
        let mut flags = Self::default();
        for kind in iter {
            flags.set(kind, true);
        }
        flags
    }
}

/// Export payload kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Pdf,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }

    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Csv => "text/csv",
            Self::Pdf => "application/pdf",
        }
    }

    /// Formats that should not be dumped raw onto a terminal.
    #[must_use]
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Pdf)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!(
                "unknown format \"{other}\" (expected text, csv or pdf)"
            )),
        }
    }
}
