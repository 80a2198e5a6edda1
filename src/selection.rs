use std::str::FromStr;

use crate::types::{MatchType, MatchTypes};

/// One checkbox in the selector: the three match types plus "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    All,
    Only(MatchType),
}

impl FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Match-type checkboxes as the user sees them.
///
/// Checking "all" forces the three types to the same state. Unchecking any
/// single type clears "all". Checking the three one by one does not set
/// "all" again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    all: bool,
    flags: MatchTypes,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection with the given types checked and "all" left unchecked.
    #[must_use]
    pub fn with_flags(flags: MatchTypes) -> Self {
        Self { all: false, flags }
    }

    pub fn set(&mut self, toggle: Toggle, checked: bool) {
        match toggle {
            Toggle::All => {
                self.all = checked;
                self.flags = if checked {
                    MatchTypes::all()
                } else {
                    MatchTypes::default()
                };
            }
            Toggle::Only(kind) => {
                self.flags.set(kind, checked);
                if !checked {
                    self.all = false;
                }
            }
        }
    }

    #[must_use]
    pub fn is_checked(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::All => self.all,
            Toggle::Only(kind) => self.flags.is_enabled(kind),
        }
    }

    /// The flags the expander sees. "all" has already been folded in by `set`.
    #[must_use]
    pub fn flags(&self) -> MatchTypes {
        self.flags
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = |on: bool| if on { 'x' } else { ' ' };
        write!(f, "[{}] all", mark(self.all))?;
        for kind in MatchType::ALL {
            write!(f, "  [{}] {kind}", mark(self.flags.is_enabled(kind)))?;
        }
        Ok(())
    }
}
