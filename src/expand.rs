use crate::error::MatchtypeError;
use crate::types::MatchTypes;

/// Split on `\n`, trim, drop blank lines. Order and duplicates are kept.
///
/// Line boundaries come from a memchr scan so a pasted list of a few thousand
/// keywords is one SIMD pass.
#[must_use]
pub fn keyword_list(raw: &str) -> Vec<&str> {
    let buf = raw.as_bytes();
    let mut keywords = Vec::new();
    let mut pos = 0;

    while pos <= buf.len() {
        let line_end = memchr::memchr(b'\n', &buf[pos..]).map_or(buf.len(), |i| pos + i);
        // `\n` is ASCII, so both ends are char boundaries.
        let line = raw[pos..line_end].trim();
        if !line.is_empty() {
            keywords.push(line);
        }
        pos = line_end + 1;
    }

    keywords
}

/// Expand every keyword into its enabled match-type variants.
///
/// Per keyword: broad, then phrase, then exact. Fails with
/// [`MatchtypeError::EmptySelection`] before touching the text when no flag is
/// set. A blank input is not an error: it yields an empty result.
pub fn expand(raw: &str, flags: MatchTypes) -> Result<Vec<String>, MatchtypeError> {
    if flags.is_empty() {
        return Err(MatchtypeError::EmptySelection);
    }

    let keywords = keyword_list(raw);
    let mut out = Vec::with_capacity(keywords.len() * flags.count());

    for keyword in keywords {
        for kind in flags.enabled() {
            out.push(kind.apply(keyword));
        }
    }

    tracing::debug!(lines = out.len(), "expanded keywords");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchType;

    fn flags(broad: bool, phrase: bool, exact: bool) -> MatchTypes {
        MatchTypes {
            broad,
            phrase,
            exact,
        }
    }

    #[test]
    fn keyword_list_trims_and_drops_blanks() {
        let list = keyword_list("  alpha \n\n\t\nbeta\r\n gamma delta ");
        assert_eq!(list, vec!["alpha", "beta", "gamma delta"]);
    }

    #[test]
    fn keyword_list_keeps_duplicates_and_order() {
        assert_eq!(keyword_list("b\na\nb"), vec!["b", "a", "b"]);
    }

    #[test]
    fn keyword_list_edges() {
        assert!(keyword_list("").is_empty());
        assert!(keyword_list("\n\n   \n").is_empty());
        assert_eq!(keyword_list("\nonly\n"), vec!["only"]);
        assert_eq!(keyword_list("café au lait\n"), vec!["café au lait"]);
    }

    #[test]
    fn no_flags_is_empty_selection() {
        for raw in ["", "foo", "foo\nbar\n"] {
            let err = expand(raw, MatchTypes::default()).unwrap_err();
            assert!(matches!(err, MatchtypeError::EmptySelection), "{raw:?}");
        }
    }

    #[test]
    fn empty_text_is_not_an_error() {
        assert!(expand("", flags(true, false, false)).unwrap().is_empty());
        assert!(expand(" \n \n", MatchTypes::all()).unwrap().is_empty());
    }

    #[test]
    fn broad_before_phrase_per_keyword() {
        let out = expand("foo\n\nbar \n", flags(true, true, false)).unwrap();
        assert_eq!(out, vec!["foo", "\"foo\"", "bar", "\"bar\""]);
    }

    #[test]
    fn exact_only() {
        assert_eq!(expand("x", flags(false, false, true)).unwrap(), vec!["[x]"]);
    }

    #[test]
    fn all_three_per_keyword() {
        let out = expand("red shoes\nblue hat", MatchTypes::all()).unwrap();
        assert_eq!(
            out,
            vec![
                "red shoes",
                "\"red shoes\"",
                "[red shoes]",
                "blue hat",
                "\"blue hat\"",
                "[blue hat]",
            ]
        );
    }

    #[test]
    fn length_is_keywords_times_flags() {
        let raw = "a\n b \n\nc\n\n d";
        for bits in 1u8..8 {
            let f = flags(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let out = expand(raw, f).unwrap();
            assert_eq!(out.len(), 4 * f.count(), "flags {f:?}");
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let f = flags(false, true, true);
        let first = expand("one\ntwo", f).unwrap();
        let second = expand("one\ntwo", f).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn variants_match_type_apply() {
        let out = expand("kw", flags(false, true, false)).unwrap();
        assert_eq!(out, vec![MatchType::Phrase.apply("kw")]);
    }
}
