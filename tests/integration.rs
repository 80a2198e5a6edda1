//! Integration tests exercising the public `run()` pipeline and a full
//! session, the way the command line and the interactive shell use them.

use std::cell::RefCell;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use matchtype::clipboard::Clipboard;
use matchtype::error::MatchtypeError;
use matchtype::export::{ExportOptions, PageSize, PdfOptions};
use matchtype::selection::Toggle;
use matchtype::session::Session;
use matchtype::types::{MatchType, MatchTypes, OutputFormat};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn flags(broad: bool, phrase: bool, exact: bool) -> MatchTypes {
    MatchTypes {
        broad,
        phrase,
        exact,
    }
}

fn run_text(raw: &str, f: MatchTypes) -> String {
    let bytes = matchtype::run(raw, f, OutputFormat::Text, &ExportOptions::default()).unwrap();
    String::from_utf8(bytes).unwrap()
}

#[derive(Default)]
struct RecordingClipboard {
    copied: RefCell<Vec<String>>,
}

impl Clipboard for RecordingClipboard {
    fn copy(&self, text: &str) -> Result<(), MatchtypeError> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Expansion through run()
// ---------------------------------------------------------------------------

#[test]
fn text_output_trims_and_orders() {
    let out = run_text("foo\n\nbar \n", flags(true, true, false));
    assert_eq!(out, "foo\n\"foo\"\nbar\n\"bar\"\n");
}

#[test]
fn no_match_type_is_an_error_whatever_the_text() {
    for raw in ["", "kw", "a\nb\nc"] {
        let err = matchtype::run(
            raw,
            MatchTypes::default(),
            OutputFormat::Csv,
            &ExportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MatchtypeError::EmptySelection), "{raw:?}");
        assert_eq!(err.exit_code(), 3);
    }
}

#[test]
fn blank_input_yields_empty_output() {
    assert_eq!(run_text("", flags(true, false, false)), "");
    assert_eq!(run_text("\n  \n", MatchTypes::all()), "");
}

// ---------------------------------------------------------------------------
// File input → export
// ---------------------------------------------------------------------------

/// The fixture has two blank lines, a CRLF line with padding, and a keyword
/// containing a comma. Four keywords survive.
#[test]
fn fixture_file_to_csv() {
    let raw = matchtype::input::load_file(&fixture("keywords.txt")).unwrap();
    assert_eq!(matchtype::keyword_list(&raw).len(), 4);

    let bytes = matchtype::run(
        &raw,
        flags(false, true, true),
        OutputFormat::Csv,
        &ExportOptions::default(),
    )
    .unwrap();
    let csv = String::from_utf8(bytes).unwrap();
    let rows: Vec<&str> = csv.split("\r\n").collect();

    assert_eq!(rows[0], "Keyword");
    assert_eq!(rows[1], "\"\"\"running shoes\"\"\"");
    assert_eq!(rows[2], "[running shoes]");
    assert_eq!(rows[3], "\"\"\"trail running shoes\"\"\"");
    assert_eq!(rows[7], "\"\"\"kids shoes, size 4\"\"\"");
    assert_eq!(rows[8], "\"[kids shoes, size 4]\"");
    // 1 header + 8 rows + trailing empty after last CRLF
    assert_eq!(rows.len(), 10);
}

#[test]
fn fixture_file_to_pdf() {
    let raw = matchtype::input::load_file(&fixture("keywords.txt")).unwrap();
    let opts = ExportOptions {
        pdf: PdfOptions {
            title: "Spring campaign".into(),
            page_size: PageSize::A4,
            ..PdfOptions::default()
        },
        ..ExportOptions::default()
    };
    let pdf = matchtype::run(&raw, MatchTypes::all(), OutputFormat::Pdf, &opts).unwrap();

    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF\n"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("(Spring campaign) Tj"), "title drawn on page one");
    assert!(text.contains("([hiking boots]) Tj"));
    assert!(text.contains("(\"hiking boots\") Tj"));
}

// ---------------------------------------------------------------------------
// Session: the interactive flow end to end
// ---------------------------------------------------------------------------

#[test]
fn session_flow_submit_copy_reset() {
    let t0 = Instant::now();
    let clip = RecordingClipboard::default();
    let mut session = Session::new();

    session.load_file(&fixture("keywords.txt")).unwrap();

    // Nothing checked yet: popup, no result.
    assert!(session.submit(t0).is_err());
    assert!(session.popup_visible(t0 + Duration::from_secs(1)));
    assert!(!session.popup_visible(t0 + Duration::from_secs(3)));
    assert!(session.result().is_none());

    session.toggle(Toggle::All, true);
    session.toggle(Toggle::Only(MatchType::Broad), false);
    assert!(!session.selection().is_checked(Toggle::All));

    let lines = session.submit(t0).unwrap().to_vec();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "\"running shoes\"");
    assert_eq!(lines[1], "[running shoes]");

    assert!(session.copy_result(&clip, t0));
    assert_eq!(clip.copied.borrow()[0], lines.join("\n"));
    assert_eq!(session.copy_message(t0), Some("Copied!"));

    session.reset();
    assert!(session.result().is_none());
    assert_eq!(session.input(), "");
    assert!(session.copy_message(t0).is_none());

    // Fresh submission carries nothing over.
    session.set_input("solo");
    session.toggle(Toggle::Only(MatchType::Exact), true);
    assert_eq!(session.submit(t0).unwrap(), &["[solo]".to_string()]);
}

#[test]
fn session_export_matches_run() {
    let mut session = Session::new();
    session.set_input("a\nb");
    session.toggle(Toggle::Only(MatchType::Phrase), true);
    session.submit(Instant::now()).unwrap();

    let opts = ExportOptions::default();
    let via_session = session.export(OutputFormat::Csv, &opts);
    let via_run = matchtype::run("a\nb", flags(false, true, false), OutputFormat::Csv, &opts).unwrap();
    assert_eq!(via_session, via_run);
}
