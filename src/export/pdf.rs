//! Minimal PDF 1.4 writer: Helvetica text, one result per line, paginated.
//!
//! Object layout:
//!   1 catalog, 2 page tree, 3 Helvetica, 4 Helvetica-Bold, 5 info,
//!   then a (page, content stream) pair per page starting at 6.

use std::fmt::Write as _;

use serde::Deserialize;

const MARGIN: f32 = 72.0;
const FIRST_PAGE_OBJ: usize = 6;
const DEFAULT_FONT_SIZE: f32 = 11.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    /// (width, height) in points.
    fn dimensions(self) -> (f32, f32) {
        match self {
            Self::Letter => (612.0, 792.0),
            Self::A4 => (595.0, 842.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdfOptions {
    pub title: String,
    pub page_size: PageSize,
    pub font_size: f32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            title: "Keywords".into(),
            page_size: PageSize::Letter,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

pub fn render(lines: &[String], opts: &PdfOptions) -> Vec<u8> {
    // clamp passes NaN through, and a NaN operand corrupts the page.
    let font_size = if opts.font_size.is_finite() {
        opts.font_size.clamp(4.0, 72.0)
    } else {
        DEFAULT_FONT_SIZE
    };
    let leading = font_size * 1.4;
    let (width, height) = opts.page_size.dimensions();
    let per_page = (((height - 2.0 * MARGIN) / leading) as usize).max(1);
    let has_title = !opts.title.is_empty();

    let pages = paginate(lines, per_page, has_title);

    let mut doc = Writer::default();
    doc.raw(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    doc.object(1, "<< /Type /Catalog /Pages 2 0 R >>");

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_OBJ + 2 * i))
        .collect();
    doc.object(
        2,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        ),
    );
    doc.object(
        3,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    doc.object(
        4,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );

    let mut info = b"<< /Producer (matchtype) /Title (".to_vec();
    info.extend(encode_text(&opts.title));
    info.extend_from_slice(b") >>");
    doc.object_bytes(5, &info);

    for (i, page) in pages.iter().enumerate() {
        let page_obj = FIRST_PAGE_OBJ + 2 * i;
        let content_obj = page_obj + 1;

        doc.object(
            page_obj,
            &format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width:.0} {height:.0}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_obj} 0 R >>"
            ),
        );

        let title = (i == 0 && has_title).then_some(opts.title.as_str());
        let stream = content_stream(title, page, font_size, leading, height);
        doc.stream(content_obj, &stream);
    }

    let object_count = FIRST_PAGE_OBJ + 2 * pages.len();
    doc.finish(object_count)
}

/// Split into per-page slices. The title eats two lines on page one.
/// Always at least one page, so an empty result is still a valid document.
fn paginate(lines: &[String], per_page: usize, has_title: bool) -> Vec<&[String]> {
    let first_cap = if has_title {
        per_page.saturating_sub(2).max(1)
    } else {
        per_page
    };

    let split = first_cap.min(lines.len());
    let (first, rest) = lines.split_at(split);

    let mut pages = vec![first];
    pages.extend(rest.chunks(per_page));
    pages
}

fn content_stream(
    title: Option<&str>,
    lines: &[String],
    font_size: f32,
    leading: f32,
    page_height: f32,
) -> Vec<u8> {
    let mut out = Vec::new();
    let mut y = page_height - MARGIN - font_size;

    out.extend_from_slice(b"BT\n");
    if let Some(title) = title {
        let mut op = String::new();
        let _ = write!(op, "/F2 {:.2} Tf\n1 0 0 1 {MARGIN:.2} {y:.2} Tm\n(", font_size + 4.0);
        out.extend_from_slice(op.as_bytes());
        out.extend(encode_text(title));
        out.extend_from_slice(b") Tj\n");
        y -= 2.0 * leading;
    }

    out.extend_from_slice(format!("/F1 {font_size:.2} Tf\n").as_bytes());
    for line in lines {
        out.extend_from_slice(format!("1 0 0 1 {MARGIN:.2} {y:.2} Tm\n(").as_bytes());
        out.extend(encode_text(line));
        out.extend_from_slice(b") Tj\n");
        y -= leading;
    }
    out.extend_from_slice(b"ET\n");
    out
}

/// Encode as a WinAnsi literal-string body: escape `\ ( )`, map the common
/// typographic characters, replace anything else outside Latin-1 with `?`.
fn encode_text(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        let byte = match c {
            '\t' => b' ',
            '\\' | '(' | ')' => {
                out.push(b'\\');
                c as u8
            }
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
            _ => b'?',
        };
        out.push(byte);
    }
    out
}

/// Byte buffer that remembers where each object starts for the xref table.
#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl Writer {
    fn raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn object(&mut self, id: usize, body: &str) {
        self.object_bytes(id, body.as_bytes());
    }

    fn object_bytes(&mut self, id: usize, body: &[u8]) {
        self.offsets.push((id, self.buf.len()));
        self.raw(format!("{id} 0 obj\n").as_bytes());
        self.raw(body);
        self.raw(b"\nendobj\n");
    }

    fn stream(&mut self, id: usize, data: &[u8]) {
        self.offsets.push((id, self.buf.len()));
        self.raw(format!("{id} 0 obj\n<< /Length {} >>\nstream\n", data.len()).as_bytes());
        self.raw(data);
        self.raw(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, object_count: usize) -> Vec<u8> {
        self.offsets.sort_unstable();
        let xref_at = self.buf.len();

        let mut xref = String::new();
        let _ = write!(xref, "xref\n0 {object_count}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            let _ = write!(xref, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {object_count} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        );
        self.raw(xref.as_bytes());
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("keyword {i}")).collect()
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        memchr::memmem::find_iter(haystack, needle).count()
    }

    #[test]
    fn header_and_trailer() {
        let pdf = render(&lines(3), &PdfOptions::default());
        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert_eq!(count(&pdf, b"/Type /Page "), 1);
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let pdf = render(&lines(120), &PdfOptions::default());
        let text = String::from_utf8_lossy(&pdf);

        let startxref: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|t| t.lines().next())
            .and_then(|n| n.parse().ok())
            .expect("startxref value");
        assert!(pdf[startxref..].starts_with(b"xref\n"));

        let tail = std::str::from_utf8(&pdf[startxref..]).expect("xref section is ASCII");
        let entries: Vec<&str> = tail
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .collect();
        assert!(!entries.is_empty());
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(
                pdf[offset..].starts_with(expected.as_bytes()),
                "entry {i} should point at {expected}"
            );
        }
    }

    #[test]
    fn long_lists_paginate() {
        let opts = PdfOptions::default();
        let pdf = render(&lines(200), &opts);
        let pages = count(&pdf, b"/Type /Page ");
        assert!(pages >= 4, "200 lines at 11pt should span several pages, got {pages}");
        // Every keyword made it in.
        assert_eq!(count(&pdf, b"(keyword "), 200);
    }

    #[test]
    fn empty_result_is_one_page() {
        let pdf = render(&[], &PdfOptions::default());
        assert_eq!(count(&pdf, b"/Type /Page "), 1);
        assert!(pdf.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn a4_media_box() {
        let opts = PdfOptions {
            page_size: PageSize::A4,
            ..PdfOptions::default()
        };
        let pdf = render(&lines(1), &opts);
        assert_eq!(count(&pdf, b"/MediaBox [0 0 595 842]"), 1);
    }

    #[test]
    fn text_escaping() {
        assert_eq!(encode_text("a(b)\\c"), b"a\\(b\\)\\\\c".to_vec());
        assert_eq!(encode_text("[shoes]"), b"[shoes]".to_vec());
        assert_eq!(encode_text("caf\u{e9}"), b"caf\xE9".to_vec());
        assert_eq!(encode_text("\u{201C}x\u{201D}"), b"\x93x\x94".to_vec());
        assert_eq!(encode_text("日本"), b"??".to_vec());
        assert_eq!(encode_text("red\tshoes"), b"red shoes".to_vec());
    }

    #[test]
    fn paginate_without_title_uses_full_page() {
        let l = lines(10);
        let pages = paginate(&l, 5, false);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 5);

        let pages = paginate(&l, 5, true);
        assert_eq!(pages[0].len(), 3);
        assert_eq!(pages.len(), 3);
    }

    #[test]
    fn non_finite_font_size_falls_back_to_default() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let opts = PdfOptions {
                font_size: bad,
                ..PdfOptions::default()
            };
            let pdf = render(&lines(3), &opts);
            let text = String::from_utf8_lossy(&pdf);
            assert!(!text.contains("NaN") && !text.contains("inf"), "{bad}");
            assert_eq!(pdf, render(&lines(3), &PdfOptions::default()), "{bad}");
        }
    }
}
