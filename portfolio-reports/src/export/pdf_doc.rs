//! Minimal PDF 1.4 writer: text in the two standard Helvetica faces and
//! straight lines, on any number of pages.
//!
//! Coordinates are millimetres from the top-left corner of the page, with
//! `y` naming the text baseline. Text is WinAnsi-encoded; characters outside
//! Latin-1 are written as `?` since the standard fonts carry no other glyphs.

use std::io::Write;

const PT_PER_MM: f32 = 72.0 / 25.4;

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FontStyle {
    Normal,
    Bold,
}

impl FontStyle {
    fn resource(self) -> &'static str {
        match self {
            FontStyle::Normal => "F1",
            FontStyle::Bold => "F2",
        }
    }
}

pub(crate) struct PdfDocument {
    width: f32,
    height: f32,
    pages: Vec<String>,
    font: FontStyle,
    font_size: f32,
}

impl PdfDocument {
    /// A4 document with one empty page.
    pub(crate) fn a4(orientation: Orientation) -> Self {
        let (width, height) = match orientation {
            Orientation::Portrait => (A4_WIDTH_MM, A4_HEIGHT_MM),
            Orientation::Landscape => (A4_HEIGHT_MM, A4_WIDTH_MM),
        };
        Self {
            width,
            height,
            pages: vec![String::new()],
            font: FontStyle::Normal,
            font_size: 12.0,
        }
    }

    pub(crate) fn width(&self) -> f32 {
        self.width
    }

    pub(crate) fn height(&self) -> f32 {
        self.height
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn set_font(&mut self, font: FontStyle, size: f32) {
        self.font = font;
        self.font_size = size;
    }

    pub(crate) fn add_page(&mut self) {
        self.pages.push(String::new());
    }

    pub(crate) fn text(&mut self, x: f32, y: f32, text: &str) {
        let op = format!(
            "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
            self.font.resource(),
            num(self.font_size),
            num(x * PT_PER_MM),
            num((self.height - y) * PT_PER_MM),
            escape(text)
        );
        self.current_page().push_str(&op);
    }

    pub(crate) fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let op = format!(
            "0.5 w {} {} m {} {} l S\n",
            num(x1 * PT_PER_MM),
            num((self.height - y1) * PT_PER_MM),
            num(x2 * PT_PER_MM),
            num((self.height - y2) * PT_PER_MM)
        );
        self.current_page().push_str(&op);
    }

    fn current_page(&mut self) -> &mut String {
        if self.pages.is_empty() {
            self.pages.push(String::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Serializes the document.
    ///
    /// Object layout: 1 catalog, 2 page tree, 3-4 fonts, 5 info, then a
    /// page object and its content stream for each page.
    pub(crate) fn finish(self, title: &str) -> std::io::Result<Vec<u8>> {
        let mut out: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();
        let page_ids: Vec<usize> = (0..self.pages.len()).map(|i| 6 + i * 2).collect();

        out.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        let header_objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", self.pages.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
                .to_string(),
            format!("<< /Title ({}) /Producer (portfolio-reports) >>", escape(title)),
        ];
        for (i, body) in header_objects.iter().enumerate() {
            offsets.push(out.len());
            write!(out, "{} 0 obj\n{body}\nendobj\n", i + 1)?;
        }

        let media_box = format!(
            "[0 0 {} {}]",
            num(self.width * PT_PER_MM),
            num(self.height * PT_PER_MM)
        );
        for (content, page_id) in self.pages.iter().zip(&page_ids) {
            offsets.push(out.len());
            write!(
                out,
                "{page_id} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox {media_box} \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>\nendobj\n",
                page_id + 1
            )?;
            offsets.push(out.len());
            write!(
                out,
                "{} 0 obj\n<< /Length {} >>\nstream\n{content}endstream\nendobj\n",
                page_id + 1,
                content.len()
            )?;
        }

        let xref_at = out.len();
        write!(out, "xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1)?;
        for offset in &offsets {
            write!(out, "{offset:010} 00000 n \n")?;
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            offsets.len() + 1
        )?;
        Ok(out)
    }
}

/// Two decimals, trailing zeros dropped.
fn num(value: f32) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// PDF literal-string escaping. Non-ASCII Latin-1 goes out as octal so the
/// content stream stays ASCII.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(595.2756), "595.28");
        assert_eq!(num(56.0), "56");
        assert_eq!(num(0.0), "0");
        assert_eq!(num(10.5), "10.5");
    }

    #[test]
    fn escape_handles_delimiters_and_non_latin() {
        assert_eq!(escape("a(b)\\"), "a\\(b\\)\\\\");
        assert_eq!(escape("é"), "\\351");
        assert_eq!(escape("شهادة"), "?????");
    }

    #[test]
    fn new_pages_are_counted() {
        let mut doc = PdfDocument::a4(Orientation::Portrait);
        doc.add_page();
        assert_eq!(doc.page_count(), 2);
        let bytes = doc.finish("t").unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/MediaBox [0 0 595.28 841.89]"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn landscape_swaps_dimensions() {
        let doc = PdfDocument::a4(Orientation::Landscape);
        assert_eq!(doc.width(), 297.0);
        assert_eq!(doc.height(), 210.0);
    }
}
