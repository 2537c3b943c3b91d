//! Page layout for paginated export.
//!
//! Pure geometry: decides which text goes on which page and where. Drawing is
//! left to a `DocumentExportService` adapter, so layout is testable without a
//! PDF backend.
//!
//! Wrapping is greedy by word against a character budget estimated from the
//! font size. A new page starts whenever the next line would cross the bottom
//! margin.

use serde::Serialize;

use super::RenderedDocument;

const MM_PER_PT: f32 = 0.3528;

/// Average glyph advance as a fraction of the font size (Helvetica-like).
const AVG_CHAR_WIDTH_EM: f32 = 0.5;

const LINE_SPACING: f32 = 1.4;

const TITLE_SIZE_BONUS_PT: f32 = 6.0;
const HEADING_SIZE_BONUS_PT: f32 = 2.0;

/// Fixed page geometry, in millimetres and points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub font_size_pt: f32,
}

impl PageGeometry {
    /// A4 portrait with a uniform margin.
    pub fn a4(font_size_pt: f32, margin_mm: f32) -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm,
            font_size_pt,
        }
    }

    fn usable_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    fn usable_height_mm(&self) -> f32 {
        self.height_mm - 2.0 * self.margin_mm
    }

    /// Vertical advance for one line at `font_size_pt`.
    pub fn line_height_mm(font_size_pt: f32) -> f32 {
        font_size_pt * MM_PER_PT * LINE_SPACING
    }

    /// Approximate number of characters that fit on one line at `font_size_pt`.
    pub fn chars_per_line(&self, font_size_pt: f32) -> usize {
        let char_width = font_size_pt * MM_PER_PT * AVG_CHAR_WIDTH_EM;
        ((self.usable_width_mm() / char_width).floor() as usize).max(1)
    }

    /// True when at least a title line fits inside the margins.
    pub fn has_printable_area(&self) -> bool {
        let title_size = self.font_size_pt + TITLE_SIZE_BONUS_PT;
        self.usable_width_mm() >= title_size * MM_PER_PT
            && self.usable_height_mm() >= Self::line_height_mm(title_size)
    }

    fn top_mm(&self) -> f32 {
        self.height_mm - self.margin_mm
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4(10.0, 20.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Title,
    Heading,
    Body,
}

/// A line of text fixed to a page position. `y_mm` is the baseline measured
/// from the bottom edge, as PDF coordinates are.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub style: LineStyle,
    pub font_size_pt: f32,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// Lays `doc` out over as many pages as it needs. Always yields at least one page.
pub fn paginate(doc: &RenderedDocument, geometry: &PageGeometry) -> Vec<PageLayout> {
    let mut cursor = Cursor::new(geometry);

    let title_size = geometry.font_size_pt + TITLE_SIZE_BONUS_PT;
    for line in wrap_text(&doc.title, geometry.chars_per_line(title_size)) {
        cursor.place(line, LineStyle::Title, title_size);
    }
    cursor.gap(PageGeometry::line_height_mm(geometry.font_size_pt));

    let heading_size = geometry.font_size_pt + HEADING_SIZE_BONUS_PT;
    let body_size = geometry.font_size_pt;
    let body_width = geometry.chars_per_line(body_size);

    for section in &doc.sections {
        for line in wrap_text(&section.heading, geometry.chars_per_line(heading_size)) {
            cursor.place(line, LineStyle::Heading, heading_size);
        }
        for source_line in section.body.lines() {
            for line in wrap_preserving_indent(source_line, body_width) {
                cursor.place(line, LineStyle::Body, body_size);
            }
        }
        cursor.gap(PageGeometry::line_height_mm(body_size));
    }

    cursor.finish()
}

struct Cursor<'a> {
    geometry: &'a PageGeometry,
    pages: Vec<PageLayout>,
    current: PageLayout,
    y_mm: f32,
}

impl<'a> Cursor<'a> {
    fn new(geometry: &'a PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: PageLayout::default(),
            y_mm: geometry.top_mm(),
        }
    }

    fn place(&mut self, text: String, style: LineStyle, font_size_pt: f32) {
        let advance = PageGeometry::line_height_mm(font_size_pt);
        if self.y_mm - advance < self.geometry.margin_mm {
            self.break_page();
        }
        self.y_mm -= advance;

        // Blank lines only consume vertical space
        if text.trim().is_empty() {
            return;
        }

        self.current.lines.push(PlacedLine {
            text,
            style,
            font_size_pt,
            x_mm: self.geometry.margin_mm,
            y_mm: self.y_mm,
        });
    }

    fn gap(&mut self, mm: f32) {
        self.y_mm -= mm;
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y_mm = self.geometry.top_mm();
    }

    fn finish(mut self) -> Vec<PageLayout> {
        if !self.current.lines.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Greedy word wrap. Words longer than the budget are split across lines.
/// Always returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for piece in split_long_word(word, max_chars) {
            let piece_len = piece.chars().count();
            if current_len > 0 && current_len + 1 + piece_len > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Wraps one source line, repeating its leading indentation on every
/// continuation so pretty-printed structures stay readable.
///
/// Indentation is capped at half the line budget, so every wrapped line
/// still fits within `max_chars`.
fn wrap_preserving_indent(line: &str, max_chars: usize) -> Vec<String> {
    let content = line.trim_start();
    let indent: String = line[..line.len() - content.len()]
        .chars()
        .take(max_chars / 2)
        .collect();
    let width = (max_chars - indent.chars().count()).max(1);

    wrap_text(content, width)
        .into_iter()
        .map(|wrapped| {
            if wrapped.is_empty() {
                wrapped
            } else {
                format!("{indent}{wrapped}")
            }
        })
        .collect()
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
