//! PDF export adapter built on `printpdf`.
//!
//! Layout is computed by `domain::document::paginate`; this adapter only
//! draws the placed lines with the PDF base-14 Helvetica faces, so no font
//! files are needed at runtime.
//!
//! The base-14 faces only encode the WinAnsi character set (Latin-1 plus a few
//! typographic marks). Characters outside it, such as Greek letters or `≥`,
//! are not rendered faithfully. The flat-text export keeps them intact, and a
//! warning is logged with the count whenever a PDF contains any.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use std::io::BufWriter;

use crate::domain::document::{paginate, LineStyle, PageGeometry, PageLayout, RenderedDocument};
use crate::ports::{DocumentExportService, ExportError, ExportFormat};

const LAYER_NAME: &str = "Layer 1";

/// Renders documents to A4 PDF.
///
/// # Example
///
/// ```rust,ignore
/// let service = PdfExportService::new(config.export.page_geometry());
/// let bytes = service.to_paginated(&document)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfExportService {
    geometry: PageGeometry,
}

impl PdfExportService {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    fn draw_pages(
        &self,
        doc: &PdfDocumentReference,
        first_page: (printpdf::PdfPageIndex, printpdf::PdfLayerIndex),
        pages: &[PageLayout],
    ) -> Result<(), ExportError> {
        let regular = builtin_font(doc, BuiltinFont::Helvetica)?;
        let bold = builtin_font(doc, BuiltinFont::HelveticaBold)?;

        for (index, page) in pages.iter().enumerate() {
            let (page_idx, layer_idx) = if index == 0 {
                first_page
            } else {
                doc.add_page(
                    Mm(self.geometry.width_mm),
                    Mm(self.geometry.height_mm),
                    LAYER_NAME,
                )
            };
            let layer = doc.get_page(page_idx).get_layer(layer_idx);

            for line in &page.lines {
                let font = match line.style {
                    LineStyle::Title | LineStyle::Heading => &bold,
                    LineStyle::Body => &regular,
                };
                layer.use_text(
                    line.text.as_str(),
                    line.font_size_pt,
                    Mm(line.x_mm),
                    Mm(line.y_mm),
                    font,
                );
            }
        }

        Ok(())
    }
}

impl DocumentExportService for PdfExportService {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn to_paginated(&self, document: &RenderedDocument) -> Result<Vec<u8>, ExportError> {
        if !self.geometry.has_printable_area() {
            return Err(ExportError::InvalidLayout(format!(
                "margin {}mm leaves no printable area",
                self.geometry.margin_mm
            )));
        }

        let pages = paginate(document, &self.geometry);
        tracing::debug!(pages = pages.len(), "laying out PDF");

        let unencodable = count_outside_win_ansi(&pages);
        if unencodable > 0 {
            tracing::warn!(
                characters = unencodable,
                "PDF text contains characters the built-in fonts cannot encode"
            );
        }

        let (doc, page1, layer1) = PdfDocument::new(
            document.title.as_str(),
            Mm(self.geometry.width_mm),
            Mm(self.geometry.height_mm),
            LAYER_NAME,
        );
        self.draw_pages(&doc, (page1, layer1), &pages)?;

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| ExportError::pdf_failed(format!("PDF save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| ExportError::pdf_failed(format!("PDF buffer error: {e}")))
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Typographic marks WinAnsi places in 0x80..=0x9F.
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRAS.contains(c)
}

fn count_outside_win_ansi(pages: &[PageLayout]) -> usize {
    pages
        .iter()
        .flat_map(|page| &page.lines)
        .flat_map(|line| line.text.chars())
        .filter(|c| !is_win_ansi(*c))
        .count()
}

fn builtin_font(
    doc: &PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, ExportError> {
    doc.add_builtin_font(font)
        .map_err(|e| ExportError::pdf_failed(format!("PDF font error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Section;

    fn document(body_lines: usize) -> RenderedDocument {
        RenderedDocument {
            title: "Scientific Narrative Generator".to_string(),
            sections: vec![Section {
                heading: "Core Scientific Narrative".to_string(),
                body: (0..body_lines)
                    .map(|i| format!("Statement {i} about the mechanism of action."))
                    .collect::<Vec<_>>()
                    .join("\n"),
            }],
        }
    }

    #[test]
    fn produces_pdf_bytes() {
        let bytes = PdfExportService::default()
            .to_paginated(&document(3))
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_documents_render() {
        let service = PdfExportService::default();
        let short = service.to_paginated(&document(3)).unwrap();
        let long = service.to_paginated(&document(300)).unwrap();
        assert!(long.len() > short.len());
    }

    #[test]
    fn rejects_geometry_without_printable_area() {
        let service = PdfExportService::new(PageGeometry::a4(10.0, 120.0));
        assert!(matches!(
            service.to_paginated(&document(1)),
            Err(ExportError::InvalidLayout(_))
        ));
    }

    #[test]
    fn win_ansi_covers_latin1_and_typographic_marks() {
        assert!("Café – “naïve” 5 µg €".chars().all(is_win_ansi));
        assert!(!is_win_ansi('α'));
        assert!(!is_win_ansi('≥'));
    }

    #[test]
    fn counts_characters_the_fonts_cannot_encode() {
        let doc = RenderedDocument {
            title: "Dosing".to_string(),
            sections: vec![Section {
                heading: "Threshold".to_string(),
                body: "eGFR ≥ 30 with α-blocker".to_string(),
            }],
        };
        let pages = paginate(&doc, &PageGeometry::default());
        assert_eq!(count_outside_win_ansi(&pages), 2);

        // Still renders rather than failing
        assert!(PdfExportService::default()
            .to_paginated(&doc)
            .unwrap()
            .starts_with(b"%PDF"));
    }

    #[test]
    fn reports_available() {
        let service = PdfExportService::default();
        assert!(service.is_available());
        assert_eq!(service.format(), ExportFormat::Pdf);
    }
}
