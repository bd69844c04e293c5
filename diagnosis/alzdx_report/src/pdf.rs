//! Serialization of laid-out pages to PDF bytes.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Pt};

use crate::error::RenderError;
use crate::geometry::PageGeometry;
use crate::layout::Page;
use crate::text::{encode_win_ansi, Font};

const LAYER: &str = "Report";

fn backend(e: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(e.to_string())
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

/// Writes `pages` using the built-in Helvetica fonts.
///
/// Every line is checked against the font encoding before the document is
/// created, so an unencodable line fails the whole call.
pub fn write_pdf(
    pages: &[Page],
    geometry: &PageGeometry,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    for text in pages.iter().flat_map(Page::texts) {
        encode_win_ansi(text)?;
    }

    let (width, height) = (mm(geometry.width), mm(geometry.height));
    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER);
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(backend)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(backend)?;

    for (i, page) in pages.iter().enumerate() {
        let layer: PdfLayerReference = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, LAYER);
            doc.get_page(page_index).get_layer(layer_index)
        };
        for line in &page.lines {
            let font: &IndirectFontRef = match line.font {
                Font::Regular => &regular,
                Font::Bold => &bold,
            };
            layer.use_text(line.text.as_str(), line.size, mm(line.x), mm(line.y), font);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(backend)?;
    buf.into_inner().map_err(backend)
}
