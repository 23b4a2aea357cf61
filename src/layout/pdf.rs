//! PDF encoding of a laid-out [`Document`] via `printpdf`.
//!
//! Only the two built-in Helvetica faces are used, so no font files are
//! embedded. printpdf measures y up from the bottom edge; layout measures it
//! down from the top, hence `PAGE_HEIGHT_MM - y`.

use super::document::{Document, FontWeight, TextColor};
use super::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::error::ClearCueError;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, Rgb};
use std::io::BufWriter;

const LAYER_NAME: &str = "Layer 1";

/// Serialise `document` to PDF bytes, one PDF page per layout page.
pub fn encode_pdf(document: &Document) -> Result<Vec<u8>, ClearCueError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        &document.title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ClearCueError::PdfEncoding(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ClearCueError::PdfEncoding(format!("font error: {e}")))?;

    for (index, page) in document.pages.iter().enumerate() {
        let (page_ref, layer_ref) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME)
        };
        let layer = doc.get_page(page_ref).get_layer(layer_ref);

        let mut active: Option<TextColor> = None;
        for run in &page.runs {
            if active != Some(run.style.color) {
                layer.set_fill_color(rgb(run.style.color));
                active = Some(run.style.color);
            }
            let font: &IndirectFontRef = match run.style.weight {
                FontWeight::Regular => &regular,
                FontWeight::Bold => &bold,
            };
            layer.use_text(
                run.text.as_str(),
                run.style.size_pt,
                Mm(run.x_mm),
                Mm(PAGE_HEIGHT_MM - run.y_mm),
                font,
            );
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ClearCueError::PdfEncoding(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ClearCueError::PdfEncoding(format!("buffer error: {e}")))
}

fn rgb(color: TextColor) -> Color {
    let TextColor(r, g, b) = color;
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::document::{Page, TextRun, TextStyle};

    #[test]
    fn two_page_document_encodes() {
        let run = |text: &str| TextRun {
            text: text.to_string(),
            x_mm: 20.0,
            y_mm: 30.0,
            style: TextStyle::regular(9.0),
        };
        let document = Document {
            title: "Test".into(),
            pages: vec![
                Page {
                    runs: vec![run("first")],
                },
                Page {
                    runs: vec![run("second")],
                },
            ],
        };
        let bytes = encode_pdf(&document).expect("encode");
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
