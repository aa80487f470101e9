//! Paints composed draw operations onto a single `printpdf` page.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, CustomPdfConformance, IndirectFontRef, Line, Mm, PdfConformance,
    PdfDocument, PdfLayerReference, Point, Polygon, Rgb as PdfRgb,
};
use std::io::{BufWriter, Cursor, Write};
use time::OffsetDateTime;

use super::font_metrics::{first_unencodable, FontFace};
use super::layout::{compose, DrawOp, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use super::{admit_card_filename, AdmitCardError, GeneratedDocument};
use crate::candidate::models::Candidate;

const PT_TO_MM: f32 = 0.352_777_78;
const DOCUMENT_TITLE: &str = "Admit Card";
const LAYER_NAME: &str = "Layer 1";
/// Fixed identifier so identical input produces identical bytes.
const DOCUMENT_ID: &str = "admitcardadmitcardadmitcardadmit";
const LINE_THICKNESS: f32 = 1.0;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
        }
    }
}

/// Stateless renderer turning one candidate into admit-card PDF bytes.
pub struct AdmitCardRenderer;

impl AdmitCardRenderer {
    pub fn render(candidate: &Candidate) -> Result<GeneratedDocument, AdmitCardError> {
        check_printable(candidate)?;
        let pdf = render_pdf(candidate)?;
        Ok(GeneratedDocument {
            filename: admit_card_filename(&candidate.name),
            pdf,
        })
    }
}

/// Reject text the built-in faces would silently drop.
fn check_printable(candidate: &Candidate) -> Result<(), AdmitCardError> {
    let fields = [
        ("formNo", candidate.form_no.as_str()),
        ("tokenNo", candidate.token_no.as_str()),
        ("name", candidate.name.as_str()),
        ("dob", candidate.dob.as_str()),
        ("contactNo", candidate.contact_no.as_str()),
        ("place", candidate.place.as_str()),
        ("examDate", candidate.exam_date_or_default()),
        ("examTime", candidate.exam_time_or_default()),
    ];
    for (field, value) in fields {
        if let Some(ch) = first_unencodable(value) {
            return Err(AdmitCardError::UnsupportedCharacter { field, ch });
        }
    }
    Ok(())
}

fn render_pdf(candidate: &Candidate) -> Result<Vec<u8>, AdmitCardError> {
    let (doc, page, layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH * PT_TO_MM),
        Mm(PAGE_HEIGHT * PT_TO_MM),
        LAYER_NAME,
    );
    let doc = doc
        .with_document_id(DOCUMENT_ID.to_string())
        .with_creation_date(OffsetDateTime::UNIX_EPOCH)
        .with_mod_date(OffsetDateTime::UNIX_EPOCH)
        .with_metadata_date(OffsetDateTime::UNIX_EPOCH)
        .with_conformance(PdfConformance::Custom(CustomPdfConformance {
            requires_icc_profile: false,
            requires_xmp_metadata: false,
            ..Default::default()
        }));

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AdmitCardError::Font(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AdmitCardError::Font(e.to_string()))?,
    };

    let layer = doc.get_page(page).get_layer(layer);
    layer.set_outline_thickness(LINE_THICKNESS);
    layer.set_outline_color(pdf_color(Rgb::BLACK));

    for op in compose(candidate) {
        paint(&layer, &fonts, op);
    }

    let mut buf = Vec::new();
    {
        let mut writer = BufWriter::new(Cursor::new(&mut buf));
        doc.save(&mut writer)
            .map_err(|e| AdmitCardError::Save(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| AdmitCardError::Save(e.to_string()))?;
    }

    Ok(buf)
}

fn paint(layer: &PdfLayerReference, fonts: &Fonts, op: DrawOp) {
    match op {
        DrawOp::Text {
            text,
            face,
            size,
            x,
            y,
            color,
        } => {
            layer.set_fill_color(pdf_color(color));
            layer.use_text(text, size, mm(x), mm(y), fonts.get(face));
        }
        DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => {
            layer.set_fill_color(pdf_color(color));
            layer.add_polygon(Polygon {
                rings: vec![rect_points(x, y, width, height)],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }
        DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
        } => {
            layer.add_line(Line {
                points: rect_points(x, y, width, height),
                is_closed: true,
            });
        }
        DrawOp::Line { x1, y1, x2, y2 } => {
            layer.add_line(Line {
                points: vec![(point(x1, y1), false), (point(x2, y2), false)],
                is_closed: false,
            });
        }
    }
}

fn rect_points(x: f32, y: f32, width: f32, height: f32) -> Vec<(Point, bool)> {
    vec![
        (point(x, y), false),
        (point(x + width, y), false),
        (point(x + width, y + height), false),
        (point(x, y + height), false),
    ]
}

fn mm(pt: f32) -> Mm {
    Mm(pt * PT_TO_MM)
}

fn point(x: f32, y: f32) -> Point {
    Point::new(mm(x), mm(y))
}

fn pdf_color(rgb: Rgb) -> Color {
    Color::Rgb(PdfRgb::new(rgb.0, rgb.1, rgb.2, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str) -> Candidate {
        Candidate {
            id: 7,
            form_no: "100".to_string(),
            token_no: "1".to_string(),
            name: name.to_string(),
            dob: "12-3-2013".to_string(),
            contact_no: "9902700413".to_string(),
            place: "Puttur".to_string(),
            photo: None,
            exam_date: None,
            exam_time: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_render_produces_pdf() {
        let doc = AdmitCardRenderer::render(&candidate("Faaz Ahmad")).unwrap();
        assert!(doc.pdf.starts_with(b"%PDF"));
        assert_eq!(doc.filename, "admit_card_Faaz_Ahmad.pdf");
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = AdmitCardRenderer::render(&candidate("Risha Khan")).unwrap();
        let second = AdmitCardRenderer::render(&candidate("Risha Khan")).unwrap();
        assert_eq!(first.pdf, second.pdf);
    }

    #[test]
    fn test_unprintable_name_fails_render() {
        let err = AdmitCardRenderer::render(&candidate("Za\u{ef}n \u{100}l\u{12b}")).unwrap_err();
        match err {
            AdmitCardError::UnsupportedCharacter { field, ch } => {
                assert_eq!(field, "name");
                assert_eq!(ch, '\u{100}');
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unprintable_exam_time_fails_render() {
        let mut c = candidate("Zain Ali");
        c.exam_time = Some("12.00 \u{2013} 1.30 pm".to_string());
        assert!(matches!(
            AdmitCardRenderer::render(&c),
            Err(AdmitCardError::UnsupportedCharacter { field: "examTime", .. })
        ));
    }

    #[test]
    fn test_latin1_name_renders() {
        let doc = AdmitCardRenderer::render(&candidate("Za\u{ef}n \u{c0}l\u{ed}")).unwrap();
        assert!(doc.pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_different_candidates_differ() {
        let first = AdmitCardRenderer::render(&candidate("Risha Khan")).unwrap();
        let second = AdmitCardRenderer::render(&candidate("Zain Ali")).unwrap();
        assert_ne!(first.pdf, second.pdf);
    }
}
