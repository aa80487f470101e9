//! Fixed A4 layout of the admit card.
//!
//! [`compose`] turns a candidate into an ordered list of [`DrawOp`]s in PDF
//! points (origin bottom-left). Vertical positions follow a running cursor
//! that starts at the top of the border and moves down block by block.

use super::font_metrics::{centered_x, FontFace};
use super::wrap::{truncate_to_width, wrap_text};
use crate::candidate::models::Candidate;

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 50.0;
/// Horizontal inset of boxed content from the page border.
pub const CONTENT_INSET: f32 = 20.0;
pub const INSTRUCTION_INDENT: f32 = 2.0 * CONTENT_INSET;
pub const INSTRUCTION_SIZE: f32 = 10.0;

const CONTENT_LEFT: f32 = MARGIN + CONTENT_INSET;
const CONTENT_RIGHT: f32 = PAGE_WIDTH - MARGIN - CONTENT_INSET;
const CONTENT_WIDTH: f32 = CONTENT_RIGHT - CONTENT_LEFT;

const HEADER_BAND_HEIGHT: f32 = 50.0;
const TITLE_BAND_HEIGHT: f32 = 28.0;
const NUMBER_COLUMN_WIDTH: f32 = 165.0;
const NUMBER_LABEL_HEIGHT: f32 = 22.0;
const NUMBER_VALUE_HEIGHT: f32 = 30.0;
const PHOTO_WIDTH: f32 = 100.0;
const PHOTO_HEIGHT: f32 = 120.0;
const FIELD_LINE_SPACING: f32 = 35.0;
const FIELD_COLON_X: f32 = CONTENT_LEFT + 100.0;
const FIELD_VALUE_X: f32 = FIELD_COLON_X + 15.0;
const FIELD_SIZE: f32 = 12.0;
/// Clearance kept between a field value and the photo box.
const PHOTO_CLEARANCE: f32 = 10.0;
const COUNTER_TABLE_HEIGHT: f32 = 60.0;
const INSTRUCTION_BAND_HEIGHT: f32 = 24.0;
const INSTRUCTION_LINE_SPACING: f32 = 14.0;
const INSTRUCTION_GAP: f32 = 6.0;
const BULLET_SIZE: f32 = 3.0;
/// Offset from the bullet to the start of the instruction text.
const BULLET_TEXT_OFFSET: f32 = 10.0;
const SIGNATURE_BASELINE: f32 = MARGIN + 30.0;

pub const INSTITUTION_NAME: &str = "Darul Huda Islamic University";
pub const INSTITUTION_ADDRESS: &str =
    "Hidaya Nagar, Chemmad Tirurangadi PO, Chemmad, Kerala 676306";
pub const CENTER_NAME: &str = "Darunnoor Education Center";
pub const CENTER_ADDRESS: &str =
    "Kashipatna, Moodbidri (Via), Belthangady (Tq.), Dakshina Kannada (Dist.), Karnataka - 574236";
pub const CENTER_CONTACT: &str =
    "Website: darunnooredcation.in | Gmail: dnekashipatna@gmail.com";
pub const CARD_TITLE: &str = "Darul Huda Admission Test - Admit Card";

const PHOTO_HINT: [&str; 4] = ["Please affix", "your recent", "passport size", "photo"];
pub const COUNTER_TITLES: [&str; 4] = ["Counter 1", "Counter 2", "Counter 3", "Written Test"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
    pub const BAND: Rgb = Rgb(0.9, 0.9, 0.9);
    pub const HEADER_CELL: Rgb = Rgb(0.2, 0.2, 0.2);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        face: FontFace,
        size: f32,
        x: f32,
        y: f32,
        color: Rgb,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

#[derive(Default)]
struct Canvas {
    ops: Vec<DrawOp>,
}

impl Canvas {
    fn text(&mut self, text: &str, face: FontFace, size: f32, x: f32, y: f32) {
        self.colored_text(text, face, size, x, y, Rgb::BLACK);
    }

    fn colored_text(&mut self, text: &str, face: FontFace, size: f32, x: f32, y: f32, color: Rgb) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            face,
            size,
            x,
            y,
            color,
        });
    }

    /// Text centered horizontally in `[x0, x0 + width]`.
    fn centered(&mut self, text: &str, face: FontFace, size: f32, x0: f32, width: f32, y: f32) {
        let x = centered_x(text, face, size, x0, width);
        self.text(text, face, size, x, y);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
    }
}

/// Instruction paragraphs in print order.
pub fn instructions(exam_date: &str) -> Vec<String> {
    vec![
        "Hall ticket shall be produced in the examination hall failing which the candidate \
         will not be allowed to write and attend the exam."
            .to_string(),
        "The candidate shall carry into examination hall only (i) Blue/Black ball point pen \
         (ii) Hall Ticket."
            .to_string(),
        "Carrying of Calculators, Mathematical/Log Tables, Pagers, Cell Phones, any other \
         electronic gadgets and loose papers into the examination hall is strictly prohibited."
            .to_string(),
        "The candidate shall produce the Hall Ticket at the entrance of DNEC office for any \
         matter related with this exam."
            .to_string(),
        format!("The result will be announced on {exam_date} Sunday"),
        "Follow all other rules which will be announced on time.".to_string(),
    ]
}

/// Lay out the full admit card for `candidate`.
pub fn compose(candidate: &Candidate) -> Vec<DrawOp> {
    let mut canvas = Canvas::default();
    let border_top = PAGE_HEIGHT - MARGIN;

    canvas.stroke_rect(MARGIN, MARGIN, PAGE_WIDTH - 2.0 * MARGIN, PAGE_HEIGHT - 2.0 * MARGIN);

    let cursor = header(&mut canvas, border_top);
    let cursor = sub_header(&mut canvas, cursor);
    let cursor = title_band(&mut canvas, cursor);
    let (cursor, photo_bottom) = number_row(&mut canvas, candidate, cursor);
    let cursor = fields(&mut canvas, candidate, cursor, photo_bottom);
    let cursor = counter_table(&mut canvas, candidate, cursor);
    instruction_block(&mut canvas, candidate, cursor);
    signatures(&mut canvas);

    canvas.ops
}

fn header(canvas: &mut Canvas, top: f32) -> f32 {
    let band_width = PAGE_WIDTH - 2.0 * MARGIN;
    canvas.fill_rect(MARGIN, top - HEADER_BAND_HEIGHT, band_width, HEADER_BAND_HEIGHT, Rgb::BAND);
    canvas.centered(INSTITUTION_NAME, FontFace::Bold, 16.0, MARGIN, band_width, top - 22.0);
    canvas.centered(INSTITUTION_ADDRESS, FontFace::Regular, 10.0, MARGIN, band_width, top - 38.0);
    top - HEADER_BAND_HEIGHT
}

fn sub_header(canvas: &mut Canvas, top: f32) -> f32 {
    let width = PAGE_WIDTH - 2.0 * MARGIN;
    canvas.centered(CENTER_NAME, FontFace::Bold, 16.0, MARGIN, width, top - 24.0);
    canvas.centered(CENTER_ADDRESS, FontFace::Regular, 10.0, MARGIN, width, top - 40.0);
    canvas.centered(CENTER_CONTACT, FontFace::Regular, 10.0, MARGIN, width, top - 54.0);

    let rule_y = top - 64.0;
    canvas.line(MARGIN, rule_y, PAGE_WIDTH - MARGIN, rule_y);
    rule_y
}

fn title_band(canvas: &mut Canvas, top: f32) -> f32 {
    let bottom = top - 10.0 - TITLE_BAND_HEIGHT;
    canvas.stroke_rect(CONTENT_LEFT, bottom, CONTENT_WIDTH, TITLE_BAND_HEIGHT);
    canvas.centered(CARD_TITLE, FontFace::Bold, 14.0, CONTENT_LEFT, CONTENT_WIDTH, bottom + 9.0);
    bottom
}

/// Form/token cells plus the photo box to their right.
///
/// Returns the bottom of the value cells and the bottom of the photo box.
fn number_row(canvas: &mut Canvas, candidate: &Candidate, top: f32) -> (f32, f32) {
    let row_top = top - 16.0;
    let label_bottom = row_top - NUMBER_LABEL_HEIGHT;
    let value_bottom = label_bottom - NUMBER_VALUE_HEIGHT;

    let cells = [("Form No.", &candidate.form_no), ("Token No.", &candidate.token_no)];
    for (column, (label, value)) in cells.iter().enumerate() {
        let x = CONTENT_LEFT + column as f32 * NUMBER_COLUMN_WIDTH;

        canvas.fill_rect(x, label_bottom, NUMBER_COLUMN_WIDTH, NUMBER_LABEL_HEIGHT, Rgb::HEADER_CELL);
        canvas.stroke_rect(x, label_bottom, NUMBER_COLUMN_WIDTH, NUMBER_LABEL_HEIGHT);
        let label_x = centered_x(label, FontFace::Bold, 12.0, x, NUMBER_COLUMN_WIDTH);
        canvas.colored_text(label, FontFace::Bold, 12.0, label_x, label_bottom + 7.0, Rgb::WHITE);

        canvas.stroke_rect(x, value_bottom, NUMBER_COLUMN_WIDTH, NUMBER_VALUE_HEIGHT);
        canvas.centered(value, FontFace::Bold, 14.0, x, NUMBER_COLUMN_WIDTH, value_bottom + 10.0);
    }

    let photo_x = CONTENT_RIGHT - PHOTO_WIDTH;
    let photo_bottom = row_top - PHOTO_HEIGHT;
    canvas.stroke_rect(photo_x, photo_bottom, PHOTO_WIDTH, PHOTO_HEIGHT);
    for (i, line) in PHOTO_HINT.iter().enumerate() {
        let y = row_top - 42.0 - i as f32 * 14.0;
        canvas.centered(line, FontFace::Regular, 10.0, photo_x, PHOTO_WIDTH, y);
    }

    (value_bottom, photo_bottom)
}

/// Room for a field value on the row at `baseline`; rows beside the photo box stop short of it.
fn field_value_width(baseline: f32, photo_bottom: f32) -> f32 {
    let right = if baseline + FIELD_SIZE > photo_bottom {
        CONTENT_RIGHT - PHOTO_WIDTH - PHOTO_CLEARANCE
    } else {
        CONTENT_RIGHT
    };
    right - FIELD_VALUE_X
}

fn fields(canvas: &mut Canvas, candidate: &Candidate, top: f32, photo_bottom: f32) -> f32 {
    let rows = [
        ("Name", &candidate.name),
        ("DOB", &candidate.dob),
        ("Contact No.", &candidate.contact_no),
        ("Place", &candidate.place),
    ];

    let first = top - 30.0;
    let mut baseline = first;
    for (i, (label, value)) in rows.iter().enumerate() {
        baseline = first - i as f32 * FIELD_LINE_SPACING;
        let max_width = field_value_width(baseline, photo_bottom);
        let value = truncate_to_width(value, FontFace::Regular, FIELD_SIZE, max_width);
        canvas.text(label, FontFace::Bold, FIELD_SIZE, CONTENT_LEFT, baseline);
        canvas.text(":", FontFace::Regular, FIELD_SIZE, FIELD_COLON_X, baseline);
        canvas.text(&value, FontFace::Regular, FIELD_SIZE, FIELD_VALUE_X, baseline);
    }

    baseline - 22.0
}

fn counter_table(canvas: &mut Canvas, candidate: &Candidate, top: f32) -> f32 {
    let bottom = top - COUNTER_TABLE_HEIGHT;
    let column_width = CONTENT_WIDTH / COUNTER_TITLES.len() as f32;

    canvas.stroke_rect(CONTENT_LEFT, bottom, CONTENT_WIDTH, COUNTER_TABLE_HEIGHT);
    for i in 1..COUNTER_TITLES.len() {
        let x = CONTENT_LEFT + i as f32 * column_width;
        canvas.line(x, bottom, x, top);
    }

    let title_y = top - 20.0;
    for (i, title) in COUNTER_TITLES.iter().enumerate() {
        let x = CONTENT_LEFT + i as f32 * column_width;
        canvas.centered(title, FontFace::Bold, 12.0, x, column_width, title_y);
    }

    let written_x = CONTENT_LEFT + 3.0 * column_width;
    canvas.centered(
        candidate.exam_time_or_default(),
        FontFace::Regular,
        12.0,
        written_x,
        column_width,
        title_y - 22.0,
    );

    bottom
}

fn instruction_block(canvas: &mut Canvas, candidate: &Candidate, top: f32) -> f32 {
    let band_bottom = top - 14.0 - INSTRUCTION_BAND_HEIGHT;
    canvas.stroke_rect(CONTENT_LEFT, band_bottom, CONTENT_WIDTH, INSTRUCTION_BAND_HEIGHT);
    canvas.centered("INSTRUCTIONS", FontFace::Bold, 14.0, CONTENT_LEFT, CONTENT_WIDTH, band_bottom + 8.0);

    let bullet_x = MARGIN + INSTRUCTION_INDENT / 2.0;
    let text_x = bullet_x + BULLET_TEXT_OFFSET;
    let max_width = PAGE_WIDTH - 2.0 * MARGIN - INSTRUCTION_INDENT - BULLET_TEXT_OFFSET;
    let mut baseline = band_bottom - 18.0;

    for instruction in instructions(candidate.exam_date_or_default()) {
        // U+2022 has no code in the built-in encoding, so the bullet is drawn
        canvas.fill_rect(bullet_x, baseline + 2.5, BULLET_SIZE, BULLET_SIZE, Rgb::BLACK);
        for line in wrap_text(&instruction, FontFace::Regular, INSTRUCTION_SIZE, max_width) {
            canvas.text(&line, FontFace::Regular, INSTRUCTION_SIZE, text_x, baseline);
            baseline -= INSTRUCTION_LINE_SPACING;
        }
        baseline -= INSTRUCTION_GAP;
    }

    baseline
}

fn signatures(canvas: &mut Canvas) {
    let principal = "Signature of Principal";
    canvas.text("Seal", FontFace::Bold, 12.0, CONTENT_LEFT + 20.0, SIGNATURE_BASELINE);
    let x = CONTENT_RIGHT - FontFace::Bold.text_width(principal, 12.0);
    canvas.text(principal, FontFace::Bold, 12.0, x, SIGNATURE_BASELINE);
}
