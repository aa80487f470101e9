//! Advance-width metrics for the built-in Helvetica faces.
//!
//! Widths are taken from the Adobe AFM files and expressed in thousandths of
//! an em. The built-in faces are written with a single-byte encoding, so only
//! printable ASCII and the printable Latin-1 block can appear on the page;
//! [`is_encodable`] tells the two apart from everything else.

/// Width used for characters outside both tables.
const FALLBACK_WIDTH: u16 = 556;

const ASCII_FIRST: u32 = 0x20;
const ASCII_LAST: u32 = 0x7E;
const LATIN1_FIRST: u32 = 0xA0;
const LATIN1_LAST: u32 = 0xFF;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // U+00A0..U+00AF
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // U+00B0..U+00BF
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // U+00C0..U+00CF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // U+00D0..U+00DF
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // U+00E0..U+00EF
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // U+00F0..U+00FF
];

#[rustfmt::skip]
const HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // U+00A0..U+00AF
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // U+00B0..U+00BF
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // U+00C0..U+00CF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // U+00D0..U+00DF
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // U+00E0..U+00EF
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // U+00F0..U+00FF
];

/// Whether `ch` can be written with the built-in faces.
pub fn is_encodable(ch: char) -> bool {
    let code = ch as u32;
    (ASCII_FIRST..=ASCII_LAST).contains(&code) || (LATIN1_FIRST..=LATIN1_LAST).contains(&code)
}

/// First character of `text` that the built-in faces cannot write.
pub fn first_unencodable(text: &str) -> Option<char> {
    text.chars().find(|ch| !is_encodable(*ch))
}

/// The two faces the admit card is set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    fn tables(self) -> (&'static [u16; 95], &'static [u16; 96]) {
        match self {
            FontFace::Regular => (&HELVETICA, &HELVETICA_LATIN1),
            FontFace::Bold => (&HELVETICA_BOLD, &HELVETICA_BOLD_LATIN1),
        }
    }

    /// Advance width of a single character in thousandths of an em.
    pub fn char_width(self, ch: char) -> u16 {
        let (ascii, latin1) = self.tables();
        let code = ch as u32;
        match code {
            ASCII_FIRST..=ASCII_LAST => ascii[(code - ASCII_FIRST) as usize],
            LATIN1_FIRST..=LATIN1_LAST => latin1[(code - LATIN1_FIRST) as usize],
            _ => FALLBACK_WIDTH,
        }
    }

    /// Rendered width of `text` in points at `size`.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.char_width(ch))).sum();
        units as f32 * size / 1000.0
    }
}

/// X position that centers `text` inside the span `[x0, x0 + width]`.
pub fn centered_x(text: &str, face: FontFace, size: f32, x0: f32, width: f32) -> f32 {
    x0 + width / 2.0 - face.text_width(text, size) / 2.0
}
