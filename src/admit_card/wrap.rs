//! Greedy word wrapping and single-line truncation against font advance widths.

use super::font_metrics::FontFace;

/// Break `text` into lines whose rendered width stays under `max_width`.
///
/// Words are packed greedily: a word joins the current line while the joined
/// line still measures less than `max_width`, otherwise the current line is
/// emitted and the word starts the next one. A single word wider than the
/// limit gets a line of its own rather than being split.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if face.text_width(&candidate, size) < max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

const ELLIPSIS: &str = "...";

/// `text` unchanged if it fits in `max_width`, otherwise its longest prefix
/// that still fits once `...` is appended.
pub fn truncate_to_width(text: &str, face: FontFace, size: f32, max_width: f32) -> String {
    if face.text_width(text, size) <= max_width {
        return text.to_string();
    }

    // measured in font units so the prefix and the ellipsis add up exactly
    let ellipsis_units: u32 = ELLIPSIS.chars().map(|ch| u32::from(face.char_width(ch))).sum();
    let budget = ((max_width * 1000.0 / size) as u32).saturating_sub(ellipsis_units);
    let mut units = 0;
    let mut end = 0;
    for (i, ch) in text.char_indices() {
        units += u32::from(face.char_width(ch));
        if units > budget {
            break;
        }
        end = i + ch.len_utf8();
    }

    format!("{}{}", text[..end].trim_end(), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: f32 = 10.0;

    #[test]
    fn test_short_text_is_single_line() {
        let lines = wrap_text("Follow all rules.", FontFace::Regular, SIZE, 455.0);
        assert_eq!(lines, vec!["Follow all rules.".to_string()]);
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_text("   ", FontFace::Regular, SIZE, 100.0).is_empty());
    }

    #[test]
    fn test_lines_fit_width() {
        let text = "Carrying of calculators, mathematical tables, pagers, cell phones or any \
                    other electronic gadgets into the examination hall is strictly prohibited.";
        let lines = wrap_text(text, FontFace::Regular, SIZE, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(FontFace::Regular.text_width(line, SIZE) < 200.0, "{line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let lines = wrap_text("a Supercalifragilistic b", FontFace::Regular, SIZE, 40.0);
        assert_eq!(lines, vec!["a", "Supercalifragilistic", "b"]);
    }

    #[test]
    fn test_rewrapping_is_idempotent() {
        let text = "The candidate shall produce the hall ticket at the entrance of the office \
                    for any matter related with this exam.";
        let first = wrap_text(text, FontFace::Regular, SIZE, 180.0);

        let rewrapped: Vec<String> = first
            .iter()
            .flat_map(|line| wrap_text(line, FontFace::Regular, SIZE, 180.0))
            .collect();
        assert_eq!(first, rewrapped);

        let joined = wrap_text(&first.join(" "), FontFace::Regular, SIZE, 180.0);
        assert_eq!(first, joined);
    }

    #[test]
    fn test_truncate_keeps_fitting_text() {
        assert_eq!(truncate_to_width("Zain Ali", FontFace::Regular, 12.0, 230.0), "Zain Ali");
    }

    #[test]
    fn test_truncate_long_text_fits() {
        let name = "Muhammed Abdul Rahman Shihabuddeen Koyakutty Haji Puthiyapurayil";
        let truncated = truncate_to_width(name, FontFace::Regular, 12.0, 230.0);
        assert!(truncated.ends_with("..."));
        assert!(FontFace::Regular.text_width(&truncated, 12.0) <= 230.0);
        assert!(name.starts_with(truncated.trim_end_matches("...")));
    }
}
