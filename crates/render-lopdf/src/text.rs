//! Text encoding and line breaking.

use crate::fonts::FontMetrics;

/// Code points placed in the 0x80..=0x9F block of WinAnsiEncoding.
const WIN_ANSI_HIGH: [(u8, char); 13] = [
    (0x80, '€'),
    (0x85, '…'),
    (0x91, '‘'),
    (0x92, '’'),
    (0x93, '“'),
    (0x94, '”'),
    (0x95, '•'),
    (0x96, '–'),
    (0x97, '—'),
    (0x99, '™'),
    (0x8A, 'Š'),
    (0x8C, 'Œ'),
    (0x9C, 'œ'),
];

/// Encodes `text` as WinAnsi bytes for use in a PDF literal string.
/// Characters outside the encoding become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

/// Distinct characters of `text` that WinAnsi cannot encode, in first-seen order.
pub(crate) fn unencodable_chars(text: &str) -> Vec<char> {
    let mut missing: Vec<char> = Vec::new();
    for c in text.chars() {
        if c != '?' && win_ansi_byte(c) == b'?' && !missing.contains(&c) {
            missing.push(c);
        }
    }
    missing
}

pub(crate) fn win_ansi_byte(c: char) -> u8 {
    let code = c as u32;
    if code < 0x80 || (0xA0..=0xFF).contains(&code) {
        return code as u8;
    }
    WIN_ANSI_HIGH
        .iter()
        .find(|(_, ch)| *ch == c)
        .map(|(byte, _)| *byte)
        .unwrap_or(b'?')
}

/// The Unicode character a WinAnsi byte stands for, if any.
pub(crate) fn win_ansi_char(byte: u8) -> Option<char> {
    match byte {
        0x20..=0x7E | 0xA0..=0xFF => Some(byte as char),
        0x80..=0x9F => WIN_ANSI_HIGH
            .iter()
            .find(|(b, _)| *b == byte)
            .map(|(_, ch)| *ch),
        _ => None,
    }
}

/// Greedy line breaking.
///
/// Explicit newlines always break. Words wider than `max_width` on their own
/// are broken between characters. An empty input yields no lines.
pub fn wrap_lines(text: &str, max_width: f32, metrics: &FontMetrics, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }
    let space = metrics.text_width(" ", font_size);

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in raw_line.split_whitespace() {
            let word_width = metrics.text_width(word, font_size);
            if current.is_empty() {
                if word_width <= max_width {
                    current.push_str(word);
                    current_width = word_width;
                } else {
                    let mut pieces = break_word(word, max_width, metrics, font_size);
                    // The last piece keeps accepting words.
                    let tail = pieces.pop().unwrap_or_default();
                    lines.extend(pieces);
                    current_width = metrics.text_width(&tail, font_size);
                    current = tail;
                }
            } else if current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                if word_width <= max_width {
                    current.push_str(word);
                    current_width = word_width;
                } else {
                    let mut pieces = break_word(word, max_width, metrics, font_size);
                    let tail = pieces.pop().unwrap_or_default();
                    lines.extend(pieces);
                    current_width = metrics.text_width(&tail, font_size);
                    current = tail;
                }
            }
        }
        lines.push(current);
    }
    lines
}

fn break_word(word: &str, max_width: f32, metrics: &FontMetrics, font_size: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;
    for ch in word.chars() {
        let ch_width = metrics.char_width(ch, font_size);
        if !piece.is_empty() && width + ch_width > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += ch_width;
    }
    pieces.push(piece);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::HELVETICA;

    #[test]
    fn encodes_latin1_and_typographic_punctuation() {
        assert_eq!(to_win_ansi("Rs. 5,000"), b"Rs. 5,000".to_vec());
        assert_eq!(to_win_ansi("é"), vec![0xE9]);
        assert_eq!(to_win_ansi("“ok” – •"), vec![0x93, b'o', b'k', 0x94, b' ', 0x96, b' ', 0x95]);
        assert_eq!(to_win_ansi("₹"), vec![b'?']);
        assert_eq!(win_ansi_char(0x97), Some('—'));
        assert_eq!(win_ansi_char(0x81), None);
    }

    #[test]
    fn reports_characters_outside_win_ansi() {
        assert_eq!(unencodable_chars("₹ 500 ₹ ₩"), vec!['₹', '₩']);
        assert!(unencodable_chars("Rs. 5,000? é – •").is_empty());
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_lines("Front bumper cracked near the left fog lamp", 80.0, &HELVETICA, 8.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(HELVETICA.text_width(line, 8.0) <= 80.0, "{line:?} overflows");
        }
        assert_eq!(lines.join(" "), "Front bumper cracked near the left fog lamp");
    }

    #[test]
    fn honours_explicit_newlines() {
        let lines = wrap_lines("Dealer A: Rs. 1,000\nDealer B: Rs. 2,000", 500.0, &HELVETICA, 8.0);
        assert_eq!(lines, vec!["Dealer A: Rs. 1,000", "Dealer B: Rs. 2,000"]);
    }

    #[test]
    fn breaks_words_wider_than_the_line() {
        let lines = wrap_lines("MH12AB34567890123456", 30.0, &HELVETICA, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "MH12AB34567890123456");
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_lines("", 100.0, &HELVETICA, 10.0).is_empty());
    }
}
