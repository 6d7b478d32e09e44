//! Word wrapping for styled transcript lines
//!
//! The transcript is wrapped here and rendered by `Paragraph` without
//! `Wrap`, so the row count used for scrolling is exactly the number of rows
//! drawn. Spans keep their styles across breaks. Whitespace that lands on a
//! break is dropped; words wider than the line are split by character.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap every line to `width` columns. A zero width yields no rows.
pub fn wrap_lines(lines: &[Line<'_>], width: u16) -> Vec<Line<'static>> {
    if width == 0 {
        return Vec::new();
    }
    let mut wrapper = LineWrapper::new(width as usize);
    for line in lines {
        wrapper.wrap(line);
    }
    wrapper.rows
}

struct LineWrapper {
    width: usize,
    rows: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    used: usize,
}

impl LineWrapper {
    fn new(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
            current: Vec::new(),
            used: 0,
        }
    }

    fn wrap(&mut self, line: &Line<'_>) {
        for span in &line.spans {
            for piece in split_words(&span.content) {
                self.place(piece, span.style);
            }
        }
        self.break_row();
    }

    fn place(&mut self, piece: &str, style: Style) {
        let piece_width = UnicodeWidthStr::width(piece);
        let is_space = piece.chars().all(char::is_whitespace);

        if self.used + piece_width > self.width && self.used > 0 {
            self.break_row();
            if is_space {
                return;
            }
        }

        if piece_width <= self.width {
            self.push(piece, style, piece_width);
            return;
        }

        for ch in piece.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if self.used + ch_width > self.width && self.used > 0 {
                self.break_row();
            }
            let mut buf = [0u8; 4];
            self.push(ch.encode_utf8(&mut buf), style, ch_width);
        }
    }

    fn push(&mut self, text: &str, style: Style, text_width: usize) {
        self.used += text_width;
        if let Some(last) = self.current.last_mut() {
            if last.style == style {
                last.content.to_mut().push_str(text);
                return;
            }
        }
        self.current.push(Span::styled(text.to_string(), style));
    }

    fn break_row(&mut self) {
        self.rows.push(Line::from(std::mem::take(&mut self.current)));
        self.used = 0;
    }
}

/// Split into alternating runs of whitespace and non-whitespace.
fn split_words(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (index, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(previous) if previous != space => {
                pieces.push(&text[start..index]);
                start = index;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn texts(rows: &[Line<'_>]) -> Vec<String> {
        rows.iter()
            .map(|row| row.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn breaks_at_word_boundaries() {
        let rows = wrap_lines(&[Line::from("abcdefg hijklm0 abcdefg hijklm1")], 15);
        assert_eq!(texts(&rows), vec!["abcdefg hijklm0", "abcdefg hijklm1"]);
    }

    #[test]
    fn word_wrap_uses_more_rows_than_character_count() {
        // 23 columns would fit in 2 rows of 12, but no two words share a row.
        let rows = wrap_lines(&[Line::from("abcdefg abcdefg abcdefg")], 12);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn long_words_are_split_and_empty_lines_kept() {
        let rows = wrap_lines(&[Line::from("abcdefghij"), Line::from(""), Line::from("x")], 4);
        assert_eq!(texts(&rows), vec!["abcd", "efgh", "ij", "", "x"]);
        assert!(wrap_lines(&[Line::from("x")], 0).is_empty());
    }

    #[test]
    fn styles_survive_breaks() {
        let red = Style::default().fg(Color::Red);
        let line = Line::from(vec![
            Span::raw("Gemini: "),
            Span::styled("one two", red),
        ]);
        let rows = wrap_lines(&[line], 11);
        assert_eq!(texts(&rows), vec!["Gemini: one", "two"]);
        assert_eq!(rows[1].spans[0].style, red);
    }

    #[test]
    fn wide_characters_count_two_columns() {
        let rows = wrap_lines(&[Line::from("日本語")], 4);
        assert_eq!(texts(&rows), vec!["日本", "語"]);
    }
}
