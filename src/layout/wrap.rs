//! Greedy word wrap against a fixed printable width.
//!
//! Built-in PDF fonts carry no metrics we can query at layout time, so line
//! capacity is estimated from the font size with an average Helvetica glyph
//! width of half an em.

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 0.3528;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

/// How many characters fit on one line of `width_mm` at `size_pt`.
///
/// Never less than one, so wrapping always makes progress.
pub fn line_capacity(width_mm: f32, size_pt: f32) -> usize {
    let glyph_mm = size_pt * AVG_GLYPH_EM * MM_PER_PT;
    if glyph_mm <= 0.0 {
        return 1;
    }
    ((width_mm / glyph_mm).floor() as usize).max(1)
}

/// Wrap `text` into lines of at most `max_chars` characters.
///
/// Explicit newlines are kept as line breaks. A word longer than a whole line
/// is split at the capacity. Empty input yields a single empty line so the
/// caller's cursor arithmetic still advances by one line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let before = lines.len();
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
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
                current.push_str(piece);
                current_len += piece_len;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        if lines.len() == before {
            lines.push(String::new());
        }
    }

    lines
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = word;
    while rest.chars().count() > max_chars {
        let cut = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(cut);
        pieces.push(head);
        rest = tail;
    }
    pieces.push(rest);
    pieces
}
