//! Greedy word wrapping by estimated character count.
//!
//! Line capacity is estimated from the width of an average glyph instead of
//! measuring every candidate line. The true width of each line is only known
//! after layout, so a wrapped line can end up a little wider or narrower than
//! the budget. Break points depend on this estimate; measuring words exactly
//! here would move them.

/// How many characters fit in `content_width` once `padding` is removed from
/// both sides. Never less than one.
pub fn max_chars_per_line(content_width: u32, padding: u32, average_glyph_width: u32) -> usize {
    let available = content_width as i64 - 2 * padding as i64;
    let glyph_width = average_glyph_width.max(1) as i64;

    available.div_euclid(glyph_width).max(1) as usize
}

/// Split `text` into lines no longer than `max_chars` characters where possible.
///
/// Each `\n` starts a new paragraph and paragraphs are wrapped independently.
/// An empty paragraph becomes one empty line, but empty `text` produces no
/// lines at all. Words are never broken: a word longer than `max_chars` gets a
/// line to itself.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        wrap_paragraph(paragraph, max_chars, &mut lines);
    }

    lines
}

fn wrap_paragraph(paragraph: &str, max_chars: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_chars = 0;

    for word in paragraph.split_whitespace() {
        let word_chars = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        }
    }

    // Also covers blank paragraphs, which keep their line.
    lines.push(current);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_at_word_boundary() {
        assert_eq!(wrap_text("hello world", 5), vec!["hello", "world"]);
        assert_eq!(wrap_text("hello world", 11), vec!["hello world"]);
        assert_eq!(wrap_text("hello world", 10), vec!["hello", "world"]);
    }

    #[test]
    fn packs_words_greedily() {
        assert_eq!(
            wrap_text("the quick brown fox jumps over the lazy dog", 10),
            vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
    }

    #[test]
    fn overlong_word_stays_whole() {
        assert_eq!(
            wrap_text("a supercalifragilistic word", 5),
            vec!["a", "supercalifragilistic", "word"]
        );
        assert_eq!(wrap_text("abcdefgh", 1), vec!["abcdefgh"]);
    }

    #[test]
    fn explicit_breaks_are_kept() {
        assert_eq!(wrap_text("one\n\ntwo", 80), vec!["one", "", "two"]);
        assert_eq!(wrap_text("one\r\ntwo", 80), vec!["one", "two"]);
        assert_eq!(wrap_text("trailing\n", 80), vec!["trailing", ""]);
        assert_eq!(wrap_text("   ", 80), vec![""]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(wrap_text("日本語 日本語", 7), vec!["日本語 日本語"]);
        assert_eq!(wrap_text("日本語 日本語", 6), vec!["日本語", "日本語"]);
    }

    #[test]
    fn word_sequence_is_preserved() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
                    eiusmod tempor incididunt ut labore et dolore magna aliqua.";
        for max_chars in 1..40 {
            let lines = wrap_text(text, max_chars);
            let rewrapped: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
            let original: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(rewrapped, original, "max_chars = {max_chars}");

            for line in &lines {
                let chars = line.chars().count();
                assert!(chars <= max_chars || !line.contains(' '), "{line:?} over {max_chars}");
            }
        }
    }

    #[test]
    fn capacity_from_glyph_width() {
        assert_eq!(max_chars_per_line(800, 20, 20), 38);
        assert_eq!(max_chars_per_line(100, 20, 10), 6);
        // Padding eats the whole width.
        assert_eq!(max_chars_per_line(30, 20, 10), 1);
        // No measurable glyphs.
        assert_eq!(max_chars_per_line(100, 0, 0), 100);
    }
}
