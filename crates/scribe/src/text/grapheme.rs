//! Grapheme and word boundaries in character offsets.
//!
//! Caret movement steps over whole grapheme clusters so that a combining
//! sequence or an emoji with modifiers is never split. All functions take and
//! return character offsets, matching [`StyledDocument`](super::StyledDocument).

use unicode_segmentation::UnicodeSegmentation;

use super::styled_document::byte_index;

fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// The grapheme boundary before `offset`, or 0.
pub fn prev_grapheme(text: &str, offset: usize) -> usize {
    let byte = byte_index(text, offset);
    text[..byte]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| char_offset(text, i))
        .unwrap_or(0)
}

/// The grapheme boundary after `offset`, or the end of `text`.
pub fn next_grapheme(text: &str, offset: usize) -> usize {
    let byte = byte_index(text, offset);
    match text[byte..].graphemes(true).next() {
        Some(g) => char_offset(text, byte + g.len()),
        None => text.chars().count(),
    }
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

/// The end of the next word after `offset`.
pub fn next_word(text: &str, offset: usize) -> usize {
    let byte = byte_index(text, offset);
    let mut advance = 0;
    let mut found_word = false;
    for segment in text[byte..].split_word_bounds() {
        if is_word(segment) {
            found_word = true;
        } else if found_word {
            break;
        }
        advance += segment.len();
    }
    char_offset(text, byte + advance)
}

/// The start of the word before `offset`.
pub fn prev_word(text: &str, offset: usize) -> usize {
    let byte = byte_index(text, offset);
    let mut start = byte;
    let mut found_word = false;
    for segment in text[..byte].split_word_bounds().rev() {
        if is_word(segment) {
            found_word = true;
        } else if found_word {
            break;
        }
        start -= segment.len();
    }
    char_offset(text, start)
}
