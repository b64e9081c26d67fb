//! Styled document model for rich text editing.
//!
//! The document stores text as an ordered list of [`TextRun`]s, each carrying
//! one [`CharFormat`]. All positions are character offsets (Unicode scalar
//! values) into the flattened text.
//!
//! After every mutation the run list is normalized:
//! - concatenating the run texts yields the document text
//! - no two adjacent runs have the same format
//! - there are no empty runs, except that an empty document is exactly one
//!   empty run with the default format
//!
//! Every mutation bumps [`StyledDocument::version`], which the layout engine
//! uses to decide whether its cached lines are still valid.

use scribe_core::logging::targets;

use crate::types::Color;

/// A boolean style attribute that can be toggled or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFlag {
    Bold,
    Italic,
    Underline,
}

/// A style change applied to every run in a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleEdit {
    /// Flip the flag on each covered run independently.
    Toggle(StyleFlag),
    /// Force the flag to a value.
    Set(StyleFlag, bool),
    /// Set the text color. `None` restores the default color.
    Color(Option<Color>),
}

/// Character-level formatting attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CharFormat {
    /// Whether the text is bold.
    pub bold: bool,
    /// Whether the text is italic.
    pub italic: bool,
    /// Whether the text has underline.
    pub underline: bool,
    /// Text color. None means use the editor's default text color.
    pub color: Option<Color>,
}

impl CharFormat {
    /// Create a new default (unstyled) format.
    pub const fn new() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            color: None,
        }
    }

    /// Create a bold format.
    pub const fn bold() -> Self {
        Self::new().with_bold(true)
    }

    /// Create an italic format.
    pub const fn italic() -> Self {
        Self::new().with_italic(true)
    }

    /// Check if this format has any styling applied.
    pub fn is_styled(&self) -> bool {
        *self != Self::default()
    }

    /// Builder method to set bold.
    pub const fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Builder method to set italic.
    pub const fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Builder method to set underline.
    pub const fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Builder method to set the text color.
    pub const fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    /// Read a boolean flag.
    pub fn flag(&self, flag: StyleFlag) -> bool {
        match flag {
            StyleFlag::Bold => self.bold,
            StyleFlag::Italic => self.italic,
            StyleFlag::Underline => self.underline,
        }
    }

    /// Write a boolean flag.
    pub fn set_flag(&mut self, flag: StyleFlag, value: bool) {
        match flag {
            StyleFlag::Bold => self.bold = value,
            StyleFlag::Italic => self.italic = value,
            StyleFlag::Underline => self.underline = value,
        }
    }

    /// Apply a style edit to this format.
    pub fn apply(&mut self, edit: StyleEdit) {
        match edit {
            StyleEdit::Toggle(flag) => self.set_flag(flag, !self.flag(flag)),
            StyleEdit::Set(flag, value) => self.set_flag(flag, value),
            StyleEdit::Color(color) => self.color = color,
        }
    }
}

/// A run of text sharing one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub format: CharFormat,
}

impl TextRun {
    /// Create a new run.
    pub fn new(text: impl Into<String>, format: CharFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }

    /// Length of the run in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Byte index of the `char_idx`-th character of `s`, or `s.len()` past the end.
pub(crate) fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// A styled text document stored as a list of format runs.
#[derive(Debug, Clone)]
pub struct StyledDocument {
    runs: Vec<TextRun>,
    /// Total length in characters.
    len: usize,
    version: u64,
}

impl Default for StyledDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl StyledDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            runs: vec![TextRun::new(String::new(), CharFormat::default())],
            len: 0,
            version: 0,
        }
    }

    /// Create a document from plain text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut doc = Self::new();
        doc.set_text(text);
        doc
    }

    /// The flattened text content.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Monotonic counter bumped by every mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The normalized runs.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Replace the content with one default-format run.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.len = text.chars().count();
        self.runs = vec![TextRun::new(text, CharFormat::default())];
        self.bump();
    }

    /// Replace all runs, e.g. when restoring a history snapshot.
    pub fn restore_runs(&mut self, runs: Vec<TextRun>) {
        self.len = runs.iter().map(TextRun::char_len).sum();
        self.runs = runs;
        self.normalize();
        self.bump();
    }

    /// Map an offset to `(run_index, offset_in_run)`.
    ///
    /// An offset at a run's start maps to that run with 0. An offset at the end
    /// of the document maps past the last run, to `(runs.len(), 0)`.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let mut acc = 0;
        for (i, run) in self.runs.iter().enumerate() {
            let run_len = run.char_len();
            if offset < acc + run_len {
                return (i, offset - acc);
            }
            acc += run_len;
        }
        (self.runs.len(), 0)
    }

    /// Ensure a run boundary exists at `offset` and return the index of the
    /// run that starts there.
    ///
    /// The split halves share the same format; they are merged back by the
    /// next normalization.
    pub fn split_at(&mut self, offset: usize) -> usize {
        let (index, within) = self.locate(offset);
        if within == 0 {
            return index;
        }
        let run = &mut self.runs[index];
        let at = byte_index(&run.text, within);
        let tail = run.text.split_off(at);
        let format = run.format;
        self.runs.insert(index + 1, TextRun::new(tail, format));
        index + 1
    }

    /// Insert `text` with `format` at `offset`.
    ///
    /// The offset is clamped to the document length. Empty text is ignored.
    pub fn insert_at(&mut self, offset: usize, text: &str, format: CharFormat) {
        if text.is_empty() {
            return;
        }
        let offset = offset.min(self.len);
        let index = self.split_at(offset);
        self.runs.insert(index, TextRun::new(text, format));
        self.len += text.chars().count();
        self.normalize();
        self.bump();
        tracing::trace!(target: targets::DOCUMENT, offset, len = self.len, "insert");
    }

    /// Delete the characters in `[a, b)` and return them.
    ///
    /// Reversed bounds are swapped and both are clamped. An empty range is
    /// ignored.
    pub fn delete_range(&mut self, a: usize, b: usize) -> String {
        let (start, end) = self.clamp_range(a, b);
        if start == end {
            return String::new();
        }
        let first = self.split_at(start);
        let last = self.split_at(end);
        let deleted: String = self
            .runs
            .drain(first..last)
            .map(|run| run.text)
            .collect();
        self.len -= end - start;
        self.normalize();
        self.bump();
        tracing::trace!(target: targets::DOCUMENT, start, end, "delete");
        deleted
    }

    /// Apply a style edit to every run covering `[a, b)`.
    ///
    /// Toggles flip each covered run independently, so toggling the same
    /// range twice restores the original flags.
    pub fn apply_style(&mut self, a: usize, b: usize, edit: StyleEdit) {
        let (start, end) = self.clamp_range(a, b);
        if start == end {
            return;
        }
        let first = self.split_at(start);
        let last = self.split_at(end);
        for run in &mut self.runs[first..last] {
            run.format.apply(edit);
        }
        self.normalize();
        self.bump();
        tracing::trace!(target: targets::DOCUMENT, start, end, ?edit, "apply style");
    }

    /// Clone the runs intersecting `[a, b)`, clipped to the range.
    pub fn runs_in_range(&self, a: usize, b: usize) -> Vec<TextRun> {
        let (start, end) = self.clamp_range(a, b);
        let mut out = Vec::new();
        if start == end {
            return out;
        }
        let mut pos = 0;
        for run in &self.runs {
            let run_len = run.char_len();
            let run_end = pos + run_len;
            if run_end > start && pos < end {
                let from = start.saturating_sub(pos);
                let to = end.min(run_end) - pos;
                let text = &run.text[byte_index(&run.text, from)..byte_index(&run.text, to)];
                out.push(TextRun::new(text, run.format));
            }
            if run_end >= end {
                break;
            }
            pos = run_end;
        }
        out
    }

    /// The text in `[a, b)`.
    pub fn slice(&self, a: usize, b: usize) -> String {
        self.runs_in_range(a, b)
            .into_iter()
            .map(|run| run.text)
            .collect()
    }

    /// The format of the character at `offset`, or of the last character when
    /// `offset` is at the end of the document.
    pub fn format_at(&self, offset: usize) -> CharFormat {
        let (index, _) = self.locate(offset);
        self.runs
            .get(index)
            .or_else(|| self.runs.last())
            .map(|run| run.format)
            .unwrap_or_default()
    }

    /// The format of `[a, b)` if it is uniform, `None` if mixed.
    pub fn format_for_range(&self, a: usize, b: usize) -> Option<CharFormat> {
        let runs = self.runs_in_range(a, b);
        match runs.split_first() {
            None => Some(self.format_at(a.min(b))),
            Some((first, rest)) => rest
                .iter()
                .all(|run| run.format == first.format)
                .then_some(first.format),
        }
    }

    fn clamp_range(&self, a: usize, b: usize) -> (usize, usize) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        (start.min(self.len), end.min(self.len))
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    /// Merge equal adjacent runs and drop empty ones.
    fn normalize(&mut self) {
        let mut merged: Vec<TextRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(prev) if prev.format == run.format => prev.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        if merged.is_empty() {
            merged.push(TextRun::new(String::new(), CharFormat::default()));
        }
        self.runs = merged;

        debug_assert_eq!(
            self.runs.iter().map(TextRun::char_len).sum::<usize>(),
            self.len,
            "run lengths diverged from document length"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> TextRun {
        TextRun::new(text, CharFormat::default())
    }

    #[test]
    fn test_empty_document() {
        let doc = StyledDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.text(), "");
        assert_eq!(doc.runs(), &[plain("")]);
    }

    #[test]
    fn test_set_text_replaces_formatting() {
        let mut doc = StyledDocument::from_text("Hello");
        doc.apply_style(0, 5, StyleEdit::Set(StyleFlag::Bold, true));
        doc.set_text("a\nb");
        assert_eq!(doc.text(), "a\nb");
        assert_eq!(doc.runs(), &[plain("a\nb")]);
    }

    #[test]
    fn test_locate_boundaries() {
        let mut doc = StyledDocument::from_text("abcdef");
        doc.apply_style(2, 4, StyleEdit::Toggle(StyleFlag::Italic));
        assert_eq!(doc.locate(0), (0, 0));
        assert_eq!(doc.locate(1), (0, 1));
        assert_eq!(doc.locate(2), (1, 0));
        assert_eq!(doc.locate(5), (2, 1));
        assert_eq!(doc.locate(6), (3, 0));
        assert_eq!(doc.locate(99), (3, 0));
    }

    #[test]
    fn test_split_at_is_idempotent_on_boundary() {
        let mut doc = StyledDocument::from_text("abcdef");
        assert_eq!(doc.split_at(3), 1);
        assert_eq!(doc.runs().len(), 2);
        assert_eq!(doc.split_at(3), 1);
        assert_eq!(doc.runs().len(), 2);
        assert_eq!(doc.split_at(0), 0);
        assert_eq!(doc.text(), "abcdef");
    }

    #[test]
    fn test_insert_plain_merges() {
        let mut doc = StyledDocument::from_text("Hello");
        doc.insert_at(5, ", world", CharFormat::default());
        assert_eq!(doc.text(), "Hello, world");
        assert_eq!(doc.runs().len(), 1);
    }

    #[test]
    fn test_insert_styled_in_middle() {
        let mut doc = StyledDocument::from_text("Held");
        doc.insert_at(2, "ll", CharFormat::bold());
        assert_eq!(
            doc.runs(),
            &[plain("He"), TextRun::new("ll", CharFormat::bold()), plain("ld")]
        );
    }

    #[test]
    fn test_insert_clamps_and_ignores_empty() {
        let mut doc = StyledDocument::from_text("ab");
        let version = doc.version();
        doc.insert_at(1, "", CharFormat::bold());
        assert_eq!(doc.version(), version);
        doc.insert_at(100, "c", CharFormat::default());
        assert_eq!(doc.text(), "abc");
    }

    #[test]
    fn test_delete_reversed_range() {
        let mut doc = StyledDocument::from_text("Hello, world!");
        let deleted = doc.delete_range(7, 5);
        assert_eq!(deleted, ", ");
        assert_eq!(doc.text(), "Helloworld!");
    }

    #[test]
    fn test_delete_across_runs_merges_neighbours() {
        let mut doc = StyledDocument::from_text("abcdef");
        doc.apply_style(2, 4, StyleEdit::Set(StyleFlag::Bold, true));
        assert_eq!(doc.runs().len(), 3);
        doc.delete_range(1, 5);
        assert_eq!(doc.runs(), &[plain("af")]);
    }

    #[test]
    fn test_delete_everything_leaves_default_run() {
        let mut doc = StyledDocument::new();
        doc.insert_at(0, "bold", CharFormat::bold());
        doc.delete_range(0, doc.len());
        assert_eq!(doc.runs(), &[plain("")]);
    }

    #[test]
    fn test_empty_delete_is_noop() {
        let mut doc = StyledDocument::from_text("abc");
        let version = doc.version();
        assert_eq!(doc.delete_range(2, 2), "");
        assert_eq!(doc.delete_range(10, 20), "");
        assert_eq!(doc.version(), version);
    }

    #[test]
    fn test_toggle_flips_each_run() {
        let mut doc = StyledDocument::from_text("abcdef");
        doc.apply_style(1, 3, StyleEdit::Set(StyleFlag::Bold, true));
        doc.apply_style(0, 6, StyleEdit::Toggle(StyleFlag::Bold));
        assert_eq!(
            doc.runs(),
            &[
                TextRun::new("a", CharFormat::bold()),
                plain("bc"),
                TextRun::new("def", CharFormat::bold()),
            ]
        );
    }

    #[test]
    fn test_color_edit() {
        let red = Color::from_rgb8(255, 0, 0);
        let mut doc = StyledDocument::from_text("abc");
        doc.apply_style(0, 2, StyleEdit::Color(Some(red)));
        assert_eq!(doc.format_at(0).color, Some(red));
        assert_eq!(doc.format_at(2).color, None);
        doc.apply_style(0, 3, StyleEdit::Color(None));
        assert_eq!(doc.runs().len(), 1);
    }

    #[test]
    fn test_runs_in_range_clips() {
        let mut doc = StyledDocument::from_text("abcdef");
        doc.apply_style(1, 4, StyleEdit::Set(StyleFlag::Underline, true));
        let version = doc.version();
        let runs = doc.runs_in_range(2, 5);
        let underline = CharFormat::new().with_underline(true);
        assert_eq!(runs, vec![TextRun::new("cd", underline), plain("e")]);
        assert_eq!(doc.version(), version);
        assert!(doc.runs_in_range(3, 3).is_empty());
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let mut doc = StyledDocument::from_text("héllo wörld");
        assert_eq!(doc.len(), 11);
        doc.apply_style(1, 2, StyleEdit::Set(StyleFlag::Italic, true));
        assert_eq!(doc.runs_in_range(0, 3)[1].text, "é");
        doc.delete_range(7, 8);
        assert_eq!(doc.text(), "héllo wrld");
        assert_eq!(doc.slice(6, 10), "wrld");
    }

    #[test]
    fn test_format_for_range() {
        let mut doc = StyledDocument::from_text("Hello, world!");
        doc.apply_style(0, 5, StyleEdit::Set(StyleFlag::Bold, true));
        assert_eq!(doc.format_for_range(0, 5), Some(CharFormat::bold()));
        assert_eq!(doc.format_for_range(3, 8), None);
        assert_eq!(doc.format_for_range(2, 2), Some(CharFormat::bold()));
    }

    #[test]
    fn test_format_at_end_uses_last_char() {
        let mut doc = StyledDocument::from_text("ab");
        doc.apply_style(1, 2, StyleEdit::Set(StyleFlag::Bold, true));
        assert!(doc.format_at(2).bold);
        assert!(!doc.format_at(0).bold);
    }

    #[test]
    fn test_restore_runs_normalizes() {
        let mut doc = StyledDocument::new();
        doc.restore_runs(vec![plain("a"), plain(""), plain("b")]);
        assert_eq!(doc.runs(), &[plain("ab")]);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_every_mutation_bumps_version() {
        let mut doc = StyledDocument::new();
        let v0 = doc.version();
        doc.insert_at(0, "abc", CharFormat::default());
        let v1 = doc.version();
        doc.apply_style(0, 1, StyleEdit::Toggle(StyleFlag::Bold));
        let v2 = doc.version();
        doc.delete_range(0, 1);
        let v3 = doc.version();
        assert!(v0 < v1 && v1 < v2 && v2 < v3);
    }
}
