//! Line breaking and coordinate mapping.
//!
//! [`LayoutEngine`] turns a [`StyledDocument`] and an available width into a
//! [`LineTable`] of [`VisualLine`]s. The table is memoized by the document
//! version and the width: [`LayoutEngine::ensure`] only recomputes when one of
//! them changed, and nothing else ever recomputes it.
//!
//! # Line breaking
//!
//! The text is split on `\n` into paragraphs. Each paragraph becomes one line
//! when wrapping is off. Otherwise lines are taken left to right: the longest
//! prefix that fits is found by binary search, then
//!
//! - in word mode, the line backs off to the last whitespace inside it;
//! - when there is no whitespace and hyphenation is on, characters are
//!   trimmed until the line plus the hyphen fits;
//! - otherwise the line is cut at the longest fitting prefix.
//!
//! Every line consumes at least one character, so even a zero width makes
//! progress. An empty paragraph yields one empty line.

use std::sync::Arc;

use scribe_core::PerfSpan;
use scribe_core::logging::{span_names, targets};

use crate::config::{EditorConfig, WordWrap};
use crate::types::{Point, Size};

use super::font::Font;
use super::measure::{TextMeasurer, max_fit};
use super::styled_document::{CharFormat, StyledDocument, byte_index};

/// Smallest line height used for mapping, whatever the options say.
const MIN_LINE_HEIGHT: f32 = 1.0;

/// The line a caret belongs to when it sits exactly at a soft wrap, where the
/// same offset ends one visual line and starts the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Affinity {
    /// Attached to the preceding character: the end of the wrapped line.
    #[default]
    Upstream,
    /// Attached to the following character: the start of the next line.
    Downstream,
}

/// Options controlling line breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub wrap: bool,
    pub word_wrap: WordWrap,
    pub hyphenate: bool,
    pub hyphen_char: char,
    /// Measure each style run with its own font variant.
    pub style_aware: bool,
    /// Line height in pixels.
    pub line_height: f32,
}

impl LayoutOptions {
    /// Derive layout options from an editor configuration and base font.
    pub fn from_config(config: &EditorConfig, font: &Font) -> Self {
        Self {
            wrap: config.wrap,
            word_wrap: config.word_wrap,
            hyphenate: config.hyphenate,
            hyphen_char: config.hyphen_char,
            style_aware: config.style_aware_layout,
            line_height: config.line_height.unwrap_or_else(|| font.line_height()),
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default(), &Font::default())
    }
}

/// One visual row of laid-out text.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualLine {
    /// Rendered text. Includes the hyphen of a hyphenated line, never the
    /// paragraph's newline.
    pub text: String,
    /// Offset of the first character.
    pub start: usize,
    /// Offset one past the last character, counting the newline of a
    /// hard-broken line.
    pub end: usize,
    /// Measured width of `text`.
    pub width: f32,
    /// The line ends its paragraph with a newline.
    pub hard_break: bool,
    /// The line ends with an inserted hyphen.
    pub hyphenated: bool,
}

impl VisualLine {
    /// End of the line's content, excluding a terminating newline.
    pub fn content_end(&self) -> usize {
        self.end - usize::from(self.hard_break)
    }

    /// Whether `offset` lies within `[start, content_end]`.
    pub fn contains(&self, offset: usize) -> bool {
        (self.start..=self.content_end()).contains(&offset)
    }
}

/// A memoized layout result.
#[derive(Debug, Clone)]
pub struct LineTable {
    version: u64,
    width: f32,
    lines: Arc<[VisualLine]>,
}

impl LineTable {
    /// Document version the table was computed for.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Available width the table was computed for.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn lines(&self) -> &Arc<[VisualLine]> {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&VisualLine> {
        self.lines.get(index)
    }
}

/// Where the text area sits on the surface and how far it is scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewGeometry {
    /// Top-left corner of the text area on the rendering surface.
    pub origin: Point,
    /// Current scroll offsets.
    pub scroll: Point,
}

/// Measures spans of one paragraph, optionally per style run.
struct Meter<'a> {
    measurer: &'a dyn TextMeasurer,
    font: &'a Font,
    style_aware: bool,
}

/// A paragraph prepared for breaking.
struct Paragraph {
    /// Absolute offset of the first character.
    start: usize,
    text: String,
    /// Byte index of every char boundary, `chars + 1` entries.
    bounds: Vec<usize>,
    /// `(start, end, format)` in paragraph-relative char offsets.
    segments: Vec<(usize, usize, CharFormat)>,
}

impl Paragraph {
    fn new(doc: &StyledDocument, start: usize, end: usize) -> Self {
        let mut text = String::new();
        let mut segments = Vec::new();
        let mut pos = 0;
        for run in doc.runs_in_range(start, end) {
            let len = run.char_len();
            segments.push((pos, pos + len, run.format));
            text.push_str(&run.text);
            pos += len;
        }
        let bounds = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            start,
            text,
            bounds,
            segments,
        }
    }

    fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    fn slice(&self, from: usize, to: usize) -> &str {
        &self.text[self.bounds[from]..self.bounds[to]]
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.slice(index, index + 1).chars().next()
    }

    fn format_at(&self, index: usize) -> CharFormat {
        self.segments
            .iter()
            .find(|(s, e, _)| (*s..*e).contains(&index))
            .map(|(_, _, format)| *format)
            .unwrap_or_default()
    }

    fn width(&self, meter: &Meter<'_>, from: usize, to: usize) -> f32 {
        if from >= to {
            return 0.0;
        }
        if !meter.style_aware {
            return meter.measurer.measure(self.slice(from, to), meter.font);
        }
        self.segments
            .iter()
            .filter_map(|&(s, e, format)| {
                let lo = s.max(from);
                let hi = e.min(to);
                (lo < hi).then(|| {
                    meter
                        .measurer
                        .measure(self.slice(lo, hi), &meter.font.with_format(&format))
                })
            })
            .sum()
    }
}

/// Computes and caches visual lines for a document.
pub struct LayoutEngine {
    measurer: Box<dyn TextMeasurer>,
    font: Font,
    options: LayoutOptions,
    cache: Option<LineTable>,
    passes: u64,
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("font", &self.font)
            .field("options", &self.options)
            .field("cached", &self.cache.is_some())
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl LayoutEngine {
    /// Create an engine with no cached layout.
    pub fn new(measurer: Box<dyn TextMeasurer>, font: Font, options: LayoutOptions) -> Self {
        Self {
            measurer,
            font,
            options,
            cache: None,
            passes: 0,
        }
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    /// Line height in pixels, never below one.
    pub fn line_height(&self) -> f32 {
        self.options.line_height.max(MIN_LINE_HEIGHT)
    }

    /// Replace the base font. Drops the cached layout.
    pub fn set_font(&mut self, font: Font) {
        if font != self.font {
            self.font = font;
            self.invalidate();
        }
    }

    /// Replace the options. Drops the cached layout if they changed.
    pub fn set_options(&mut self, options: LayoutOptions) {
        if options != self.options {
            self.options = options;
            self.invalidate();
        }
    }

    /// Replace the measurer. Drops the cached layout.
    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
        self.invalidate();
    }

    /// Drop the cached layout so the next [`ensure`](Self::ensure) recomputes.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Number of layout passes run so far.
    pub fn layout_passes(&self) -> u64 {
        self.passes
    }

    /// The cached table, if any, regardless of whether it is current.
    pub fn cached(&self) -> Option<&LineTable> {
        self.cache.as_ref()
    }

    /// Return the layout of `doc` at `width`, recomputing it only if the
    /// document version or the width changed since the last call.
    pub fn ensure(&mut self, doc: &StyledDocument, width: f32) -> &LineTable {
        let table = match self.cache.take() {
            Some(table) if table.version == doc.version() && table.width == width => table,
            _ => {
                self.passes += 1;
                LineTable {
                    version: doc.version(),
                    width,
                    lines: self.compute(doc, width).into(),
                }
            }
        };
        self.cache.insert(table)
    }

    fn meter(&self) -> Meter<'_> {
        Meter {
            measurer: self.measurer.as_ref(),
            font: &self.font,
            style_aware: self.options.style_aware,
        }
    }

    fn compute(&self, doc: &StyledDocument, width: f32) -> Vec<VisualLine> {
        let _span = PerfSpan::new(span_names::LAYOUT_PASS);
        let text = doc.text();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut paragraphs = text.split('\n').peekable();
        while let Some(para) = paragraphs.next() {
            let len = para.chars().count();
            let hard_break = paragraphs.peek().is_some();
            let paragraph = Paragraph::new(doc, start, start + len);
            self.break_paragraph(&paragraph, width, hard_break, &mut lines);
            start += len + usize::from(hard_break);
        }
        tracing::debug!(
            target: targets::LAYOUT,
            version = doc.version(),
            width,
            lines = lines.len(),
            "layout pass"
        );
        lines
    }

    fn break_paragraph(
        &self,
        para: &Paragraph,
        width: f32,
        hard_break: bool,
        out: &mut Vec<VisualLine>,
    ) {
        let meter = self.meter();
        let n = para.len();
        let first = out.len();

        if n == 0 || !self.options.wrap {
            out.push(self.make_line(&meter, para, 0, n, false));
        } else {
            let mut pos = 0;
            while pos < n {
                let fit = max_fit(n - pos, width, |k| para.width(&meter, pos, pos + k));
                let (end, hyphenated) = if pos + fit >= n {
                    (n, false)
                } else {
                    self.choose_break(&meter, para, pos, fit, width)
                };
                out.push(self.make_line(&meter, para, pos, end, hyphenated));
                pos = end;
            }
        }

        if hard_break && let Some(last) = out[first..].last_mut() {
            last.end += 1;
            last.hard_break = true;
        }
    }

    /// Pick the end of a line that overflows after `fit` characters.
    fn choose_break(
        &self,
        meter: &Meter<'_>,
        para: &Paragraph,
        pos: usize,
        fit: usize,
        width: f32,
    ) -> (usize, bool) {
        let hard_cut = (pos + fit.max(1), false);
        if self.options.word_wrap == WordWrap::Char {
            return hard_cut;
        }

        if let Some(space) = (pos..pos + fit)
            .rev()
            .find(|&i| para.char_at(i).is_some_and(char::is_whitespace))
        {
            return (space + 1, false);
        }

        if self.options.hyphenate && fit >= 1 {
            let mut buf = [0u8; 4];
            let hyphen: &str = self.options.hyphen_char.encode_utf8(&mut buf);
            let fits = |k: usize| {
                let font = meter.font.with_format(&para.format_at(pos + k - 1));
                let font = if meter.style_aware { &font } else { meter.font };
                para.width(meter, pos, pos + k) + meter.measurer.measure(hyphen, font) <= width
            };
            let mut k = fit;
            while k > 1 && !fits(k) {
                k -= 1;
            }
            if fits(k) {
                return (pos + k, true);
            }
        }

        hard_cut
    }

    fn make_line(
        &self,
        meter: &Meter<'_>,
        para: &Paragraph,
        from: usize,
        to: usize,
        hyphenated: bool,
    ) -> VisualLine {
        let mut text = para.slice(from, to).to_string();
        let mut width = para.width(meter, from, to);
        if hyphenated {
            let font = if meter.style_aware && to > from {
                meter.font.with_format(&para.format_at(to - 1))
            } else {
                meter.font.clone()
            };
            text.push(self.options.hyphen_char);
            width += meter
                .measurer
                .measure(&text[text.len() - self.options.hyphen_char.len_utf8()..], &font);
        }
        VisualLine {
            text,
            start: para.start + from,
            end: para.start + to,
            width,
            hard_break: false,
            hyphenated,
        }
    }

    // =========================================================================
    // Coordinate Mapping
    // =========================================================================
    //
    // These read the cached table; call `ensure` first.

    fn lines(&self) -> &[VisualLine] {
        self.cache.as_ref().map(|t| &*t.lines).unwrap_or(&[])
    }

    /// Width of the document span `[from, to)` as it is drawn.
    pub fn span_width(&self, doc: &StyledDocument, from: usize, to: usize) -> f32 {
        if from >= to {
            return 0.0;
        }
        if !self.options.style_aware {
            return self.measurer.measure(&doc.slice(from, to), &self.font);
        }
        doc.runs_in_range(from, to)
            .iter()
            .map(|run| {
                self.measurer
                    .measure(&run.text, &self.font.with_format(&run.format))
            })
            .sum()
    }

    /// Index of the line holding `offset`.
    ///
    /// An offset equal to the end of a newline-terminated line belongs to the
    /// next line, so a caret right after a newline sits at the start of the
    /// following line. At a soft wrap the offset stays on the wrapped line.
    pub fn line_index_of(&self, offset: usize) -> usize {
        let lines = self.lines();
        lines
            .partition_point(|line| line.content_end() < offset)
            .min(lines.len().saturating_sub(1))
    }

    /// Index of the line holding `offset`, honouring `affinity` at a soft wrap.
    pub fn line_index_at(&self, offset: usize, affinity: Affinity) -> usize {
        let lines = self.lines();
        let index = self.line_index_of(offset);
        match (affinity, lines.get(index), lines.get(index + 1)) {
            (Affinity::Downstream, Some(line), Some(next))
                if line.end == offset && next.start == offset =>
            {
                index + 1
            }
            _ => index,
        }
    }

    /// The affinity that places `offset` on line `line_index`.
    pub fn affinity_for_line(&self, offset: usize, line_index: usize) -> Affinity {
        if self.line_index_of(offset) != line_index
            && self.line_index_at(offset, Affinity::Downstream) == line_index
        {
            Affinity::Downstream
        } else {
            Affinity::Upstream
        }
    }

    /// Horizontal pixel position of `offset` within its line.
    pub fn x_for_index(&self, doc: &StyledDocument, offset: usize) -> f32 {
        self.x_for_index_at(doc, offset, Affinity::Upstream)
    }

    /// Like [`x_for_index`](Self::x_for_index), with the line chosen by
    /// `affinity`.
    pub fn x_for_index_at(&self, doc: &StyledDocument, offset: usize, affinity: Affinity) -> f32 {
        let Some(line) = self.lines().get(self.line_index_at(offset, affinity)) else {
            return 0.0;
        };
        let offset = offset.clamp(line.start, line.content_end());
        self.span_width(doc, line.start, offset)
    }

    /// The offset on line `line_index` whose boundary is nearest to `x`.
    ///
    /// Never returns a position past the line's content.
    pub fn index_for_x(&self, doc: &StyledDocument, line_index: usize, x: f32) -> usize {
        let lines = self.lines();
        let Some(line) = lines.get(line_index.min(lines.len().saturating_sub(1))) else {
            return 0;
        };
        let limit = line.content_end();
        let count = limit - line.start;
        if x <= 0.0 || count == 0 {
            return line.start;
        }

        let text = doc.slice(line.start, limit);
        let runs = if self.options.style_aware {
            doc.runs_in_range(line.start, limit)
        } else {
            Vec::new()
        };
        let prefix_width = |k: usize| -> f32 {
            if !self.options.style_aware {
                return self.measurer.measure(&text[..byte_index(&text, k)], &self.font);
            }
            let mut remaining = k;
            let mut total = 0.0;
            for run in &runs {
                if remaining == 0 {
                    break;
                }
                let take = remaining.min(run.char_len());
                let font = self.font.with_format(&run.format);
                total += self
                    .measurer
                    .measure(&run.text[..byte_index(&run.text, take)], &font);
                remaining -= take;
            }
            total
        };

        let fit = max_fit(count, x, prefix_width);
        if fit < count {
            let before = x - prefix_width(fit);
            let after = prefix_width(fit + 1) - x;
            if after < before {
                return line.start + fit + 1;
            }
        }
        line.start + fit
    }

    /// Surface position of the top of the caret at `offset`.
    pub fn caret_to_xy(&self, doc: &StyledDocument, offset: usize, view: &ViewGeometry) -> Point {
        self.caret_to_xy_at(doc, offset, Affinity::Upstream, view)
    }

    /// Like [`caret_to_xy`](Self::caret_to_xy), with the line chosen by
    /// `affinity`.
    pub fn caret_to_xy_at(
        &self,
        doc: &StyledDocument,
        offset: usize,
        affinity: Affinity,
        view: &ViewGeometry,
    ) -> Point {
        let line = self.line_index_at(offset, affinity);
        Point::new(
            view.origin.x + self.x_for_index_at(doc, offset, affinity) - view.scroll.x,
            view.origin.y + line as f32 * self.line_height() - view.scroll.y,
        )
    }

    /// The caret offset nearest to a surface position.
    pub fn xy_to_caret(&self, doc: &StyledDocument, x: f32, y: f32, view: &ViewGeometry) -> usize {
        self.hit_test(doc, x, y, view).0
    }

    /// The caret offset nearest to a surface position, with the affinity
    /// that keeps it on the line under the point.
    pub fn hit_test(
        &self,
        doc: &StyledDocument,
        x: f32,
        y: f32,
        view: &ViewGeometry,
    ) -> (usize, Affinity) {
        let count = self.lines().len();
        if count == 0 {
            return (0, Affinity::Upstream);
        }
        let content_y = y - view.origin.y + view.scroll.y;
        let line = if content_y <= 0.0 {
            0
        } else {
            ((content_y / self.line_height()) as usize).min(count - 1)
        };
        let offset = self.index_for_x(doc, line, x - view.origin.x + view.scroll.x);
        (offset, self.affinity_for_line(offset, line))
    }

    /// Width of the widest line and total height of all lines.
    pub fn content_size(&self) -> Size {
        let lines = self.lines();
        let width = lines.iter().map(|line| line.width).fold(0.0, f32::max);
        Size::new(width, lines.len() as f32 * self.line_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{MonospaceMeasurer, StyleEdit, StyleFlag};

    fn engine(options: LayoutOptions) -> LayoutEngine {
        LayoutEngine::new(
            Box::new(MonospaceMeasurer::new(10.0)),
            Font::default(),
            options,
        )
    }

    fn options() -> LayoutOptions {
        LayoutOptions {
            line_height: 20.0,
            ..LayoutOptions::default()
        }
    }

    fn texts(table: &LineTable) -> Vec<&str> {
        table.lines().iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_empty_document_has_one_line() {
        let mut engine = engine(options());
        let doc = StyledDocument::new();
        let table = engine.ensure(&doc, 100.0);
        assert_eq!(table.line_count(), 1);
        let line = &table.lines()[0];
        assert_eq!((line.start, line.end), (0, 0));
        assert_eq!(line.text, "");
    }

    #[test]
    fn test_no_wrap_one_line_per_paragraph() {
        let mut engine = engine(LayoutOptions {
            wrap: false,
            ..options()
        });
        let doc = StyledDocument::from_text("a long first line\nb\n");
        let table = engine.ensure(&doc, 30.0);
        assert_eq!(texts(table), vec!["a long first line", "b", ""]);
        let lines = table.lines();
        assert_eq!((lines[0].start, lines[0].end), (0, 18));
        assert!(lines[0].hard_break);
        assert_eq!(lines[0].content_end(), 17);
        assert_eq!((lines[1].start, lines[1].end), (18, 20));
        assert_eq!((lines[2].start, lines[2].end), (20, 20));
        assert!(!lines[2].hard_break);
    }

    #[test]
    fn test_word_wrap_backs_off_to_space() {
        let mut engine = engine(options());
        let doc = StyledDocument::from_text("ab cdefgh");
        let table = engine.ensure(&doc, 50.0);
        assert_eq!(texts(table), vec!["ab ", "cdefg", "h"]);
    }

    #[test]
    fn test_space_at_overflow_starts_next_line() {
        let mut engine = engine(options());
        let doc = StyledDocument::from_text("abcde fgh");
        let table = engine.ensure(&doc, 50.0);
        assert_eq!(texts(table), vec!["abcde", " fgh"]);
        assert!(table.lines().iter().all(|line| line.width <= 50.0));
        assert_eq!(engine.content_size().width, 50.0);
    }

    #[test]
    fn test_char_wrap_cuts_anywhere() {
        let mut engine = engine(LayoutOptions {
            word_wrap: WordWrap::Char,
            ..options()
        });
        let doc = StyledDocument::from_text("ab cdefgh");
        let table = engine.ensure(&doc, 50.0);
        assert_eq!(texts(table), vec!["ab cd", "efgh"]);
    }

    #[test]
    fn test_hyphenation() {
        let mut engine = engine(LayoutOptions {
            hyphenate: true,
            ..options()
        });
        let doc = StyledDocument::from_text("abcdefgh");
        let table = engine.ensure(&doc, 50.0);
        assert_eq!(texts(table), vec!["abcd-", "efgh"]);
        let first = &table.lines()[0];
        assert!(first.hyphenated);
        assert_eq!((first.start, first.end), (0, 4));
        assert_eq!(first.width, 50.0);
    }

    #[test]
    fn test_hyphenation_falls_back_to_hard_cut() {
        let mut engine = engine(LayoutOptions {
            hyphenate: true,
            ..options()
        });
        let doc = StyledDocument::from_text("abc");
        let table = engine.ensure(&doc, 15.0);
        assert_eq!(texts(table), vec!["a", "b", "c"]);
        assert!(table.lines().iter().all(|l| !l.hyphenated));
    }

    #[test]
    fn test_zero_width_makes_progress() {
        let mut engine = engine(options());
        let doc = StyledDocument::from_text("ab c");
        let table = engine.ensure(&doc, 0.0);
        assert_eq!(texts(table), vec!["a", "b", " ", "c"]);
    }

    #[test]
    fn test_style_aware_measurement() {
        let mut engine = LayoutEngine::new(
            Box::new(MonospaceMeasurer::new(10.0).with_bold_extra(10.0)),
            Font::default(),
            LayoutOptions {
                style_aware: true,
                word_wrap: WordWrap::Char,
                ..options()
            },
        );
        let mut doc = StyledDocument::from_text("abcdef");
        doc.apply_style(0, 2, StyleEdit::Set(StyleFlag::Bold, true));
        let table = engine.ensure(&doc, 60.0);
        // "ab" is 40 wide in bold, leaving room for two plain chars.
        assert_eq!(texts(table), vec!["abcd", "ef"]);
        assert_eq!(engine.x_for_index(&doc, 2), 40.0);
        assert_eq!(engine.index_for_x(&doc, 0, 44.0), 2);
    }

    #[test]
    fn test_cache_reused_until_version_or_width_changes() {
        let mut engine = engine(options());
        let mut doc = StyledDocument::from_text("hello world");
        let first = Arc::clone(engine.ensure(&doc, 100.0).lines());
        let second = Arc::clone(engine.ensure(&doc, 100.0).lines());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(engine.layout_passes(), 1);

        engine.ensure(&doc, 60.0);
        assert_eq!(engine.layout_passes(), 2);

        doc.insert_at(0, "x", CharFormat::default());
        engine.ensure(&doc, 60.0);
        assert_eq!(engine.layout_passes(), 3);

        engine.invalidate();
        engine.ensure(&doc, 60.0);
        assert_eq!(engine.layout_passes(), 4);
    }

    #[test]
    fn test_line_index_after_newline() {
        let mut engine = engine(options());
        let doc = StyledDocument::from_text("ab\ncd");
        engine.ensure(&doc, 100.0);
        assert_eq!(engine.line_index_of(0), 0);
        assert_eq!(engine.line_index_of(2), 0);
        assert_eq!(engine.line_index_of(3), 1);
        assert_eq!(engine.line_index_of(5), 1);
        assert_eq!(engine.line_index_of(50), 1);
    }

    #[test]
    fn test_index_for_x_nearest_boundary() {
        let mut engine = engine(options());
        let doc = StyledDocument::from_text("abcd\nef");
        engine.ensure(&doc, 100.0);
        assert_eq!(engine.index_for_x(&doc, 0, -5.0), 0);
        assert_eq!(engine.index_for_x(&doc, 0, 14.0), 1);
        assert_eq!(engine.index_for_x(&doc, 0, 16.0), 2);
        assert_eq!(engine.index_for_x(&doc, 0, 500.0), 4);
        assert_eq!(engine.index_for_x(&doc, 1, 500.0), 7);
    }

    #[test]
    fn test_soft_wrap_end_stays_on_wrapped_line() {
        let mut engine = engine(options());
        let doc = StyledDocument::from_text("ab cdefgh");
        engine.ensure(&doc, 50.0);
        assert_eq!(engine.index_for_x(&doc, 0, 500.0), 3);
        assert_eq!(engine.line_index_of(3), 0);
        assert_eq!(engine.x_for_index(&doc, 3), 30.0);
        assert_eq!(engine.line_index_of(4), 1);
        assert_eq!(engine.index_for_x(&doc, 1, 500.0), 8);
    }

    #[test]
    fn test_downstream_affinity_at_soft_wrap() {
        let mut engine = engine(options());
        let doc = StyledDocument::from_text("ab cdefgh");
        engine.ensure(&doc, 50.0);
        assert_eq!(engine.line_index_at(3, Affinity::Upstream), 0);
        assert_eq!(engine.line_index_at(3, Affinity::Downstream), 1);
        assert_eq!(engine.x_for_index_at(&doc, 3, Affinity::Downstream), 0.0);
        assert_eq!(engine.affinity_for_line(3, 1), Affinity::Downstream);
        assert_eq!(engine.affinity_for_line(3, 0), Affinity::Upstream);
        // Not a wrap point: affinity changes nothing.
        assert_eq!(engine.line_index_at(5, Affinity::Downstream), 1);

        let view = ViewGeometry::default();
        assert_eq!(engine.hit_test(&doc, 0.0, 25.0, &view), (3, Affinity::Downstream));
        assert_eq!(engine.hit_test(&doc, 500.0, 5.0, &view), (3, Affinity::Upstream));
    }

    #[test]
    fn test_affinity_ignored_after_newline() {
        let mut engine = engine(options());
        let doc = StyledDocument::from_text("ab\ncd");
        engine.ensure(&doc, 100.0);
        assert_eq!(engine.line_index_at(3, Affinity::Upstream), 1);
        assert_eq!(engine.line_index_at(3, Affinity::Downstream), 1);
        assert_eq!(engine.line_index_at(2, Affinity::Downstream), 0);
    }

    #[test]
    fn test_caret_xy_round_trip_with_scroll() {
        let mut engine = engine(options());
        let doc = StyledDocument::from_text("abc\ndefg\nhi");
        engine.ensure(&doc, 200.0);
        let view = ViewGeometry {
            origin: Point::new(5.0, 5.0),
            scroll: Point::new(0.0, 20.0),
        };
        let pos = engine.caret_to_xy(&doc, 6, &view);
        assert_eq!(pos, Point::new(25.0, 5.0));
        assert_eq!(engine.xy_to_caret(&doc, pos.x, pos.y + 1.0, &view), 6);
        assert_eq!(engine.xy_to_caret(&doc, 0.0, -100.0, &view), 0);
        assert_eq!(engine.xy_to_caret(&doc, 500.0, 500.0, &view), 11);
    }

    #[test]
    fn test_content_size() {
        let mut engine = engine(options());
        let doc = StyledDocument::from_text("abc\nde");
        engine.ensure(&doc, 200.0);
        assert_eq!(engine.content_size(), Size::new(30.0, 40.0));
    }
}
