//! Caret movement.
//!
//! Every move updates the selection head and, unless extending, the anchor.
//! Vertical and page moves keep the preferred column; all others recompute it.

use super::RichTextEdit;
use crate::text::{Affinity, grapheme};

impl RichTextEdit {
    /// Move the caret by `delta` grapheme clusters.
    ///
    /// Without `extend`, a non-empty selection collapses to the edge in the
    /// direction of travel instead of moving.
    pub fn move_caret_horizontal(&mut self, delta: isize, extend: bool) {
        if !extend && !self.selection.is_empty() {
            let edge = if delta < 0 {
                self.selection.start()
            } else {
                self.selection.end()
            };
            self.move_head(edge, false, false);
            return;
        }
        let text = self.document.text();
        let mut head = self.selection.head;
        for _ in 0..delta.unsigned_abs() {
            head = if delta < 0 {
                grapheme::prev_grapheme(&text, head)
            } else {
                grapheme::next_grapheme(&text, head)
            };
        }
        self.move_head(head, extend, false);
    }

    /// Move the caret by `delta` words.
    pub fn move_caret_word(&mut self, delta: isize, extend: bool) {
        let text = self.document.text();
        let mut head = self.selection.head;
        for _ in 0..delta.unsigned_abs() {
            head = if delta < 0 {
                grapheme::prev_word(&text, head)
            } else {
                grapheme::next_word(&text, head)
            };
        }
        self.move_head(head, extend, false);
    }

    /// Move the caret `delta` visual lines up (negative) or down.
    ///
    /// The caret lands at the offset nearest the preferred column. Moving
    /// above the first line goes to the start, below the last to the end.
    pub fn move_caret_vertical(&mut self, delta: isize, extend: bool) {
        self.sync_layout();
        let line = self.caret_line();
        let count = self.layout.cached().map_or(1, |table| table.line_count());
        let target = line as isize + delta;

        if target < 0 {
            self.move_head(0, extend, true);
        } else if target as usize >= count {
            self.move_head(self.document.len(), extend, true);
        } else {
            let x = self.column();
            let head = self.layout.index_for_x(&self.document, target as usize, x);
            let affinity = self.layout.affinity_for_line(head, target as usize);
            self.move_head_at(head, affinity, extend, true);
        }
    }

    /// Move to the start or end of the current visual line.
    pub fn move_line_boundary(&mut self, to_end: bool, extend: bool) {
        self.sync_layout();
        let line = self.caret_line();
        if to_end {
            let head = self.layout.index_for_x(&self.document, line, f32::INFINITY);
            self.move_head(head, extend, false);
        } else {
            let head = self
                .layout
                .cached()
                .and_then(|table| table.line(line))
                .map_or(0, |line| line.start);
            let affinity = self.layout.affinity_for_line(head, line);
            self.move_head_at(head, affinity, extend, false);
        }
    }

    /// Move to the start or end of the document.
    pub fn move_document_boundary(&mut self, to_end: bool, extend: bool) {
        let head = if to_end { self.document.len() } else { 0 };
        self.move_head(head, extend, false);
    }

    /// Move by `delta` pages and scroll the view by as many viewport heights.
    ///
    /// A page is as many whole lines as fit in the viewport.
    pub fn page_move(&mut self, delta: isize, extend: bool) {
        self.sync_layout();
        let line_height = self.layout.line_height();
        let viewport = self.content_rect().height();
        let per_page = ((viewport / line_height).floor() as usize).max(1);
        let count = self.layout.cached().map_or(1, |table| table.line_count());
        let line = self.caret_line();

        let target = (line as isize + delta * per_page as isize).clamp(0, count as isize - 1);
        let x = self.column();
        let head = self
            .layout
            .index_for_x(&self.document, target as usize, x);
        let affinity = self.layout.affinity_for_line(head, target as usize);

        self.scroll_by(0.0, delta as f32 * viewport);
        self.move_head_at(head, affinity, extend, true);
    }

    /// The preferred column, seeded from the caret if unset.
    fn column(&mut self) -> f32 {
        match self.preferred_x {
            Some(x) => x,
            None => {
                let x = self
                    .layout
                    .x_for_index_at(&self.document, self.selection.head, self.affinity);
                self.preferred_x = Some(x);
                x
            }
        }
    }

    /// Visual line of the caret.
    pub(super) fn caret_line(&self) -> usize {
        self.layout.line_index_at(self.selection.head, self.affinity)
    }

    pub(super) fn move_head(&mut self, head: usize, extend: bool, keep_column: bool) {
        self.move_head_at(head, Affinity::Upstream, extend, keep_column);
    }

    pub(super) fn move_head_at(
        &mut self,
        head: usize,
        affinity: Affinity,
        extend: bool,
        keep_column: bool,
    ) {
        let before = self.observe();
        let head = head.min(self.document.len());
        if extend {
            self.selection.head = head;
        } else {
            self.selection.collapse_to(head);
        }
        self.affinity = affinity;
        self.typing_format = self.format_before(head);
        if !keep_column {
            self.refresh_preferred_x();
        }
        self.ensure_caret_visible();
        self.notify(before);
    }
}
