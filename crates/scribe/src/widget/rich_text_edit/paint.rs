use scribe_core::PerfSpan;
use scribe_core::logging::span_names;

use super::RichTextEdit;
use super::scroll::CARET_WIDTH;
use crate::types::{Point, Rect};
use crate::widget::painting::Surface;

impl RichTextEdit {
    /// Paint the editor onto `surface`.
    ///
    /// Draws the background, the selection highlight, the visible lines run
    /// by run, the caret and any scrollbars.
    pub fn paint(&mut self, surface: &mut dyn Surface) {
        let _span = PerfSpan::new(span_names::PAINT);
        self.sync_layout();

        let palette = self.palette;
        let content = self.content_rect();
        let line_height = self.layout.line_height();
        let lines = match self.layout.cached() {
            Some(table) => table.lines().clone(),
            None => return,
        };

        surface.save();
        surface.fill_rect(self.rect, palette.background);
        surface.clip_rect(content);

        let first = (self.scroll.y / line_height).floor().max(0.0) as usize;
        let visible = (content.height() / line_height).ceil() as usize + 1;
        let (sel_start, sel_end) = (self.selection.start(), self.selection.end());

        for (index, line) in lines.iter().enumerate().skip(first).take(visible) {
            let top = content.top() + index as f32 * line_height - self.scroll.y;
            let left = content.left() - self.scroll.x;

            let from = sel_start.max(line.start);
            let to = sel_end.min(line.content_end());
            if from < to {
                let x0 = self.layout.span_width(&self.document, line.start, from);
                let x1 = self.layout.span_width(&self.document, line.start, to);
                surface.fill_rect(
                    Rect::new(left + x0, top, x1 - x0, line_height),
                    palette.selection,
                );
            }

            let mut offset = line.start;
            let mut x = left;
            for run in self.document.runs_in_range(line.start, line.content_end()) {
                let font = self.layout.font().with_format(&run.format);
                let color = run.format.color.unwrap_or(palette.text);
                surface.set_font(&font);
                surface.draw_text(&run.text, Point::new(x, top), color, run.format.underline);
                offset += run.char_len();
                x = left + self.layout.span_width(&self.document, line.start, offset);
            }
            if line.hyphenated {
                let mut buf = [0u8; 4];
                let hyphen = self.layout.options().hyphen_char.encode_utf8(&mut buf);
                // Same font the line breaker measured the hyphen with.
                let font = if self.layout.options().style_aware && offset > line.start {
                    self.layout
                        .font()
                        .with_format(&self.document.format_at(offset - 1))
                } else {
                    self.layout.font().clone()
                };
                surface.set_font(&font);
                surface.draw_text(hyphen, Point::new(x, top), palette.text, false);
            }
        }

        if self.caret_visible && self.selection.is_empty() {
            let caret = self.layout.caret_to_xy_at(
                &self.document,
                self.selection.head,
                self.affinity,
                &self.view(),
            );
            surface.fill_rect(
                Rect::new(caret.x, caret.y, CARET_WIDTH, line_height),
                palette.caret,
            );
        }
        surface.restore();

        for bar in [self.vertical_scrollbar(), self.horizontal_scrollbar()]
            .into_iter()
            .flatten()
        {
            surface.fill_rect(bar.track, palette.scrollbar_track);
            surface.fill_rect(bar.thumb, palette.scrollbar_thumb);
        }
    }
}
