//! Viewport geometry, scrolling, scrollbars and auto-resize.

use scribe_core::logging::targets;

use super::{InteractionState, RichTextEdit};
use crate::text::ViewGeometry;
use crate::types::{Point, Rect, Size};

/// Caret width in pixels.
pub(super) const CARET_WIDTH: f32 = 2.0;
/// Smallest scrollbar thumb length in pixels.
const MIN_THUMB_LENGTH: f32 = 20.0;

/// Track and thumb rectangles of one scrollbar, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarGeometry {
    pub track: Rect,
    pub thumb: Rect,
}

impl RichTextEdit {
    // =========================================================================
    // Geometry
    // =========================================================================

    /// Outer rectangle of the editor.
    pub fn geometry(&self) -> Rect {
        self.rect
    }

    /// Place the editor on the surface.
    ///
    /// With auto-resize enabled, the controlled axis is recomputed right
    /// away and may override the requested size.
    pub fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
        self.update_auto_size();
        self.refresh_preferred_x();
        self.clamp_scroll();
    }

    /// Interior area text is laid out and drawn in.
    ///
    /// Inset by the padding, minus room for each enabled scrollbar.
    pub fn content_rect(&self) -> Rect {
        let padding = self.config.padding;
        Rect::new(
            self.rect.left() + padding,
            self.rect.top() + padding,
            (self.rect.width() - padding * 2.0 - self.reserved_width()).max(0.0),
            (self.rect.height() - padding * 2.0 - self.reserved_height()).max(0.0),
        )
    }

    fn reserved_width(&self) -> f32 {
        if self.config.scroll_y {
            self.config.scrollbar_thickness
        } else {
            0.0
        }
    }

    fn reserved_height(&self) -> f32 {
        if self.config.scroll_x {
            self.config.scrollbar_thickness
        } else {
            0.0
        }
    }

    /// Width lines are wrapped to.
    ///
    /// When the width follows the content, wrapping happens at the largest
    /// width the editor may grow to.
    pub(super) fn wrap_width(&self) -> f32 {
        let resize = &self.config.auto_resize_x;
        if resize.enabled {
            (resize.max - self.config.padding * 2.0 - self.reserved_width()).max(0.0)
        } else {
            self.content_rect().width()
        }
    }

    pub(super) fn view(&self) -> ViewGeometry {
        ViewGeometry {
            origin: self.content_rect().origin,
            scroll: self.scroll,
        }
    }

    /// Bring the layout cache up to date with the document and width.
    pub(super) fn sync_layout(&mut self) {
        let width = self.wrap_width();
        self.layout.ensure(&self.document, width);
    }

    /// Resize the auto-sized axes to fit the laid out content.
    pub(super) fn update_auto_size(&mut self) {
        let (resize_x, resize_y) = (self.config.auto_resize_x, self.config.auto_resize_y);
        if !resize_x.enabled && !resize_y.enabled {
            return;
        }
        self.sync_layout();
        let content = self.layout.content_size();
        let padding = self.config.padding * 2.0;

        let mut size = self.rect.size;
        if resize_x.enabled {
            size.width =
                resize_x.clamp(content.width + CARET_WIDTH + padding + self.reserved_width());
        }
        if resize_y.enabled {
            size.height = resize_y.clamp(content.height + padding + self.reserved_height());
        }
        if size != self.rect.size {
            self.rect.size = size;
            tracing::debug!(
                target: targets::EDITOR,
                width = size.width,
                height = size.height,
                "auto-resized"
            );
            self.resized.emit(size);
        }
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> Point {
        self.scroll
    }

    /// Largest valid scroll offset on each axis.
    ///
    /// An axis with scrolling disabled never scrolls.
    pub fn max_scroll(&mut self) -> Point {
        self.sync_layout();
        let content = self.layout.content_size();
        let viewport = self.content_rect();
        let max_x = if self.config.scroll_x {
            (content.width + CARET_WIDTH - viewport.width()).max(0.0)
        } else {
            0.0
        };
        let max_y = if self.config.scroll_y {
            (content.height - viewport.height()).max(0.0)
        } else {
            0.0
        };
        Point::new(max_x, max_y)
    }

    /// Set the scroll offset, clamped to the valid range.
    pub fn set_scroll_offset(&mut self, offset: Point) {
        let max = self.max_scroll();
        self.scroll = Point::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y));
    }

    /// Scroll by a delta, clamped to the valid range.
    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        self.set_scroll_offset(Point::new(self.scroll.x + dx, self.scroll.y + dy));
    }

    pub(super) fn clamp_scroll(&mut self) {
        self.set_scroll_offset(self.scroll);
    }

    /// Scroll the least amount that brings the caret's line into view.
    pub fn ensure_caret_visible(&mut self) {
        self.sync_layout();
        let head = self.selection.head;
        let line_height = self.layout.line_height();
        let x = self.layout.x_for_index_at(&self.document, head, self.affinity);
        let y = self.caret_line() as f32 * line_height;
        let viewport = self.content_rect();

        if y < self.scroll.y {
            self.scroll.y = y;
        } else if y + line_height > self.scroll.y + viewport.height() {
            self.scroll.y = y + line_height - viewport.height();
        }
        if x < self.scroll.x {
            self.scroll.x = x;
        } else if x + CARET_WIDTH > self.scroll.x + viewport.width() {
            self.scroll.x = x + CARET_WIDTH - viewport.width();
        }
        self.clamp_scroll();
    }

    // =========================================================================
    // Scrollbars
    // =========================================================================

    /// The vertical scrollbar, when vertical scrolling is enabled and the
    /// content overflows.
    pub fn vertical_scrollbar(&mut self) -> Option<ScrollbarGeometry> {
        let max = self.max_scroll().y;
        if !self.config.scroll_y || max <= 0.0 {
            return None;
        }
        let thickness = self.config.scrollbar_thickness;
        let track = Rect::new(
            self.rect.right() - thickness,
            self.rect.top(),
            thickness,
            self.rect.height() - self.reserved_height(),
        );
        let viewport = self.content_rect().height();
        let (start, length) = thumb_span(track.height(), viewport, viewport + max, self.scroll.y, max);
        Some(ScrollbarGeometry {
            track,
            thumb: Rect::new(track.left(), track.top() + start, thickness, length),
        })
    }

    /// The horizontal scrollbar, when horizontal scrolling is enabled and the
    /// content overflows.
    pub fn horizontal_scrollbar(&mut self) -> Option<ScrollbarGeometry> {
        let max = self.max_scroll().x;
        if !self.config.scroll_x || max <= 0.0 {
            return None;
        }
        let thickness = self.config.scrollbar_thickness;
        let track = Rect::new(
            self.rect.left(),
            self.rect.bottom() - thickness,
            self.rect.width() - self.reserved_width(),
            thickness,
        );
        let viewport = self.content_rect().width();
        let (start, length) = thumb_span(track.width(), viewport, viewport + max, self.scroll.x, max);
        Some(ScrollbarGeometry {
            track,
            thumb: Rect::new(track.left() + start, track.top(), length, thickness),
        })
    }

    /// Start a scrollbar interaction if `pos` hits a scrollbar.
    ///
    /// Pressing a thumb starts a drag. Pressing the track pages toward the
    /// pointer. Returns `false` when no scrollbar was hit.
    pub(super) fn scrollbar_press(&mut self, pos: Point) -> bool {
        if let Some(bar) = self.vertical_scrollbar()
            && bar.track.contains(pos)
        {
            if bar.thumb.contains(pos) {
                self.interaction.state = InteractionState::DraggingScrollbarY;
                self.interaction.scrollbar_grab = pos.y - bar.thumb.top();
            } else {
                let page = self.content_rect().height();
                let dy = if pos.y < bar.thumb.top() { -page } else { page };
                self.scroll_by(0.0, dy);
            }
            return true;
        }
        if let Some(bar) = self.horizontal_scrollbar()
            && bar.track.contains(pos)
        {
            if bar.thumb.contains(pos) {
                self.interaction.state = InteractionState::DraggingScrollbarX;
                self.interaction.scrollbar_grab = pos.x - bar.thumb.left();
            } else {
                let page = self.content_rect().width();
                let dx = if pos.x < bar.thumb.left() { -page } else { page };
                self.scroll_by(dx, 0.0);
            }
            return true;
        }
        false
    }

    /// Follow the pointer during a thumb drag.
    pub(super) fn scrollbar_drag(&mut self, pos: Point) {
        match self.interaction.state {
            InteractionState::DraggingScrollbarY => {
                if let Some(bar) = self.vertical_scrollbar() {
                    let travel = bar.track.height() - bar.thumb.height();
                    let max = self.max_scroll().y;
                    let top = pos.y - self.interaction.scrollbar_grab - bar.track.top();
                    self.scroll.y = scroll_for_thumb(top, travel, max);
                }
            }
            InteractionState::DraggingScrollbarX => {
                if let Some(bar) = self.horizontal_scrollbar() {
                    let travel = bar.track.width() - bar.thumb.width();
                    let max = self.max_scroll().x;
                    let left = pos.x - self.interaction.scrollbar_grab - bar.track.left();
                    self.scroll.x = scroll_for_thumb(left, travel, max);
                }
            }
            _ => {}
        }
    }

    /// Visible size of the content area.
    pub fn viewport_size(&self) -> Size {
        self.content_rect().size
    }
}

/// Thumb offset and length along a track.
fn thumb_span(track: f32, viewport: f32, content: f32, scroll: f32, max: f32) -> (f32, f32) {
    let ratio = if content > 0.0 { viewport / content } else { 1.0 };
    let length = (track * ratio).max(MIN_THUMB_LENGTH).min(track);
    let travel = track - length;
    let start = if max > 0.0 { travel * (scroll / max) } else { 0.0 };
    (start, length)
}

fn scroll_for_thumb(offset: f32, travel: f32, max: f32) -> f32 {
    if travel <= 0.0 {
        return 0.0;
    }
    (offset / travel).clamp(0.0, 1.0) * max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumb_span_proportional() {
        let (start, length) = thumb_span(100.0, 50.0, 200.0, 0.0, 150.0);
        assert_eq!(start, 0.0);
        assert_eq!(length, 25.0);

        let (start, _) = thumb_span(100.0, 50.0, 200.0, 150.0, 150.0);
        assert_eq!(start, 75.0);
    }

    #[test]
    fn test_thumb_span_minimum_length() {
        let (_, length) = thumb_span(100.0, 10.0, 10_000.0, 0.0, 9_990.0);
        assert_eq!(length, MIN_THUMB_LENGTH);
    }

    #[test]
    fn test_scroll_for_thumb_clamps() {
        assert_eq!(scroll_for_thumb(-10.0, 80.0, 400.0), 0.0);
        assert_eq!(scroll_for_thumb(40.0, 80.0, 400.0), 200.0);
        assert_eq!(scroll_for_thumb(500.0, 80.0, 400.0), 400.0);
        assert_eq!(scroll_for_thumb(10.0, 0.0, 400.0), 0.0);
    }
}
