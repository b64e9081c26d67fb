//! Rendering surface seam and paint colors.
//!
//! The editor does not rasterize anything itself. [`RichTextEdit::paint`]
//! issues a short list of primitive calls against a [`Surface`] that the host
//! implements on top of its renderer.
//!
//! [`RichTextEdit::paint`]: super::RichTextEdit::paint

use crate::text::Font;
use crate::types::{Color, Point, Rect};

/// Drawing primitives the editor needs from the host renderer.
pub trait Surface {
    /// Push the current state (clip, font).
    fn save(&mut self);
    /// Pop the state pushed by the matching [`save`](Self::save).
    fn restore(&mut self);
    /// Set the font used by subsequent [`draw_text`](Self::draw_text) calls.
    fn set_font(&mut self, font: &Font);
    /// Draw one styled run with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color, underline: bool);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Intersect the clip region with `rect` until the next restore.
    fn clip_rect(&mut self, rect: Rect);
}

/// Colors used when painting an editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorPalette {
    pub text: Color,
    pub background: Color,
    pub selection: Color,
    pub caret: Color,
    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,
}

impl Default for EditorPalette {
    fn default() -> Self {
        Self {
            text: Color::BLACK,
            background: Color::WHITE,
            selection: Color::from_rgba8(51, 153, 255, 100),
            caret: Color::BLACK,
            scrollbar_track: Color::from_rgb8(240, 240, 240),
            scrollbar_thumb: Color::from_rgb8(180, 180, 180),
        }
    }
}

/// A primitive recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    SetFont(Font),
    Text {
        text: String,
        origin: Point,
        color: Color,
        underline: bool,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    Clip(Rect),
}

/// A surface that records every call, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text of every `draw_text` call, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every filled rectangle painted with `color`.
    pub fn rects_with_color(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_font(&mut self, font: &Font) {
        self.commands.push(DrawCommand::SetFont(font.clone()));
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color, underline: bool) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            color,
            underline,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clip(rect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_filters() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        surface.draw_text("hi", Point::ZERO, Color::BLACK, true);
        surface.fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::BLACK);
        surface.restore();

        assert_eq!(surface.texts(), vec!["hi"]);
        assert_eq!(
            surface.rects_with_color(Color::BLACK),
            vec![Rect::new(1.0, 1.0, 2.0, 2.0)]
        );
        assert_eq!(surface.commands.len(), 5);
    }
}
