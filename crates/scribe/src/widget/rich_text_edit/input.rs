//! Keyboard, pointer and wheel handling.

use super::{InteractionState, RichTextEdit};
use crate::text::{Affinity, StyleFlag};
use crate::types::Point;
use crate::widget::events::{Key, KeyPressEvent, MouseButton, PointerEvent, WheelEvent};

/// Pixels scrolled per wheel notch.
const WHEEL_STEP: f32 = 40.0;
/// Wheel delta reported for one notch.
const WHEEL_NOTCH: f32 = 120.0;

impl RichTextEdit {
    /// Handle a key press. Returns `true` if the editor consumed it.
    ///
    /// Keys are left to the input method while a composition is open.
    pub fn handle_key(&mut self, event: &KeyPressEvent) -> bool {
        if self.interaction.state == InteractionState::Composing {
            return false;
        }
        let shift = event.modifiers.shift;
        if event.modifiers.is_command() {
            return self.handle_shortcut(event.key, shift);
        }

        match event.key {
            Key::ArrowLeft => self.move_caret_horizontal(-1, shift),
            Key::ArrowRight => self.move_caret_horizontal(1, shift),
            Key::ArrowUp => self.move_caret_vertical(-1, shift),
            Key::ArrowDown => self.move_caret_vertical(1, shift),
            Key::Home => self.move_line_boundary(false, shift),
            Key::End => self.move_line_boundary(true, shift),
            Key::PageUp => self.page_move(-1, shift),
            Key::PageDown => self.page_move(1, shift),
            Key::Backspace => self.delete_backward(false),
            Key::Delete => self.delete_forward(false),
            Key::Enter => self.insert_newline(),
            Key::Tab => self.insert_tab(),
            Key::Escape => return false,
            _ => {
                if event.text.is_empty() || event.text.chars().any(char::is_control) {
                    return false;
                }
                self.type_text(&event.text);
            }
        }
        true
    }

    fn handle_shortcut(&mut self, key: Key, shift: bool) -> bool {
        match key {
            Key::A => self.select_all(),
            Key::C => self.copy(),
            Key::X => self.cut(),
            Key::V => self.paste(),
            Key::Z if shift => {
                self.redo();
            }
            Key::Z => {
                self.undo();
            }
            Key::Y => {
                self.redo();
            }
            Key::B => self.toggle_style(StyleFlag::Bold),
            Key::I => self.toggle_style(StyleFlag::Italic),
            Key::U => self.toggle_style(StyleFlag::Underline),
            Key::ArrowLeft => self.move_caret_word(-1, shift),
            Key::ArrowRight => self.move_caret_word(1, shift),
            Key::Home => self.move_document_boundary(false, shift),
            Key::End => self.move_document_boundary(true, shift),
            Key::Backspace => self.delete_backward(true),
            Key::Delete => self.delete_forward(true),
            _ => return false,
        }
        true
    }

    /// Handle a pointer press.
    ///
    /// Scrollbars take the press first. Otherwise the caret moves to the
    /// pressed position and a drag selection starts; with Shift held the
    /// existing selection is extended instead.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        if self.scrollbar_press(event.pos) {
            return true;
        }
        if !self.rect.contains(event.pos) {
            return false;
        }
        let (offset, affinity) = self.hit_test(event.pos);
        self.move_head_at(offset, affinity, event.modifiers.shift, false);
        self.interaction.state = InteractionState::Selecting;
        true
    }

    /// Handle pointer motion during a drag.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> bool {
        match self.interaction.state {
            InteractionState::Selecting => {
                let (offset, affinity) = self.hit_test(event.pos);
                if offset != self.selection.head || affinity != self.affinity {
                    self.move_head_at(offset, affinity, true, false);
                }
                true
            }
            InteractionState::DraggingScrollbarX | InteractionState::DraggingScrollbarY => {
                self.scrollbar_drag(event.pos);
                true
            }
            InteractionState::Idle | InteractionState::Composing => false,
        }
    }

    /// Handle a pointer release, ending any drag.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        match self.interaction.state {
            InteractionState::Selecting
            | InteractionState::DraggingScrollbarX
            | InteractionState::DraggingScrollbarY => {
                self.interaction.state = InteractionState::Idle;
                true
            }
            InteractionState::Idle | InteractionState::Composing => false,
        }
    }

    /// Scroll by a wheel event.
    ///
    /// Shift or a mostly horizontal delta scrolls horizontally.
    pub fn wheel(&mut self, event: &WheelEvent) -> bool {
        if event.modifiers.shift || event.delta_x.abs() > event.delta_y.abs() {
            let delta = if event.modifiers.shift {
                event.delta_y
            } else {
                event.delta_x
            };
            self.scroll_by(-delta * WHEEL_STEP / WHEEL_NOTCH, 0.0);
        } else {
            self.scroll_by(0.0, -event.delta_y * WHEEL_STEP / WHEEL_NOTCH);
        }
        true
    }

    /// Document offset nearest to a surface position.
    pub fn offset_at(&mut self, pos: Point) -> usize {
        self.hit_test(pos).0
    }

    fn hit_test(&mut self, pos: Point) -> (usize, Affinity) {
        self.sync_layout();
        let view = self.view();
        self.layout.hit_test(&self.document, pos.x, pos.y, &view)
    }

    /// Surface position of the top of the caret.
    pub fn caret_position(&mut self) -> Point {
        self.sync_layout();
        let view = self.view();
        self.layout
            .caret_to_xy_at(&self.document, self.selection.head, self.affinity, &view)
    }
}
