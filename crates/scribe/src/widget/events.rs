//! Input event types consumed by the editor.
//!
//! These are deliberately small: the host's dispatch loop decodes platform
//! input and hands the editor one of these per event. Positions are in
//! surface coordinates, the same space the editor's viewport is placed in.

use crate::types::Point;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Modifiers that turn a key press into a command rather than text.
    pub fn is_command(&self) -> bool {
        self.control || self.meta
    }
}

/// Logical key identifiers the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Enter, Tab, Space, Escape,

    /// Any other key. Printable keys still carry their text in
    /// [`KeyPressEvent::text`].
    Unknown(u16),
}

impl Key {
    /// The letter key for an ASCII letter, either case.
    pub fn from_letter(c: char) -> Option<Self> {
        const LETTERS: [Key; 26] = [
            Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
            Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
            Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        ];
        c.is_ascii_alphabetic()
            .then(|| LETTERS[(c.to_ascii_lowercase() as u8 - b'a') as usize])
    }
}

/// Key press event.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPressEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press, empty for non-printable keys.
    pub text: String,
    /// Whether this is a key repeat event.
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers, text: impl Into<String>) -> Self {
        Self {
            key,
            modifiers,
            text: text.into(),
            is_repeat: false,
        }
    }

    /// A key press with no text, e.g. an arrow key.
    pub fn key(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::new(key, modifiers, "")
    }

    /// An unmodified key press typing `text`.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let key = match text.chars().next() {
            Some(' ') => Key::Space,
            Some(c) => Key::from_letter(c).unwrap_or(Key::Unknown(0)),
            None => Key::Unknown(0),
        };
        Self::new(key, KeyboardModifiers::NONE, text)
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

/// Pointer press, move or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Position in surface coordinates.
    pub pos: Point,
    pub button: MouseButton,
    pub modifiers: KeyboardModifiers,
}

impl PointerEvent {
    pub fn new(pos: Point, button: MouseButton, modifiers: KeyboardModifiers) -> Self {
        Self {
            pos,
            button,
            modifiers,
        }
    }

    /// A left-button event without modifiers.
    pub fn left(x: f32, y: f32) -> Self {
        Self::new(Point::new(x, y), MouseButton::Left, KeyboardModifiers::NONE)
    }
}

/// Mouse wheel event.
///
/// Deltas are in wheel units where 120 is one notch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Horizontal scroll delta (positive = right).
    pub delta_x: f32,
    /// Vertical scroll delta (positive = up/away from user).
    pub delta_y: f32,
    pub modifiers: KeyboardModifiers,
}

impl WheelEvent {
    pub fn new(delta_x: f32, delta_y: f32, modifiers: KeyboardModifiers) -> Self {
        Self {
            delta_x,
            delta_y,
            modifiers,
        }
    }
}
