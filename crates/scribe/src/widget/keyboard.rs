//! Conversion from winit keyboard events.
//!
//! Hosts driving the editor from a winit event loop can translate
//! `WindowEvent::KeyboardInput` with [`key_press_from_winit`] and track
//! `WindowEvent::ModifiersChanged` with [`from_winit_modifiers`].
//!
//! ```ignore
//! let mut modifiers = KeyboardModifiers::NONE;
//! match event {
//!     WindowEvent::ModifiersChanged(m) => modifiers = from_winit_modifiers(&m),
//!     WindowEvent::KeyboardInput { event, .. } => {
//!         if let Some(press) = key_press_from_winit(&event, modifiers) {
//!             editor.handle_key(&press);
//!         }
//!     }
//!     _ => {}
//! }
//! ```

use winit::event::{ElementState, KeyEvent, Modifiers};
use winit::keyboard::{Key as WinitKey, NamedKey};

use super::events::{Key, KeyPressEvent, KeyboardModifiers};

/// Converts a winit logical key to an editor [`Key`].
pub fn from_winit_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => from_winit_named_key(named),
        WinitKey::Character(c) => from_character(c),
        WinitKey::Unidentified(_) | WinitKey::Dead(_) => Key::Unknown(0),
    }
}

fn from_winit_named_key(key: &NamedKey) -> Key {
    match key {
        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::PageDown => Key::PageDown,
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Enter => Key::Enter,
        NamedKey::Tab => Key::Tab,
        NamedKey::Space => Key::Space,
        NamedKey::Escape => Key::Escape,
        _ => Key::Unknown(0),
    }
}

fn from_character(c: &str) -> Key {
    let mut chars = c.chars();
    match (chars.next(), chars.next()) {
        (Some(' '), None) => Key::Space,
        (Some(ch), None) => {
            Key::from_letter(ch).unwrap_or(Key::Unknown(u16::try_from(u32::from(ch)).unwrap_or(0)))
        }
        _ => Key::Unknown(0),
    }
}

/// Converts winit modifiers to [`KeyboardModifiers`].
pub fn from_winit_modifiers(modifiers: &Modifiers) -> KeyboardModifiers {
    let state = modifiers.state();
    KeyboardModifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Build a [`KeyPressEvent`] from a winit key event.
///
/// Returns `None` for key releases.
pub fn key_press_from_winit(event: &KeyEvent, modifiers: KeyboardModifiers) -> Option<KeyPressEvent> {
    if event.state != ElementState::Pressed {
        return None;
    }
    let text = event.text.as_ref().map(|t| t.to_string()).unwrap_or_default();
    Some(KeyPressEvent {
        key: from_winit_key(&event.logical_key),
        modifiers,
        text,
        is_repeat: event.repeat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        assert_eq!(from_winit_key(&WinitKey::Named(NamedKey::ArrowLeft)), Key::ArrowLeft);
        assert_eq!(from_winit_key(&WinitKey::Named(NamedKey::Backspace)), Key::Backspace);
        assert_eq!(from_winit_key(&WinitKey::Named(NamedKey::F1)), Key::Unknown(0));
    }

    #[test]
    fn test_character_keys() {
        assert_eq!(from_winit_key(&WinitKey::Character("b".into())), Key::B);
        assert_eq!(from_winit_key(&WinitKey::Character("B".into())), Key::B);
        assert_eq!(from_winit_key(&WinitKey::Character(" ".into())), Key::Space);
        assert_eq!(from_winit_key(&WinitKey::Character("ab".into())), Key::Unknown(0));
    }
}
