//! Input Method Editor (IME) composition events.
//!
//! The editor only ever inserts committed composition text. Intermediate
//! preedit text is staged on the editor but never reaches the document.
//!
//! With the `winit` feature, [`ImeInputHandler`] turns winit's `Ime` events
//! into the start/update/end sequence [`RichTextEdit::handle_ime`] expects.
//!
//! [`RichTextEdit::handle_ime`]: super::RichTextEdit::handle_ime

/// A composition event from the host's input method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImeEvent {
    /// A composition session opened.
    Start,
    /// The staged composition text changed.
    Update(String),
    /// The composition finished with this text, which is committed.
    End(String),
    /// The composition was abandoned; nothing is committed.
    Cancel,
}

#[cfg(feature = "winit")]
pub use self::winit_input::ImeInputHandler;

#[cfg(feature = "winit")]
mod winit_input {
    use winit::event::Ime;

    use super::ImeEvent;

    /// Tracks winit IME state and emits [`ImeEvent`]s.
    #[derive(Debug, Clone, Default)]
    pub struct ImeInputHandler {
        enabled: bool,
        composing: bool,
    }

    impl ImeInputHandler {
        pub fn new() -> Self {
            Self::default()
        }

        /// Whether the platform IME is enabled.
        pub fn is_enabled(&self) -> bool {
            self.enabled
        }

        /// Whether a composition is open.
        pub fn is_composing(&self) -> bool {
            self.composing
        }

        /// Process a winit IME event.
        ///
        /// A commit without a preceding preedit (e.g. a dead-key sequence) is
        /// reported as a complete start/end pair.
        pub fn process_ime_event(&mut self, ime: &Ime) -> Vec<ImeEvent> {
            match ime {
                Ime::Enabled => {
                    self.enabled = true;
                    Vec::new()
                }
                Ime::Preedit(text, _cursor) if text.is_empty() => {
                    if self.composing {
                        self.composing = false;
                        vec![ImeEvent::Cancel]
                    } else {
                        Vec::new()
                    }
                }
                Ime::Preedit(text, _cursor) => {
                    let mut events = Vec::with_capacity(2);
                    if !self.composing {
                        self.composing = true;
                        events.push(ImeEvent::Start);
                    }
                    events.push(ImeEvent::Update(text.clone()));
                    events
                }
                Ime::Commit(text) => {
                    let mut events = Vec::with_capacity(2);
                    if !self.composing {
                        events.push(ImeEvent::Start);
                    }
                    self.composing = false;
                    events.push(ImeEvent::End(text.clone()));
                    events
                }
                Ime::Disabled => {
                    self.enabled = false;
                    if std::mem::take(&mut self.composing) {
                        vec![ImeEvent::Cancel]
                    } else {
                        Vec::new()
                    }
                }
            }
        }
    }

}
