//! Copy, cut and paste.
//!
//! Requests go out immediately and are applied by [`RichTextEdit::poll_clipboard`],
//! which also runs right after each request so a backend that answers
//! synchronously behaves synchronously. Results act on the editor state at
//! the time they are applied. Failures are logged and otherwise ignored.

use scribe_core::logging::targets;

use super::RichTextEdit;
use crate::error::ClipboardError;
use crate::platform::ClipboardRequest;

/// A clipboard request waiting for its result.
#[derive(Debug)]
pub(super) enum PendingClipboard {
    Copy(ClipboardRequest<()>),
    Cut(ClipboardRequest<()>),
    Paste(ClipboardRequest<String>),
}

enum ClipboardOutcome {
    Copy(Result<(), ClipboardError>),
    Cut(Result<(), ClipboardError>),
    Paste(Result<String, ClipboardError>),
}

impl PendingClipboard {
    fn try_take(&self) -> Option<ClipboardOutcome> {
        match self {
            Self::Copy(request) => request.try_take().map(ClipboardOutcome::Copy),
            Self::Cut(request) => request.try_take().map(ClipboardOutcome::Cut),
            Self::Paste(request) => request.try_take().map(ClipboardOutcome::Paste),
        }
    }
}

impl RichTextEdit {
    /// Copy the selected text to the clipboard.
    pub fn copy(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let request = self.clipboard.write_text(self.selected_text());
        self.pending_clipboard.push(PendingClipboard::Copy(request));
        self.poll_clipboard();
    }

    /// Copy the selected text, then delete the selection once the write
    /// succeeds.
    pub fn cut(&mut self) {
        if self.selection.is_empty() || self.config.read_only {
            return;
        }
        let request = self.clipboard.write_text(self.selected_text());
        self.pending_clipboard.push(PendingClipboard::Cut(request));
        self.poll_clipboard();
    }

    /// Read the clipboard and type its text at the caret once it arrives.
    pub fn paste(&mut self) {
        if self.config.read_only {
            return;
        }
        let request = self.clipboard.read_text();
        self.pending_clipboard.push(PendingClipboard::Paste(request));
        self.poll_clipboard();
    }

    /// Number of clipboard requests still waiting for a result.
    pub fn pending_clipboard_count(&self) -> usize {
        self.pending_clipboard.len()
    }

    /// Apply every clipboard result that has arrived, in request order.
    ///
    /// Returns how many requests completed, successfully or not.
    pub fn poll_clipboard(&mut self) -> usize {
        let mut completed = 0;
        let mut index = 0;
        while index < self.pending_clipboard.len() {
            let Some(outcome) = self.pending_clipboard[index].try_take() else {
                index += 1;
                continue;
            };
            self.pending_clipboard.remove(index);
            completed += 1;
            self.apply_clipboard(outcome);
        }
        completed
    }

    fn apply_clipboard(&mut self, outcome: ClipboardOutcome) {
        match outcome {
            ClipboardOutcome::Copy(Ok(())) => {}
            ClipboardOutcome::Cut(Ok(())) => self.delete_selection(),
            ClipboardOutcome::Paste(Ok(text)) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.type_text(&text);
            }
            ClipboardOutcome::Copy(Err(err)) => {
                tracing::debug!(target: targets::CLIPBOARD, error = %err, "copy failed");
            }
            ClipboardOutcome::Cut(Err(err)) => {
                tracing::debug!(target: targets::CLIPBOARD, error = %err, "cut failed");
            }
            ClipboardOutcome::Paste(Err(err)) => {
                tracing::debug!(target: targets::CLIPBOARD, error = %err, "paste failed");
            }
        }
    }
}
