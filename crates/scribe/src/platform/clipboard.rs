//! Clipboard access.
//!
//! Clipboard I/O is the one place where the editor waits on the outside
//! world. A [`ClipboardBackend`] answers every call with a
//! [`ClipboardRequest`], a one-shot channel that resolves now or later. The
//! editor keeps its pending requests and applies them when the host calls
//! [`RichTextEdit::poll_clipboard`].
//!
//! - [`SystemClipboard`] wraps `arboard` and resolves immediately.
//! - [`MemoryClipboard`] keeps text in process and can hold requests back
//!   until told to resolve them.
//!
//! [`RichTextEdit::poll_clipboard`]: crate::widget::RichTextEdit::poll_clipboard

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use parking_lot::Mutex;

use crate::error::ClipboardError;

/// A pending clipboard result.
#[derive(Debug)]
pub struct ClipboardRequest<T> {
    rx: Receiver<Result<T, ClipboardError>>,
}

/// The sending half of a [`ClipboardRequest`].
#[derive(Debug)]
pub struct ClipboardResolver<T> {
    tx: Sender<Result<T, ClipboardError>>,
}

impl<T> ClipboardRequest<T> {
    /// Create an unresolved request and its resolver.
    pub fn channel() -> (ClipboardResolver<T>, Self) {
        let (tx, rx) = crossbeam_channel::bounded(1);
        (ClipboardResolver { tx }, Self { rx })
    }

    /// A request that is already resolved.
    pub fn ready(result: Result<T, ClipboardError>) -> Self {
        let (resolver, request) = Self::channel();
        resolver.resolve(result);
        request
    }

    /// Take the result if it has arrived.
    ///
    /// A resolver dropped without answering yields
    /// [`ClipboardError::Disconnected`].
    pub fn try_take(&self) -> Option<Result<T, ClipboardError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ClipboardError::Disconnected)),
        }
    }
}

impl<T> ClipboardResolver<T> {
    /// Deliver the result. Ignored if the request was dropped.
    pub fn resolve(self, result: Result<T, ClipboardError>) {
        let _ = self.tx.send(result);
    }
}

/// A source and sink for clipboard text.
pub trait ClipboardBackend {
    fn write_text(&mut self, text: String) -> ClipboardRequest<()>;
    fn read_text(&mut self) -> ClipboardRequest<String>;
}

/// The operating system clipboard.
///
/// The platform handle is opened on first use; a failure to open it is
/// reported through the request like any other clipboard error.
#[cfg(feature = "system-clipboard")]
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard handle missing".into()))
    }
}

#[cfg(feature = "system-clipboard")]
impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

#[cfg(feature = "system-clipboard")]
impl ClipboardBackend for SystemClipboard {
    fn write_text(&mut self, text: String) -> ClipboardRequest<()> {
        let result = self
            .handle()
            .and_then(|clipboard| clipboard.set_text(text).map_err(Into::into));
        ClipboardRequest::ready(result)
    }

    fn read_text(&mut self) -> ClipboardRequest<String> {
        let result = self
            .handle()
            .and_then(|clipboard| clipboard.get_text().map_err(Into::into));
        ClipboardRequest::ready(result)
    }
}

enum PendingOp {
    Write(String, ClipboardResolver<()>),
    Read(ClipboardResolver<String>),
}

#[derive(Default)]
struct MemoryState {
    text: Option<String>,
    deferred: bool,
    failure: Option<ClipboardError>,
    pending: Vec<PendingOp>,
}

impl MemoryState {
    fn apply(&mut self, op: PendingOp) {
        match op {
            PendingOp::Write(text, resolver) => match self.failure.clone() {
                Some(err) => resolver.resolve(Err(err)),
                None => {
                    self.text = Some(text);
                    resolver.resolve(Ok(()));
                }
            },
            PendingOp::Read(resolver) => {
                let result = match (&self.failure, &self.text) {
                    (Some(err), _) => Err(err.clone()),
                    (None, Some(text)) => Ok(text.clone()),
                    (None, None) => Err(ClipboardError::Empty),
                };
                resolver.resolve(result);
            }
        }
    }
}

/// An in-process clipboard.
///
/// Clones share the same contents, so a test can keep one handle while the
/// editor owns another. In deferred mode requests stay unresolved until
/// [`resolve_pending`](Self::resolve_pending) runs.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that already holds `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        let clipboard = Self::new();
        clipboard.state.lock().text = Some(text.into());
        clipboard
    }

    /// Current contents.
    pub fn text(&self) -> Option<String> {
        self.state.lock().text.clone()
    }

    /// Hold requests until [`resolve_pending`](Self::resolve_pending).
    pub fn set_deferred(&self, deferred: bool) {
        self.state.lock().deferred = deferred;
    }

    /// Make every request fail with `failure` until cleared with `None`.
    pub fn set_failure(&self, failure: Option<ClipboardError>) {
        self.state.lock().failure = failure;
    }

    pub fn pending_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Resolve every held request in arrival order. Returns how many ran.
    pub fn resolve_pending(&self) -> usize {
        let mut state = self.state.lock();
        let pending = std::mem::take(&mut state.pending);
        let count = pending.len();
        for op in pending {
            state.apply(op);
        }
        count
    }

    fn submit(&self, op: PendingOp) {
        let mut state = self.state.lock();
        if state.deferred {
            state.pending.push(op);
        } else {
            state.apply(op);
        }
    }
}

impl std::fmt::Debug for MemoryClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MemoryClipboard")
            .field("text", &state.text)
            .field("deferred", &state.deferred)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn write_text(&mut self, text: String) -> ClipboardRequest<()> {
        let (resolver, request) = ClipboardRequest::channel();
        self.submit(PendingOp::Write(text, resolver));
        request
    }

    fn read_text(&mut self) -> ClipboardRequest<String> {
        let (resolver, request) = ClipboardRequest::channel();
        self.submit(PendingOp::Read(resolver));
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_request() {
        let request = ClipboardRequest::ready(Ok(5));
        assert_eq!(request.try_take(), Some(Ok(5)));
    }

    #[test]
    fn test_pending_then_resolved() {
        let (resolver, request) = ClipboardRequest::<String>::channel();
        assert_eq!(request.try_take(), None);
        resolver.resolve(Ok("x".into()));
        assert_eq!(request.try_take(), Some(Ok("x".into())));
    }

    #[test]
    fn test_dropped_resolver_disconnects() {
        let (resolver, request) = ClipboardRequest::<()>::channel();
        drop(resolver);
        assert_eq!(request.try_take(), Some(Err(ClipboardError::Disconnected)));
    }

    #[test]
    fn test_memory_clipboard_round_trip() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.read_text().try_take(), Some(Err(ClipboardError::Empty)));
        assert_eq!(clipboard.write_text("copied".into()).try_take(), Some(Ok(())));
        assert_eq!(clipboard.read_text().try_take(), Some(Ok("copied".into())));
    }

    #[test]
    fn test_memory_clipboard_deferred() {
        let mut clipboard = MemoryClipboard::with_text("later");
        let handle = clipboard.clone();
        handle.set_deferred(true);

        let read = clipboard.read_text();
        assert_eq!(read.try_take(), None);
        assert_eq!(handle.pending_count(), 1);

        assert_eq!(handle.resolve_pending(), 1);
        assert_eq!(read.try_take(), Some(Ok("later".into())));
    }

    #[test]
    fn test_memory_clipboard_failure() {
        let mut clipboard = MemoryClipboard::with_text("kept");
        clipboard.set_failure(Some(ClipboardError::Backend("denied".into())));
        assert!(matches!(
            clipboard.write_text("new".into()).try_take(),
            Some(Err(ClipboardError::Backend(_)))
        ));
        assert_eq!(clipboard.text(), Some("kept".into()));
    }
}
