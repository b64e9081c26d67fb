//! Platform integration.

pub mod clipboard;

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{ClipboardBackend, ClipboardRequest, ClipboardResolver, MemoryClipboard};
