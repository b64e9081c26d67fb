//! Scribe - a rich text editing engine.
//!
//! Scribe keeps styled text as a list of format runs, breaks it into visual
//! lines against a width, and drives caret, selection, clipboard, undo and
//! scrolling on top of that. Rendering and text measurement are supplied by
//! the host through the [`Surface`](widget::Surface) and
//! [`TextMeasurer`](text::TextMeasurer) traits.
//!
//! # Example
//!
//! ```
//! use scribe::prelude::*;
//!
//! let mut editor = RichTextEdit::new()
//!     .with_clipboard(Box::new(MemoryClipboard::new()))
//!     .with_measurer(Box::new(MonospaceMeasurer::new(8.0)));
//!
//! editor.type_text("Hello, world");
//! editor.set_selection(0, 5);
//! editor.toggle_style(StyleFlag::Bold);
//!
//! let mut surface = RecordingSurface::new();
//! editor.paint(&mut surface);
//! assert_eq!(surface.texts(), vec!["Hello", ", world"]);
//! ```
//!
//! # Features
//!
//! - `system-clipboard` (default): [`SystemClipboard`](platform::SystemClipboard) via `arboard`
//! - `winit`: key and IME conversion from winit events
//! - `cosmic-text`: [`CosmicTextMeasurer`](text::CosmicTextMeasurer) for real font metrics

pub mod config;
pub mod error;
pub mod platform;
pub mod prelude;
pub mod text;
pub mod types;
pub mod widget;

pub use config::EditorConfig;
pub use error::{ClipboardError, ConfigError, ScribeError, ScribeResult};
pub use widget::RichTextEdit;

pub use scribe_core::{ConnectionGuard, ConnectionId, PerfSpan, Signal};
