//! The editor widget and its input, selection, history and painting pieces.
//!
//! [`RichTextEdit`] is the entry point. The remaining modules hold the small
//! value types it consumes and produces:
//!
//! - [`events`]: key, pointer and wheel events
//! - [`ime`]: composition events
//! - [`selection`]: the anchor/head pair
//! - [`undo`]: bounded snapshot history
//! - [`painting`]: the [`Surface`] seam and paint colors

pub mod events;
pub mod ime;
#[cfg(feature = "winit")]
pub mod keyboard;
pub mod painting;
mod rich_text_edit;
pub mod selection;
pub mod undo;

pub use events::{Key, KeyPressEvent, KeyboardModifiers, MouseButton, PointerEvent, WheelEvent};
#[cfg(feature = "winit")]
pub use ime::ImeInputHandler;
pub use ime::ImeEvent;
pub use painting::{DrawCommand, EditorPalette, RecordingSurface, Surface};
pub use rich_text_edit::{InteractionContext, InteractionState, RichTextEdit, ScrollbarGeometry};
pub use selection::Selection;
pub use undo::{Snapshot, UndoHistory};
