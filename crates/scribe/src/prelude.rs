//! Prelude module for scribe.
//!
//! ```ignore
//! use scribe::prelude::*;
//! ```
//!
//! This provides access to:
//! - The editor (`RichTextEdit`) and its configuration
//! - The text model (`StyledDocument`, `CharFormat`, `StyleFlag`)
//! - Measurement and rendering seams (`TextMeasurer`, `Surface`)
//! - Input event types
//! - Geometry types (`Point`, `Size`, `Rect`, `Color`)

// ============================================================================
// Editor
// ============================================================================

pub use crate::config::{AutoResize, EditorConfig, WordWrap};
pub use crate::widget::{InteractionState, RichTextEdit, Selection};

// ============================================================================
// Text Model and Layout
// ============================================================================

pub use crate::text::{
    Affinity, CharFormat, Font, FontFamily, LayoutEngine, MonospaceMeasurer, StyleEdit, StyleFlag,
    StyledDocument, TextMeasurer, TextRun,
};

// ============================================================================
// Host Seams
// ============================================================================

pub use crate::platform::{ClipboardBackend, MemoryClipboard};
pub use crate::widget::{EditorPalette, RecordingSurface, Surface};

// ============================================================================
// Input
// ============================================================================

pub use crate::widget::{
    ImeEvent, Key, KeyPressEvent, KeyboardModifiers, MouseButton, PointerEvent, WheelEvent,
};

// ============================================================================
// Signals and Geometry
// ============================================================================

pub use crate::types::{Color, Point, Rect, Size};
pub use scribe_core::Signal;
