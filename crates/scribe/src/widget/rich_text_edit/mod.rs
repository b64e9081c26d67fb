//! Rich text editing controller.
//!
//! [`RichTextEdit`] ties a [`StyledDocument`], a [`Selection`], a
//! [`LayoutEngine`] and an [`UndoHistory`] together and exposes the editing
//! operations a host wires to its input:
//! - Typing with a "current typing format" for collapsed carets
//! - Caret movement by grapheme, word, line, page and document
//! - Style toggling over selections
//! - Copy, cut and paste through a [`ClipboardBackend`]
//! - Undo/redo over document and selection snapshots
//! - Scrolling, scrollbars and optional auto-resize
//! - Committing IME compositions
//!
//! # Example
//!
//! ```
//! use scribe::text::StyleFlag;
//! use scribe::widget::RichTextEdit;
//!
//! let mut editor = RichTextEdit::new();
//! editor.text_changed.connect(|text| {
//!     println!("Text changed: {} chars", text.chars().count());
//! });
//!
//! editor.type_text("Hello");
//! editor.select_all();
//! editor.toggle_style(StyleFlag::Bold);
//! assert!(editor.document().format_at(0).bold);
//!
//! editor.undo();
//! assert!(!editor.document().format_at(0).bold);
//! ```

mod clipboard;
mod input;
mod navigation;
mod paint;
mod scroll;

use scribe_core::Signal;
use scribe_core::logging::targets;

pub use scroll::ScrollbarGeometry;

use crate::config::EditorConfig;
use crate::platform::ClipboardBackend;
use crate::text::{
    Affinity, CharFormat, Font, LayoutEngine, LayoutOptions, LineTable, MonospaceMeasurer, StyleEdit,
    StyleFlag, StyledDocument, TextMeasurer,
};
use crate::types::{Color, Point, Rect, Size};

use self::clipboard::PendingClipboard;
use super::ime::ImeEvent;
use super::painting::EditorPalette;
use super::selection::Selection;
use super::undo::{Snapshot, UndoHistory};

/// What the pointer or input method is currently doing to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A pointer drag is extending the selection.
    Selecting,
    /// An IME composition is open.
    Composing,
    DraggingScrollbarY,
    DraggingScrollbarX,
}

/// Interaction state owned by one editor.
#[derive(Debug, Clone, Default)]
pub struct InteractionContext {
    pub state: InteractionState,
    /// Staged IME composition text. Never part of the document.
    pub composition: String,
    /// Distance from the scrollbar thumb's leading edge to the pointer.
    pub scrollbar_grab: f32,
}

/// State compared before and after an operation to decide which signals fire.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Observed {
    version: u64,
    selection: Selection,
    format: CharFormat,
}

/// A multi-line rich text editor.
pub struct RichTextEdit {
    document: StyledDocument,
    selection: Selection,
    layout: LayoutEngine,
    history: UndoHistory,
    config: EditorConfig,
    palette: EditorPalette,
    /// Format applied to text typed at a collapsed caret.
    typing_format: CharFormat,
    /// Cached caret x used to keep a column across vertical moves.
    preferred_x: Option<f32>,
    /// Which line the head sits on when it is exactly at a soft wrap.
    affinity: Affinity,
    /// Outer rectangle of the editor on the surface.
    rect: Rect,
    scroll: Point,
    interaction: InteractionContext,
    caret_visible: bool,
    clipboard: Box<dyn ClipboardBackend>,
    pending_clipboard: Vec<PendingClipboard>,

    /// Emitted with the full text after the document changes.
    pub text_changed: Signal<String>,
    /// Emitted with the caret offset when it moves.
    pub cursor_position_changed: Signal<usize>,
    /// Emitted when anchor or head change.
    pub selection_changed: Signal<Selection>,
    /// Emitted when the format at the caret or selection changes.
    pub format_changed: Signal<CharFormat>,
    /// Emitted with the new size after auto-resize changed it.
    pub resized: Signal<Size>,
}

impl std::fmt::Debug for RichTextEdit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichTextEdit")
            .field("len", &self.document.len())
            .field("selection", &self.selection)
            .field("rect", &self.rect)
            .field("scroll", &self.scroll)
            .field("state", &self.interaction.state)
            .finish_non_exhaustive()
    }
}

impl Default for RichTextEdit {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextEdit {
    /// Create an empty editor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an empty editor with `config`.
    pub fn with_config(config: EditorConfig) -> Self {
        let font = Font::default();
        let options = LayoutOptions::from_config(&config, &font);
        let mut editor = Self {
            document: StyledDocument::new(),
            selection: Selection::default(),
            layout: LayoutEngine::new(Box::new(MonospaceMeasurer::default()), font, options),
            history: UndoHistory::new(config.history_limit),
            config,
            palette: EditorPalette::default(),
            typing_format: CharFormat::default(),
            preferred_x: None,
            affinity: Affinity::Upstream,
            rect: Rect::new(0.0, 0.0, 300.0, 150.0),
            scroll: Point::ZERO,
            interaction: InteractionContext::default(),
            caret_visible: true,
            clipboard: default_clipboard(),
            pending_clipboard: Vec::new(),
            text_changed: Signal::new(),
            cursor_position_changed: Signal::new(),
            selection_changed: Signal::new(),
            format_changed: Signal::new(),
            resized: Signal::new(),
        };
        editor.update_auto_size();
        editor
    }

    /// Builder method to set the text measurer.
    pub fn with_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.set_measurer(measurer);
        self
    }

    /// Builder method to set the base font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.set_font(font);
        self
    }

    /// Builder method to set the clipboard backend.
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardBackend>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Builder method to place the editor on the surface.
    pub fn with_geometry(mut self, rect: Rect) -> Self {
        self.set_geometry(rect);
        self
    }

    /// Builder method to set the initial text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn document(&self) -> &StyledDocument {
        &self.document
    }

    /// The flattened document text.
    pub fn text(&self) -> String {
        self.document.text()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The caret offset (the selection head).
    pub fn caret(&self) -> usize {
        self.selection.head
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn selected_text(&self) -> String {
        self.document
            .slice(self.selection.start(), self.selection.end())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn palette(&self) -> &EditorPalette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: EditorPalette) {
        self.palette = palette;
    }

    pub fn layout_engine(&self) -> &LayoutEngine {
        &self.layout
    }

    /// The current line table, recomputed if the document or width changed.
    pub fn lines(&mut self) -> &LineTable {
        let width = self.wrap_width();
        self.layout.ensure(&self.document, width)
    }

    pub fn typing_format(&self) -> CharFormat {
        self.typing_format
    }

    pub fn preferred_x(&self) -> Option<f32> {
        self.preferred_x
    }

    /// The caret's affinity at a soft wrap.
    pub fn affinity(&self) -> Affinity {
        self.affinity
    }

    pub fn interaction(&self) -> &InteractionContext {
        &self.interaction
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state
    }

    /// Staged IME text, empty outside a composition.
    pub fn composition_text(&self) -> &str {
        &self.interaction.composition
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.config.read_only = read_only;
    }

    /// Show or hide the caret, e.g. for focus changes or blinking.
    pub fn set_caret_visible(&mut self, visible: bool) {
        self.caret_visible = visible;
    }

    /// The format reported for the caret or selection.
    ///
    /// A collapsed caret reports the typing format. A selection reports its
    /// uniform format, or the format of its first character when mixed.
    pub fn current_format(&self) -> CharFormat {
        if self.selection.is_empty() {
            self.typing_format
        } else {
            let (start, end) = (self.selection.start(), self.selection.end());
            self.document
                .format_for_range(start, end)
                .unwrap_or_else(|| self.document.format_at(start))
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Apply a new configuration.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.history.set_limit(config.history_limit);
        self.layout
            .set_options(LayoutOptions::from_config(&config, self.layout.font()));
        self.config = config;
        self.after_layout_change();
    }

    /// Replace the base font.
    pub fn set_font(&mut self, font: Font) {
        let options = LayoutOptions::from_config(&self.config, &font);
        self.layout.set_font(font);
        self.layout.set_options(options);
        self.after_layout_change();
    }

    /// Replace the text measurer.
    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.layout.set_measurer(measurer);
        self.after_layout_change();
    }

    fn after_layout_change(&mut self) {
        self.update_auto_size();
        self.refresh_preferred_x();
        self.clamp_scroll();
    }

    // =========================================================================
    // Signals
    // =========================================================================

    fn observe(&self) -> Observed {
        Observed {
            version: self.document.version(),
            selection: self.selection,
            format: self.current_format(),
        }
    }

    fn notify(&self, before: Observed) {
        let after = self.observe();
        if after.version != before.version {
            self.text_changed.emit(self.document.text());
        }
        if after.selection.head != before.selection.head {
            self.cursor_position_changed.emit(after.selection.head);
        }
        if after.selection != before.selection {
            self.selection_changed.emit(after.selection);
        }
        if after.format != before.format {
            self.format_changed.emit(after.format);
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Replace the whole content with unformatted `text`.
    ///
    /// Clears the undo history and puts the caret at the start.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let before = self.observe();
        self.document.set_text(text);
        self.history.clear();
        self.selection.collapse_to(0);
        self.typing_format = CharFormat::default();
        self.scroll = Point::ZERO;
        self.after_edit();
        self.notify(before);
    }

    /// Insert `text` at the caret, replacing any selection.
    ///
    /// The inserted text takes the typing format and the caret ends up right
    /// after it. The whole replacement is one undo step.
    pub fn type_text(&mut self, text: &str) {
        if self.config.read_only || (text.is_empty() && self.selection.is_empty()) {
            return;
        }
        let before = self.observe();
        self.push_history();
        self.replace_selection(text);
        self.after_edit();
        tracing::trace!(target: targets::EDITOR, caret = self.selection.head, "typed text");
        self.notify(before);
    }

    pub fn insert_newline(&mut self) {
        self.type_text("\n");
    }

    /// Insert `tab_width` spaces.
    pub fn insert_tab(&mut self) {
        let spaces = " ".repeat(self.config.tab_width);
        self.type_text(&spaces);
    }

    /// Delete the selection, or the grapheme (or word) before the caret.
    pub fn delete_backward(&mut self, by_word: bool) {
        let head = self.selection.head;
        let target = if by_word {
            crate::text::grapheme::prev_word(&self.document.text(), head)
        } else {
            crate::text::grapheme::prev_grapheme(&self.document.text(), head)
        };
        self.delete_to(target);
    }

    /// Delete the selection, or the grapheme (or word) after the caret.
    pub fn delete_forward(&mut self, by_word: bool) {
        let head = self.selection.head;
        let target = if by_word {
            crate::text::grapheme::next_word(&self.document.text(), head)
        } else {
            crate::text::grapheme::next_grapheme(&self.document.text(), head)
        };
        self.delete_to(target);
    }

    fn delete_to(&mut self, target: usize) {
        if self.config.read_only {
            return;
        }
        let (start, end) = if self.selection.is_empty() {
            let head = self.selection.head;
            (head.min(target), head.max(target))
        } else {
            (self.selection.start(), self.selection.end())
        };
        if start == end {
            return;
        }
        let before = self.observe();
        self.push_history();
        self.document.delete_range(start, end);
        self.selection.collapse_to(start);
        self.typing_format = self.format_before(start);
        self.after_edit();
        self.notify(before);
    }

    /// Delete the selected text, if any.
    pub fn delete_selection(&mut self) {
        if !self.selection.is_empty() {
            self.delete_to(self.selection.head);
        }
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        let before = self.observe();
        self.selection.set_range(0, self.document.len());
        self.affinity = Affinity::Upstream;
        self.ensure_caret_visible();
        self.notify(before);
    }

    /// Set the selection, clamped to the document.
    pub fn set_selection(&mut self, anchor: usize, head: usize) {
        let before = self.observe();
        self.selection.set_range(anchor, head);
        self.selection.clamp(self.document.len());
        self.affinity = Affinity::Upstream;
        self.typing_format = self.format_before(self.selection.head);
        self.refresh_preferred_x();
        self.ensure_caret_visible();
        self.notify(before);
    }

    /// Collapse the selection to a caret at `pos`.
    pub fn set_caret(&mut self, pos: usize) {
        self.set_selection(pos, pos);
    }

    fn replace_selection(&mut self, text: &str) {
        let start = self.selection.start();
        if !self.selection.is_empty() {
            self.document.delete_range(start, self.selection.end());
        }
        self.document.insert_at(start, text, self.typing_format);
        self.selection
            .collapse_to(start + text.chars().count());
    }

    /// Bookkeeping after a document change: auto-size, column cache, scroll.
    fn after_edit(&mut self) {
        self.selection.clamp(self.document.len());
        self.affinity = Affinity::Upstream;
        self.update_auto_size();
        self.refresh_preferred_x();
        self.ensure_caret_visible();
    }

    /// The format text typed at `offset` continues with.
    fn format_before(&self, offset: usize) -> CharFormat {
        self.document.format_at(offset.saturating_sub(1))
    }

    fn refresh_preferred_x(&mut self) {
        self.sync_layout();
        self.preferred_x = Some(self.layout.x_for_index_at(
            &self.document,
            self.selection.head,
            self.affinity,
        ));
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Record the current document and selection as an undo step.
    pub fn push_history(&mut self) {
        self.history
            .push(Snapshot::capture(&self.document, &self.selection));
    }

    /// Restore the state before the last recorded edit.
    pub fn undo(&mut self) -> bool {
        if self.config.read_only {
            return false;
        }
        let current = Snapshot::capture(&self.document, &self.selection);
        match self.history.undo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone edit.
    pub fn redo(&mut self) -> bool {
        if self.config.read_only {
            return false;
        }
        let current = Snapshot::capture(&self.document, &self.selection);
        match self.history.redo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        let before = self.observe();
        let selection = snapshot.selection();
        self.document.restore_runs(snapshot.runs);
        self.selection = selection;
        self.typing_format = self.format_before(self.selection.head);
        self.after_edit();
        tracing::debug!(target: targets::EDITOR, caret = self.selection.head, "restored snapshot");
        self.notify(before);
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Toggle a style flag.
    ///
    /// With a selection, each selected run flips the flag as one undo step.
    /// With a collapsed caret, the typing format flips instead and the
    /// document is left untouched.
    pub fn toggle_style(&mut self, flag: StyleFlag) {
        let mut format = self.typing_format;
        format.apply(StyleEdit::Toggle(flag));
        self.edit_style(StyleEdit::Toggle(flag), format);
    }

    /// Set a style flag on the selection or the typing format.
    pub fn set_style(&mut self, flag: StyleFlag, value: bool) {
        let mut format = self.typing_format;
        format.set_flag(flag, value);
        self.edit_style(StyleEdit::Set(flag, value), format);
    }

    /// Set the text color on the selection or the typing format.
    pub fn set_color(&mut self, color: Option<Color>) {
        let format = self.typing_format.with_color(color);
        self.edit_style(StyleEdit::Color(color), format);
    }

    fn edit_style(&mut self, edit: StyleEdit, typing: CharFormat) {
        let before = self.observe();
        if self.selection.is_empty() {
            self.typing_format = typing;
        } else {
            if self.config.read_only {
                return;
            }
            self.push_history();
            self.document
                .apply_style(self.selection.start(), self.selection.end(), edit);
            self.after_edit();
        }
        self.notify(before);
    }

    // =========================================================================
    // IME Composition
    // =========================================================================

    /// Open a composition session with an empty staging buffer.
    pub fn composition_start(&mut self) {
        self.interaction.state = InteractionState::Composing;
        self.interaction.composition.clear();
        tracing::trace!(target: targets::IME, "composition start");
    }

    /// Replace the staged composition text. The document is not touched.
    pub fn composition_update(&mut self, text: &str) {
        if self.interaction.state != InteractionState::Composing {
            self.composition_start();
        }
        self.interaction.composition.clear();
        self.interaction.composition.push_str(text);
    }

    /// Close the composition and commit `text` through [`type_text`](Self::type_text).
    pub fn composition_end(&mut self, text: &str) {
        self.composition_cancel();
        tracing::trace!(target: targets::IME, len = text.len(), "composition commit");
        self.type_text(text);
    }

    /// Close the composition without committing anything.
    pub fn composition_cancel(&mut self) {
        if self.interaction.state == InteractionState::Composing {
            self.interaction.state = InteractionState::Idle;
        }
        self.interaction.composition.clear();
    }

    /// Dispatch an [`ImeEvent`].
    pub fn handle_ime(&mut self, event: ImeEvent) {
        match event {
            ImeEvent::Start => self.composition_start(),
            ImeEvent::Update(text) => self.composition_update(&text),
            ImeEvent::End(text) => self.composition_end(&text),
            ImeEvent::Cancel => self.composition_cancel(),
        }
    }
}

#[cfg(feature = "system-clipboard")]
fn default_clipboard() -> Box<dyn ClipboardBackend> {
    Box::new(crate::platform::SystemClipboard::new())
}

#[cfg(not(feature = "system-clipboard"))]
fn default_clipboard() -> Box<dyn ClipboardBackend> {
    Box::new(crate::platform::MemoryClipboard::new())
}
