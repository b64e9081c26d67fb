//! End-to-end tests driving the editor through its public API.

use std::sync::Arc;

use parking_lot::Mutex;
use scribe::prelude::*;
use scribe::{ClipboardError, ConfigError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("scribe=debug")
        .with_test_writer()
        .try_init();
}

/// Editor with 10px characters and 20px lines in a 300x150 box.
fn editor(config: EditorConfig, clipboard: &MemoryClipboard) -> RichTextEdit {
    RichTextEdit::with_config(config.with_line_height(20.0))
        .with_measurer(Box::new(MonospaceMeasurer::new(10.0)))
        .with_clipboard(Box::new(clipboard.clone()))
}

fn type_keys(editor: &mut RichTextEdit, text: &str) {
    for c in text.chars() {
        let event = match c {
            '\n' => KeyPressEvent::key(Key::Enter, KeyboardModifiers::NONE),
            _ => KeyPressEvent::text(c.to_string()),
        };
        assert!(editor.handle_key(&event));
    }
}

#[test]
fn test_undo_then_redo_restores_third_edit() {
    init_tracing();
    let clipboard = MemoryClipboard::new();
    let mut editor = editor(EditorConfig::default(), &clipboard);

    editor.push_history();
    editor.type_text("alpha");
    editor.push_history();
    editor.type_text(" beta");
    editor.push_history();
    editor.type_text(" gamma");

    editor.undo();
    assert_eq!(editor.text(), "alpha beta");
    assert_eq!(editor.caret(), 10);

    editor.redo();
    assert_eq!(editor.text(), "alpha beta gamma");
    assert_eq!(editor.caret(), 16);
    assert!(!editor.can_redo());
}

#[test]
fn test_vertical_move_into_shorter_line() {
    let clipboard = MemoryClipboard::new();
    let mut editor = editor(EditorConfig::default(), &clipboard);
    type_keys(&mut editor, "averylongline\nab");

    editor.set_caret(13);
    editor.move_caret_vertical(1, false);
    assert_eq!(editor.caret(), 16);

    editor.move_caret_vertical(-1, false);
    assert_eq!(editor.caret(), 13);
}

#[test]
fn test_bold_typing_session() {
    let clipboard = MemoryClipboard::new();
    let mut editor = editor(EditorConfig::default(), &clipboard);

    type_keys(&mut editor, "plain ");
    editor.handle_key(&KeyPressEvent::key(Key::B, KeyboardModifiers::CTRL));
    type_keys(&mut editor, "bold");
    editor.handle_key(&KeyPressEvent::key(Key::B, KeyboardModifiers::CTRL));
    type_keys(&mut editor, " plain");

    let runs = editor.document().runs();
    let texts: Vec<_> = runs.iter().map(|run| run.text.as_str()).collect();
    assert_eq!(texts, vec!["plain ", "bold", " plain"]);
    assert!(runs[1].format.bold);
}

#[test]
fn test_deferred_paste_lands_at_current_caret() {
    init_tracing();
    let clipboard = MemoryClipboard::with_text("!!");
    let mut editor = editor(EditorConfig::default(), &clipboard);
    editor.set_text("one two");
    editor.set_caret(3);

    clipboard.set_deferred(true);
    editor.paste();
    editor.move_document_boundary(true, false);
    assert_eq!(editor.pending_clipboard_count(), 1);

    clipboard.resolve_pending();
    assert_eq!(editor.poll_clipboard(), 1);
    assert_eq!(editor.text(), "one two!!");
}

#[test]
fn test_clipboard_failures_are_silent() {
    let clipboard = MemoryClipboard::with_text("never");
    let mut editor = editor(EditorConfig::default(), &clipboard);
    editor.set_text("content");
    editor.select_all();

    clipboard.set_failure(Some(ClipboardError::Backend("permission denied".into())));
    editor.copy();
    editor.cut();
    editor.paste();
    assert_eq!(editor.text(), "content");
    assert_eq!(clipboard.text().as_deref(), Some("never"));
    assert!(!editor.can_undo());
}

#[test]
fn test_cut_paste_moves_text() {
    let clipboard = MemoryClipboard::new();
    let mut editor = editor(EditorConfig::default(), &clipboard);
    editor.set_text("world hello ");
    editor.set_selection(0, 6);
    editor.handle_key(&KeyPressEvent::key(Key::X, KeyboardModifiers::CTRL));
    assert_eq!(editor.text(), "hello ");

    editor.handle_key(&KeyPressEvent::key(Key::End, KeyboardModifiers::CTRL));
    editor.handle_key(&KeyPressEvent::key(Key::V, KeyboardModifiers::CTRL));
    assert_eq!(editor.text(), "hello world ");
}

#[test]
fn test_ime_commit_is_one_undo_step() {
    let clipboard = MemoryClipboard::new();
    let mut editor = editor(EditorConfig::default(), &clipboard);
    type_keys(&mut editor, "a");

    for event in [
        ImeEvent::Start,
        ImeEvent::Update("k".into()),
        ImeEvent::Update("ka".into()),
    ] {
        editor.handle_ime(event);
        assert_eq!(editor.text(), "a");
    }
    editor.handle_ime(ImeEvent::End("か".into()));
    assert_eq!(editor.text(), "aか");

    editor.undo();
    assert_eq!(editor.text(), "a");
}

#[test]
fn test_signals_report_edits() {
    let clipboard = MemoryClipboard::new();
    let mut editor = editor(EditorConfig::default(), &clipboard);
    let log = Arc::new(Mutex::new(Vec::new()));

    let sink = log.clone();
    editor
        .text_changed
        .connect(move |text| sink.lock().push(format!("text:{text}")));
    let sink = log.clone();
    editor
        .selection_changed
        .connect(move |sel| sink.lock().push(format!("sel:{}..{}", sel.anchor, sel.head)));

    editor.type_text("hi");
    editor.move_caret_horizontal(-2, true);
    assert_eq!(
        *log.lock(),
        vec!["text:hi".to_string(), "sel:2..2".to_string(), "sel:2..0".to_string()]
    );
}

#[test]
fn test_auto_resize_follows_content() {
    let clipboard = MemoryClipboard::new();
    let config = EditorConfig::default()
        .with_scroll(false, false)
        .with_auto_resize_y(AutoResize::bounded(28.0, 88.0));
    let mut editor = editor(config, &clipboard);
    assert_eq!(editor.geometry().height(), 28.0);

    type_keys(&mut editor, "1\n2\n3\n4\n5");
    assert_eq!(editor.geometry().height(), 88.0);

    editor.set_text("");
    assert_eq!(editor.geometry().height(), 28.0);
}

#[test]
fn test_fixed_viewport_scrolls_to_caret() {
    let clipboard = MemoryClipboard::new();
    let mut editor = editor(EditorConfig::default(), &clipboard);
    for _ in 0..12 {
        type_keys(&mut editor, "line\n");
    }
    // 13 lines of 20px in a 142px viewport.
    assert_eq!(editor.scroll_offset().y, 118.0);

    editor.handle_key(&KeyPressEvent::key(Key::PageUp, KeyboardModifiers::NONE));
    editor.handle_key(&KeyPressEvent::key(Key::PageUp, KeyboardModifiers::NONE));
    assert_eq!(editor.caret(), 0);
    assert_eq!(editor.scroll_offset().y, 0.0);
}

#[test]
fn test_config_from_toml() {
    let config = EditorConfig::from_toml_str(
        r#"
        wrap = true
        word_wrap = "char"
        hyphenate = true
        hyphen_char = "~"
        scroll_x = true
        history_limit = 5
        padding = 2.0

        [auto_resize_x]
        enabled = true
        min = 50.0
        max = 500.0
        "#,
    )
    .expect("valid config");
    assert_eq!(config.word_wrap, WordWrap::Char);
    assert_eq!(config.hyphen_char, '~');
    assert_eq!(config.history_limit, 5);
    assert_eq!(config.auto_resize_x, AutoResize::bounded(50.0, 500.0));
    assert!(config.scroll_y);

    let clipboard = MemoryClipboard::new();
    let editor = editor(config, &clipboard);
    assert_eq!(editor.geometry().width(), 50.0);
}

#[test]
fn test_config_rejects_bad_values() {
    let err = EditorConfig::from_toml_str("[auto_resize_y]\nmin = 10.0\nmax = 5.0\n")
        .expect_err("min above max");
    assert!(matches!(err, ConfigError::InvalidBounds { axis: 'y', .. }));

    let err = EditorConfig::from_toml_str("padding = -1.0").expect_err("negative padding");
    assert!(matches!(err, ConfigError::InvalidValue { field: "padding", .. }));

    assert!(matches!(
        EditorConfig::from_toml_str("wrap = 3"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_paint_hyphenated_line() {
    let clipboard = MemoryClipboard::new();
    let config = EditorConfig::default().with_hyphenation('-');
    let mut editor = editor(config, &clipboard)
        .with_geometry(Rect::new(0.0, 0.0, 70.0, 100.0));
    // 70 - 8 padding - 12 scrollbar leaves 5 columns.
    editor.set_text("abcdefgh");

    let mut surface = RecordingSurface::new();
    editor.paint(&mut surface);
    assert_eq!(surface.texts(), vec!["abcd", "-", "efgh"]);
}
