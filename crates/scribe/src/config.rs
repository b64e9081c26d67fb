//! Editor configuration.
//!
//! [`EditorConfig`] gathers every option that changes how a
//! [`RichTextEdit`](crate::widget::RichTextEdit) lays out, scrolls and
//! records history. It can be built in code with the `with_*` methods or
//! loaded from TOML:
//!
//! ```
//! use scribe::config::{EditorConfig, WordWrap};
//!
//! let config = EditorConfig::from_toml_str(r#"
//!     word_wrap = "char"
//!     hyphenate = true
//!
//!     [auto_resize_y]
//!     enabled = true
//!     min = 40.0
//!     max = 400.0
//! "#).unwrap();
//!
//! assert_eq!(config.word_wrap, WordWrap::Char);
//! assert!(config.auto_resize_y.enabled);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where lines may be broken when wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordWrap {
    /// Break at whitespace; fall back to hyphenation or a character cut.
    #[default]
    Word,
    /// Break at any character.
    Char,
}

/// Auto-resize settings for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoResize {
    pub enabled: bool,
    pub min: f32,
    pub max: f32,
}

impl Default for AutoResize {
    fn default() -> Self {
        Self {
            enabled: false,
            min: 0.0,
            max: f32::INFINITY,
        }
    }
}

impl AutoResize {
    /// Enabled auto-resize between `min` and `max`.
    pub fn bounded(min: f32, max: f32) -> Self {
        Self {
            enabled: true,
            min,
            max,
        }
    }

    /// Clamp a dimension to the configured bounds.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }
}

/// Configuration for a rich-text editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Wrap lines at the viewport width.
    pub wrap: bool,
    /// Break policy used when wrapping.
    pub word_wrap: WordWrap,
    /// Insert a hyphen when a word has to be split.
    pub hyphenate: bool,
    /// The character appended to hyphenated lines.
    pub hyphen_char: char,
    /// Allow horizontal scrolling.
    pub scroll_x: bool,
    /// Allow vertical scrolling.
    pub scroll_y: bool,
    /// Grow/shrink the viewport width with the content.
    pub auto_resize_x: AutoResize,
    /// Grow/shrink the viewport height with the content.
    pub auto_resize_y: AutoResize,
    /// Measure each style run with its own font variant while breaking lines.
    pub style_aware_layout: bool,
    /// Maximum number of undo steps kept. Zero disables undo.
    pub history_limit: usize,
    /// Fixed line height in pixels. `None` derives it from the font size.
    pub line_height: Option<f32>,
    /// Interior padding around the text, in pixels.
    pub padding: f32,
    /// Width of the scrollbar track, in pixels.
    pub scrollbar_thickness: f32,
    /// Number of spaces inserted by the Tab key.
    pub tab_width: usize,
    /// Reject all content mutations from input.
    pub read_only: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            wrap: true,
            word_wrap: WordWrap::Word,
            hyphenate: false,
            hyphen_char: '-',
            scroll_x: false,
            scroll_y: true,
            auto_resize_x: AutoResize::default(),
            auto_resize_y: AutoResize::default(),
            style_aware_layout: false,
            history_limit: 100,
            line_height: None,
            padding: 4.0,
            scrollbar_thickness: 12.0,
            tab_width: 4,
            read_only: false,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric options and auto-resize bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, resize) in [('x', &self.auto_resize_x), ('y', &self.auto_resize_y)] {
            if resize.min > resize.max {
                return Err(ConfigError::InvalidBounds {
                    axis,
                    min: resize.min,
                    max: resize.max,
                });
            }
        }
        for (field, value) in [
            ("padding", self.padding),
            ("scrollbar_thickness", self.scrollbar_thickness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        if let Some(value) = self.line_height
            && (!value.is_finite() || value <= 0.0)
        {
            return Err(ConfigError::InvalidValue {
                field: "line_height",
                value,
            });
        }
        Ok(())
    }

    /// Set whether lines wrap.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the wrap policy.
    pub fn with_word_wrap(mut self, word_wrap: WordWrap) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    /// Enable hyphenation with the given hyphen character.
    pub fn with_hyphenation(mut self, hyphen_char: char) -> Self {
        self.hyphenate = true;
        self.hyphen_char = hyphen_char;
        self
    }

    /// Set which axes may scroll.
    pub fn with_scroll(mut self, x: bool, y: bool) -> Self {
        self.scroll_x = x;
        self.scroll_y = y;
        self
    }

    pub fn with_auto_resize_x(mut self, resize: AutoResize) -> Self {
        self.auto_resize_x = resize;
        self
    }

    pub fn with_auto_resize_y(mut self, resize: AutoResize) -> Self {
        self.auto_resize_y = resize;
        self
    }

    /// Measure style runs with their own font variants.
    pub fn with_style_aware_layout(mut self, enabled: bool) -> Self {
        self.style_aware_layout = enabled;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!(config.wrap);
        assert_eq!(config.word_wrap, WordWrap::Word);
        assert!(!config.auto_resize_x.enabled);
        assert!(!config.auto_resize_y.enabled);
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.hyphen_char, '-');
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let config = EditorConfig::from_toml_str(
            r#"
            wrap = false
            history_limit = 5
            line_height = 20.0
            hyphen_char = "~"

            [auto_resize_x]
            enabled = true
            max = 300.0
            "#,
        )
        .unwrap();
        assert!(!config.wrap);
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.line_height, Some(20.0));
        assert_eq!(config.hyphen_char, '~');
        assert!(config.auto_resize_x.enabled);
        assert_eq!(config.auto_resize_x.min, 0.0);
        assert_eq!(config.auto_resize_x.max, 300.0);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let err = EditorConfig::from_toml_str(
            r#"
            [auto_resize_y]
            min = 50.0
            max = 10.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { axis: 'y', .. }));
    }

    #[test]
    fn test_negative_padding_rejected() {
        let err = EditorConfig::from_toml_str("padding = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "padding", .. }));
    }

    #[test]
    fn test_non_positive_line_height_rejected() {
        for source in ["line_height = 0.0", "line_height = -4.0"] {
            let err = EditorConfig::from_toml_str(source).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { field: "line_height", .. }));
        }
        assert!(EditorConfig::from_toml_str("history_limit = 0").is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        let err = EditorConfig::from_toml_str("wrap = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_auto_resize_clamp() {
        let resize = AutoResize::bounded(10.0, 20.0);
        assert_eq!(resize.clamp(5.0), 10.0);
        assert_eq!(resize.clamp(15.0), 15.0);
        assert_eq!(resize.clamp(25.0), 20.0);
    }
}
