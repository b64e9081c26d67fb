//! Text measurement.
//!
//! Line breaking and caret placement only need one question answered: how
//! wide is this string in this font? [`TextMeasurer`] is that seam. Hosts with
//! a real font stack plug in their shaper; [`MonospaceMeasurer`] serves
//! headless hosts and tests.

use super::font::Font;
use super::styled_document::byte_index;

/// Measures the advance width of text.
pub trait TextMeasurer {
    /// Width in pixels of `text` drawn with `font`.
    fn measure(&self, text: &str, font: &Font) -> f32;

    /// Split `text` into the longest prefix whose width is at most
    /// `max_width`, and the remainder.
    ///
    /// The prefix is empty when `max_width <= 0`.
    fn cut<'a>(&self, text: &'a str, max_width: f32, font: &Font) -> (&'a str, &'a str) {
        if max_width <= 0.0 {
            return ("", text);
        }
        let count = text.chars().count();
        let fit = max_fit(count, max_width, |n| {
            self.measure(&text[..byte_index(text, n)], font)
        });
        text.split_at(byte_index(text, fit))
    }
}

/// Largest `n` in `[0, count]` with `width_of(n) <= max_width`.
///
/// `width_of` must be non-decreasing in `n`, and `width_of(0)` is assumed to
/// fit.
pub(crate) fn max_fit(count: usize, max_width: f32, width_of: impl Fn(usize) -> f32) -> usize {
    let (mut lo, mut hi) = (0, count);
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if width_of(mid) <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// A measurer that gives every character the same advance.
///
/// Bold text can be made wider with [`with_bold_extra`](Self::with_bold_extra)
/// to exercise style-aware layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    advance: f32,
    bold_extra: f32,
}

impl MonospaceMeasurer {
    /// Create a measurer with a fixed per-character advance.
    pub fn new(advance: f32) -> Self {
        Self {
            advance,
            bold_extra: 0.0,
        }
    }

    /// Extra advance added to each character of a bold font.
    pub fn with_bold_extra(mut self, extra: f32) -> Self {
        self.bold_extra = extra;
        self
    }

    pub fn advance(&self) -> f32 {
        self.advance
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(8.0)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &Font) -> f32 {
        let advance = if font.is_bold() {
            self.advance + self.bold_extra
        } else {
            self.advance
        };
        text.chars().count() as f32 * advance
    }
}

#[cfg(feature = "cosmic-text")]
pub use self::cosmic::CosmicTextMeasurer;

#[cfg(feature = "cosmic-text")]
mod cosmic {
    use cosmic_text::{Buffer, FontSystem, Metrics, Shaping};
    use parking_lot::Mutex;

    use super::{Font, TextMeasurer};

    /// A measurer backed by cosmic-text shaping.
    pub struct CosmicTextMeasurer {
        font_system: Mutex<FontSystem>,
    }

    impl CosmicTextMeasurer {
        /// Create a measurer using the system font database.
        pub fn new() -> Self {
            Self::with_font_system(FontSystem::new())
        }

        /// Create a measurer with a preconfigured font system.
        pub fn with_font_system(font_system: FontSystem) -> Self {
            Self {
                font_system: Mutex::new(font_system),
            }
        }
    }

    impl Default for CosmicTextMeasurer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl std::fmt::Debug for CosmicTextMeasurer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("CosmicTextMeasurer").finish_non_exhaustive()
        }
    }

    impl TextMeasurer for CosmicTextMeasurer {
        fn measure(&self, text: &str, font: &Font) -> f32 {
            if text.is_empty() {
                return 0.0;
            }
            let mut font_system = self.font_system.lock();
            let metrics = Metrics::new(font.size(), font.line_height());
            let mut buffer = Buffer::new(&mut font_system, metrics);
            buffer.set_size(&mut font_system, None, None);
            buffer.set_text(&mut font_system, text, font.to_attrs(), Shaping::Advanced);
            buffer.shape_until_scroll(&mut font_system, false);
            buffer
                .layout_runs()
                .map(|run| run.line_w)
                .fold(0.0, f32::max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_measure() {
        let measurer = MonospaceMeasurer::new(10.0).with_bold_extra(2.0);
        let font = Font::default();
        assert_eq!(measurer.measure("abc", &font), 30.0);
        assert_eq!(measurer.measure("abc", &font.with_bold(true)), 36.0);
        assert_eq!(measurer.measure("", &font), 0.0);
    }

    #[test]
    fn test_cut_longest_prefix() {
        let measurer = MonospaceMeasurer::new(10.0);
        let font = Font::default();
        assert_eq!(measurer.cut("hello", 35.0, &font), ("hel", "lo"));
        assert_eq!(measurer.cut("hello", 50.0, &font), ("hello", ""));
        assert_eq!(measurer.cut("hello", 100.0, &font), ("hello", ""));
        assert_eq!(measurer.cut("hello", 9.0, &font), ("", "hello"));
    }

    #[test]
    fn test_cut_non_positive_width() {
        let measurer = MonospaceMeasurer::new(10.0);
        let font = Font::default();
        assert_eq!(measurer.cut("hello", 0.0, &font), ("", "hello"));
        assert_eq!(measurer.cut("hello", -5.0, &font), ("", "hello"));
    }

    #[test]
    fn test_cut_multibyte() {
        let measurer = MonospaceMeasurer::new(1.0);
        let font = Font::default();
        assert_eq!(measurer.cut("äöü", 2.0, &font), ("äö", "ü"));
    }

    #[test]
    fn test_max_fit_bounds() {
        assert_eq!(max_fit(0, 10.0, |_| 0.0), 0);
        assert_eq!(max_fit(10, 4.5, |n| n as f32), 4);
        assert_eq!(max_fit(10, 100.0, |n| n as f32), 10);
    }
}
