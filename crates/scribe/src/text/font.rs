//! Font description used for measurement and painting.
//!
//! A [`Font`] only describes the styling attributes to use; resolving it to
//! font data is the job of the [`TextMeasurer`](super::TextMeasurer) and the
//! host's rendering surface.

use super::styled_document::CharFormat;

/// A font family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    /// A specific font family by name.
    Name(String),
    /// Generic serif family.
    Serif,
    /// Generic sans-serif family.
    #[default]
    SansSerif,
    /// Generic monospace family.
    Monospace,
}

impl FontFamily {
    /// Create a named font family.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

/// Font specification for a run of text.
///
/// ```
/// use scribe::text::{CharFormat, Font, FontFamily};
///
/// let base = Font::new(FontFamily::Monospace, 13.0);
/// let bold = base.with_format(&CharFormat::bold());
/// assert!(bold.is_bold());
/// assert_eq!(bold.size(), 13.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: FontFamily,
    /// Font size in pixels.
    size: f32,
    bold: bool,
    italic: bool,
}

impl Font {
    /// Create a new regular font with the given family and size.
    pub fn new(family: FontFamily, size: f32) -> Self {
        Self {
            family,
            size,
            bold: false,
            italic: false,
        }
    }

    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    /// Font size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Create a copy of this font with a different size.
    pub fn with_size(&self, size: f32) -> Self {
        let mut font = self.clone();
        font.size = size;
        font
    }

    pub fn with_bold(&self, bold: bool) -> Self {
        let mut font = self.clone();
        font.bold = bold;
        font
    }

    pub fn with_italic(&self, italic: bool) -> Self {
        let mut font = self.clone();
        font.italic = italic;
        font
    }

    /// The variant of this font used to draw text carrying `format`.
    pub fn with_format(&self, format: &CharFormat) -> Self {
        let mut font = self.clone();
        font.bold |= format.bold;
        font.italic |= format.italic;
        font
    }

    /// Default line height for this font.
    pub fn line_height(&self) -> f32 {
        self.size * 1.2
    }

    /// Convert to cosmic-text attributes for shaping.
    #[cfg(feature = "cosmic-text")]
    pub fn to_attrs(&self) -> cosmic_text::Attrs<'_> {
        let family = match &self.family {
            FontFamily::Name(name) => cosmic_text::Family::Name(name.as_str()),
            FontFamily::Serif => cosmic_text::Family::Serif,
            FontFamily::SansSerif => cosmic_text::Family::SansSerif,
            FontFamily::Monospace => cosmic_text::Family::Monospace,
        };
        let weight = if self.bold {
            cosmic_text::Weight::BOLD
        } else {
            cosmic_text::Weight::NORMAL
        };
        let style = if self.italic {
            cosmic_text::Style::Italic
        } else {
            cosmic_text::Style::Normal
        };
        cosmic_text::Attrs::new()
            .family(family)
            .weight(weight)
            .style(style)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(FontFamily::SansSerif, 14.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_format_only_adds_styles() {
        let font = Font::default().with_italic(true);
        let styled = font.with_format(&CharFormat::bold());
        assert!(styled.is_bold());
        assert!(styled.is_italic());
        assert_eq!(styled.family(), &FontFamily::SansSerif);
    }

    #[test]
    fn test_line_height() {
        let font = Font::new(FontFamily::name("Inter"), 10.0);
        assert!((font.line_height() - 12.0).abs() < f32::EPSILON);
    }
}
