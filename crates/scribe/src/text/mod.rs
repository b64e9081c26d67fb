//! Text model and layout.
//!
//! - [`StyledDocument`]: the styled run buffer
//! - [`LayoutEngine`]: line breaking, caching and offset/pixel mapping
//! - [`TextMeasurer`]: the measurement seam, with [`MonospaceMeasurer`]
//! - [`grapheme`]: grapheme and word boundaries for caret movement

mod font;
pub mod grapheme;
mod layout;
mod measure;
mod styled_document;

pub use font::{Font, FontFamily};
pub use layout::{Affinity, LayoutEngine, LayoutOptions, LineTable, ViewGeometry, VisualLine};
#[cfg(feature = "cosmic-text")]
pub use measure::CosmicTextMeasurer;
pub use measure::{MonospaceMeasurer, TextMeasurer};
pub use styled_document::{CharFormat, StyleEdit, StyleFlag, StyledDocument, TextRun};
