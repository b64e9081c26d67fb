//! Error types for scribe.
//!
//! Editing operations never fail: out-of-range offsets are clamped and empty
//! mutations are ignored. Errors only exist where scribe talks to the outside
//! world, the clipboard and configuration loading.

use thiserror::Error;

/// Errors reported by a clipboard backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The platform clipboard could not be opened.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard holds no text.
    #[error("clipboard contains no text")]
    Empty,

    /// The backend rejected the operation.
    #[error("clipboard error: {0}")]
    Backend(String),

    /// The backend dropped the request before resolving it.
    #[error("clipboard request was dropped before it resolved")]
    Disconnected,
}

#[cfg(feature = "system-clipboard")]
impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        match err {
            arboard::Error::ContentNotAvailable => Self::Empty,
            arboard::Error::ClipboardNotSupported | arboard::Error::ClipboardOccupied => {
                Self::Unavailable(err.to_string())
            }
            other => Self::Backend(other.to_string()),
        }
    }
}

/// Errors that can occur while loading an editor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML source could not be parsed.
    #[error("failed to parse editor config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An auto-resize axis has `min` greater than `max`.
    #[error("invalid auto-resize bounds on {axis} axis: min {min} > max {max}")]
    InvalidBounds { axis: char, min: f32, max: f32 },

    /// A numeric option is negative or not finite.
    #[error("invalid value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: f32 },
}

/// Umbrella error for scribe's fallible boundaries.
#[derive(Error, Debug)]
pub enum ScribeError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for scribe operations.
pub type ScribeResult<T> = Result<T, ScribeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidBounds {
            axis: 'x',
            min: 200.0,
            max: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid auto-resize bounds on x axis: min 200 > max 100"
        );
        assert_eq!(
            ClipboardError::Empty.to_string(),
            "clipboard contains no text"
        );
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: ScribeError = ClipboardError::Disconnected.into();
        assert!(matches!(err, ScribeError::Clipboard(ClipboardError::Disconnected)));
    }
}
