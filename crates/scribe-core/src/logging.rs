//! Logging facilities for scribe.
//!
//! This module provides:
//! - Target names for filtering scribe's `tracing` output by subsystem
//! - Span names for the instrumented hot paths
//! - [`PerfSpan`], a guard for timing an operation
//!
//! # Tracing Integration
//!
//! scribe emits through the `tracing` crate and never installs a subscriber
//! itself. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("scribe::layout=debug,scribe::clipboard=debug")
//!     .init();
//! ```

/// Span names used throughout scribe for tracing.
pub mod span_names {
    /// A full line-breaking pass over the document.
    pub const LAYOUT_PASS: &str = "scribe::layout_pass";
    /// Painting one frame of an editor.
    pub const PAINT: &str = "scribe::paint";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "scribe_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "scribe_core::signal";
    /// Styled document mutations.
    pub const DOCUMENT: &str = "scribe::document";
    /// Line breaking and coordinate mapping.
    pub const LAYOUT: &str = "scribe::layout";
    /// Editor controller: typing, navigation, history.
    pub const EDITOR: &str = "scribe::editor";
    /// Clipboard requests and their resolution.
    pub const CLIPBOARD: &str = "scribe::clipboard";
    /// IME composition.
    pub const IME: &str = "scribe::ime";
    /// Performance spans.
    pub const PERF: &str = "scribe::perf";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "scribe::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with consistent
/// target naming.
#[macro_export]
macro_rules! scribe_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "scribe_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! scribe_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "scribe_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! scribe_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "scribe_core", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [
            targets::DOCUMENT,
            targets::LAYOUT,
            targets::EDITOR,
            targets::CLIPBOARD,
            targets::IME,
            targets::PERF,
        ] {
            assert!(target.starts_with("scribe::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }

    #[test]
    fn test_macros_expand() {
        scribe_trace!("trace message {}", 1);
        scribe_debug!(value = 2, "debug message");
        scribe_warn!("warn message");
    }
}
