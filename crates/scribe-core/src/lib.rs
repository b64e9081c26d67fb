//! Core systems for scribe.
//!
//! This crate provides the foundational pieces shared by the scribe editing
//! engine:
//!
//! - **Signal/Slot System**: type-safe change notification
//! - **Logging**: `tracing` targets, span names and performance guards
//!
//! # Signal/Slot Example
//!
//! ```
//! use scribe_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
