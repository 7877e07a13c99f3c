//! Testing utilities for glyphlog console output
//!
//! Provides `CapturedOutput` for capturing and asserting on what a
//! [`ConsoleSink`](crate::ConsoleSink) writes.

mod captured;

pub use captured::{BufferWriter, CapturedOutput};
