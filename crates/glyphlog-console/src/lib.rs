//! Terminal output and process-wide wiring for glyphlog.
//!
//! - [`ConsoleSink`] writes engine output to stdout/stderr, styled when the
//!   terminal supports it
//! - [`global`] binds one engine per process, with the [`glyph!`] macro as
//!   the call shorthand
//! - [`logging`] routes `log` and `tracing` records into the bound engine
//!
//! # Example
//!
//! ```ignore
//! use glyphlog_console::{ConsoleSink, glyph, global};
//! use glyphlog_core::{EmojiIcons, LoggerConfig};
//!
//! let config = LoggerConfig::from_env().with_icon_pack(true);
//! global::install(config, ConsoleSink::new(), Some(&EmojiIcons)).await;
//!
//! glyph!(success, "deployed", "v1.2");
//! glyph!(dev, info, "cache warm");
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod console;
pub mod detection;
pub mod global;
pub mod logging;
pub mod testing;

pub use config::ConsoleConfig;
pub use console::ConsoleSink;
pub use detection::{DisplayContext, is_plain_context, should_enable_color};
pub use logging::{GlyphLayer, GlyphLogger};

#[doc(hidden)]
pub mod __private {
    pub use glyphlog_core::parts;
}
