//! `log` facade bridge.
//!
//! # Usage
//!
//! ```ignore
//! use glyphlog_console::logging::GlyphLogger;
//! use log::Level;
//!
//! // Route info and above to the globally bound engine
//! GlyphLogger::init(Level::Info)?;
//!
//! // Or use the builder for more control
//! GlyphLogger::builder()
//!     .level(Level::Debug)
//!     .with_targets(true)
//!     .init()?;
//! ```

use std::sync::Arc;

use glyphlog_core::{Engine, LogValue};
use log::{Level, LevelFilter, Log, Metadata, Record};

use super::{EngineHandle, is_routable, route};

/// Logger that forwards `log` records to an engine.
#[derive(Debug)]
pub struct GlyphLogger {
    handle: EngineHandle,
    min_level: Level,
    show_targets: bool,
}

impl GlyphLogger {
    /// Create a logger for the global engine with the given minimum level.
    #[must_use]
    pub fn new(min_level: Level) -> Self {
        GlyphLoggerBuilder::new().level(min_level).build()
    }

    /// Create a logger using the builder pattern.
    #[must_use]
    pub fn builder() -> GlyphLoggerBuilder {
        GlyphLoggerBuilder::new()
    }

    /// Initialize as the global logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(min_level: Level) -> Result<(), log::SetLoggerError> {
        GlyphLoggerBuilder::new().level(min_level).init()
    }

    /// Initialize as the global logger, ignoring errors if already set.
    pub fn try_init(min_level: Level) {
        let _ = Self::init(min_level);
    }

    fn record_parts(&self, record: &Record) -> Vec<LogValue> {
        let message = LogValue::from(record.args().to_string());
        if self.show_targets {
            vec![LogValue::from(format!("{}:", record.target())), message]
        } else {
            vec![message]
        }
    }
}

/// Builder for configuring the logger.
#[derive(Debug)]
pub struct GlyphLoggerBuilder {
    handle: EngineHandle,
    min_level: Level,
    show_targets: bool,
}

impl Default for GlyphLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphLoggerBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handle: EngineHandle::Global,
            min_level: Level::Info,
            show_targets: false,
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Set the minimum log level from a LevelFilter.
    #[must_use]
    pub fn level_filter(mut self, filter: LevelFilter) -> Self {
        self.min_level = filter.to_level().unwrap_or(Level::Trace);
        self
    }

    /// Set whether to put the record's target before the message.
    #[must_use]
    pub fn with_targets(mut self, show: bool) -> Self {
        self.show_targets = show;
        self
    }

    /// Write to `engine` instead of the globally bound one.
    #[must_use]
    pub fn with_engine(mut self, engine: Arc<Engine>) -> Self {
        self.handle = EngineHandle::Fixed(engine);
        self
    }

    /// Build the logger without installing it.
    #[must_use]
    pub fn build(self) -> GlyphLogger {
        GlyphLogger {
            handle: self.handle,
            min_level: self.min_level,
            show_targets: self.show_targets,
        }
    }

    /// Build and install as the global logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.min_level;
        let logger = Box::new(self.build());
        log::set_boxed_logger(logger)?;
        log::set_max_level(level.to_level_filter());
        Ok(())
    }

    /// Build and install, ignoring errors if already set.
    pub fn try_init(self) {
        let _ = self.init();
    }
}

impl Log for GlyphLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level && is_routable(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(engine) = self.handle.get() else {
            return;
        };
        route(&engine, record.level(), &self.record_parts(record));
    }

    fn flush(&self) {}
}
